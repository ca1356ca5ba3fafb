use crate::{session::SessionStore, store::Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub sessions: SessionStore,
}
