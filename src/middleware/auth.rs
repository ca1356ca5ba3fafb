use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{error::AppError, models::User, session, state::AppState};

/// The authenticated caller. Resolved from the `sid` session cookie; the
/// user record is re-fetched from the store on every request so roles are
/// never trusted from a stale session payload.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

pub fn ensure_admin(auth: &AuthUser) -> Result<(), AppError> {
    if !auth.user.is_admin {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session::cookie_token(&parts.headers).ok_or(AppError::Unauthorized)?;
        let user_id = state
            .sessions
            .resolve(&token)
            .await
            .ok_or(AppError::Unauthorized)?;
        let user = state
            .store
            .user(user_id)
            .await
            .ok_or(AppError::Unauthorized)?;
        Ok(AuthUser { user })
    }
}
