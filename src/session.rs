use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "sid";

#[derive(Debug, Clone)]
struct Session {
    user_id: i32,
    expires_at: DateTime<Utc>,
}

/// Server-side session store: opaque token -> user id. Only the id is kept
/// here; the user record (and its roles) is re-fetched from the data store
/// on every request.
#[derive(Clone)]
pub struct SessionStore {
    ttl: Duration,
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new(ttl_days: i64) -> Self {
        Self {
            ttl: Duration::days(ttl_days),
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn open(&self, user_id: i32) -> String {
        let token = Uuid::new_v4().to_string();
        let session = Session {
            user_id,
            expires_at: Utc::now() + self.ttl,
        };
        self.inner.write().await.insert(token.clone(), session);
        token
    }

    /// Resolves a token to its user id. Expired sessions are pruned on
    /// access and resolve to `None`.
    pub async fn resolve(&self, token: &str) -> Option<i32> {
        let mut guard = self.inner.write().await;
        match guard.get(token) {
            Some(session) if session.expires_at > Utc::now() => Some(session.user_id),
            Some(_) => {
                guard.remove(token);
                None
            }
            None => None,
        }
    }

    pub async fn close(&self, token: &str) {
        self.inner.write().await.remove(token);
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }
}

/// Extracts the session token from the request's Cookie header(s).
pub fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .map(str::trim)
        .find_map(|pair| {
            let rest = pair.strip_prefix(SESSION_COOKIE)?;
            rest.strip_prefix('=').map(str::to_owned)
        })
}

pub fn session_cookie(token: &str, max_age_seconds: i64) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_seconds}")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[tokio::test]
    async fn open_resolve_close_roundtrip() {
        let sessions = SessionStore::new(30);
        let token = sessions.open(42).await;
        assert_eq!(sessions.resolve(&token).await, Some(42));

        sessions.close(&token).await;
        assert_eq!(sessions.resolve(&token).await, None);
    }

    #[tokio::test]
    async fn expired_sessions_are_pruned() {
        // Zero-day TTL expires immediately.
        let sessions = SessionStore::new(0);
        let token = sessions.open(7).await;
        assert_eq!(sessions.resolve(&token).await, None);
        // Second resolve still misses: the entry was removed, not just skipped.
        assert_eq!(sessions.resolve(&token).await, None);
    }

    #[test]
    fn cookie_token_finds_sid_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; sid=abc-123; lang=en"),
        );
        assert_eq!(cookie_token(&headers).as_deref(), Some("abc-123"));
    }

    #[test]
    fn cookie_token_ignores_prefix_collisions() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("sidecar=zzz"));
        assert_eq!(cookie_token(&headers), None);
    }
}
