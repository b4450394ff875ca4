//! Session records and cookie binding.
//!
//! The gate reads and writes a single `username` attribute keyed by an opaque
//! session id. The backing store is owned by the host server; `SessionStore`
//! is the seam that keeps the interceptor independent of it. Absence of a
//! username means the session is unauthenticated.

use async_trait::async_trait;
use axum::http::{
    header::{InvalidHeaderValue, COOKIE},
    HeaderMap, HeaderValue,
};
use std::collections::HashMap;
use tokio::sync::Mutex;
use ulid::Ulid;

use super::error::GateError;

pub const SESSION_COOKIE_NAME: &str = "atesti_session";

/// Server-side session accessor.
///
/// Expiry and eviction are the host's concern; the gate performs one read and
/// at most one write per request, with no read-modify-write cycle beyond the
/// presence check of `username`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn username(&self, session_id: &str) -> Result<Option<String>, GateError>;

    /// `None` clears the username, returning the session to the
    /// unauthenticated state.
    async fn set_username(
        &self,
        session_id: &str,
        username: Option<String>,
    ) -> Result<(), GateError>;
}

/// In-memory store used by the bundled server and tests.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn username(&self, session_id: &str) -> Result<Option<String>, GateError> {
        Ok(self.sessions.lock().await.get(session_id).cloned())
    }

    async fn set_username(
        &self,
        session_id: &str,
        username: Option<String>,
    ) -> Result<(), GateError> {
        let mut sessions = self.sessions.lock().await;
        match username {
            Some(name) => {
                sessions.insert(session_id.to_string(), name);
            }
            None => {
                sessions.remove(session_id);
            }
        }
        Ok(())
    }
}

pub(crate) fn mint_session_id() -> String {
    Ulid::new().to_string()
}

pub(crate) fn extract_session_id(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME && !val.is_empty() {
            return Some(val.to_string());
        }
    }
    None
}

/// Cookie binding the browser session to its server-side record.
pub(crate) fn session_cookie(session_id: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={session_id}; Path=/; HttpOnly; SameSite=Lax"
    ))
}

#[cfg(test)]
mod tests {
    use super::{
        extract_session_id, mint_session_id, session_cookie, MemorySessionStore, SessionStore,
        SESSION_COOKIE_NAME,
    };
    use anyhow::Result;
    use axum::http::{header::COOKIE, HeaderMap, HeaderValue};

    #[tokio::test]
    async fn memory_store_round_trips_username() -> Result<()> {
        let store = MemorySessionStore::new();
        assert_eq!(store.username("s1").await?, None);

        store
            .set_username("s1", Some("a@b.com".to_string()))
            .await?;
        assert_eq!(store.username("s1").await?, Some("a@b.com".to_string()));

        store.set_username("s1", None).await?;
        assert_eq!(store.username("s1").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn clearing_an_absent_session_is_not_an_error() -> Result<()> {
        let store = MemorySessionStore::new();
        store.set_username("never-seen", None).await?;
        assert_eq!(store.username("never-seen").await?, None);
        Ok(())
    }

    #[test]
    fn extract_session_id_finds_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; atesti_session=01ARZ3NDEKTSV4RRFFQ69G5FAV; lang=eo"),
        );
        assert_eq!(
            extract_session_id(&headers),
            Some("01ARZ3NDEKTSV4RRFFQ69G5FAV".to_string())
        );
    }

    #[test]
    fn extract_session_id_ignores_empty_value() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("atesti_session="));
        assert_eq!(extract_session_id(&headers), None);
    }

    #[test]
    fn extract_session_id_missing_header() {
        assert_eq!(extract_session_id(&HeaderMap::new()), None);
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn session_cookie_is_http_only_and_lax() {
        let cookie = session_cookie("abc").unwrap();
        let value = cookie.to_str().unwrap();
        assert!(value.starts_with(&format!("{SESSION_COOKIE_NAME}=abc")));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
    }

    #[test]
    fn minted_session_ids_are_unique() {
        assert_ne!(mint_session_id(), mint_session_id());
    }
}
