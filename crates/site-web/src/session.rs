//! Per-visitor state keyed by a session cookie.
//!
//! Sessions live in memory only. The store keeps a bounded number of them and
//! evicts the least recently used when the limit is reached.

use std::sync::Arc;

use indexmap::IndexMap;
use site_core::{AdminPanel, ChatSession, LeadForm, Navigator, PaymentForm};
use tokio::sync::{Mutex, RwLock};
use tower_cookies::cookie::SameSite;
use tower_cookies::{Cookie, Cookies};
use tracing::debug;
use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "nactax_session";

/// Everything the site remembers about one visitor.
#[derive(Debug, Default)]
pub struct VisitorSession {
    pub navigator: Navigator,
    pub lead_form: LeadForm,
    pub payment: PaymentForm,
    pub chat: ChatSession,
    pub admin: AdminPanel,
}

pub type SharedSession = Arc<Mutex<VisitorSession>>;

/// Visitor sessions with LRU eviction.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<IndexMap<Uuid, SharedSession>>,
    max_sessions: usize,
}

impl SessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(IndexMap::new()),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Session for `id`, creating one when `id` is absent or unknown.
    ///
    /// Returns the session's id, which differs from `id` when a new session
    /// was created. The session is marked as recently used.
    pub async fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, SharedSession) {
        let mut sessions = self.sessions.write().await;

        // Move to end to mark as recently used
        if let Some(id) = id {
            if let Some(session) = sessions.shift_remove(&id) {
                sessions.insert(id, session.clone());
                return (id, session);
            }
        }

        let id = Uuid::new_v4();
        let session = SharedSession::default();
        sessions.insert(id, session.clone());

        while sessions.len() > self.max_sessions {
            if let Some((evicted, _)) = sessions.shift_remove_index(0) {
                debug!(session = %evicted, "Evicted visitor session");
            }
        }

        (id, session)
    }

    /// Session for the request's cookie. Sets the cookie when a new session starts.
    pub async fn resolve(&self, cookies: &Cookies) -> SharedSession {
        let current = cookies
            .get(SESSION_COOKIE)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

        let (id, session) = self.get_or_create(current).await;
        if current != Some(id) {
            let mut cookie = Cookie::new(SESSION_COOKIE, id.to_string());
            cookie.set_path("/");
            cookie.set_http_only(true);
            cookie.set_same_site(SameSite::Lax);
            cookies.add(cookie);
        }
        session
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn contains(&self, id: &Uuid) -> bool {
        self.sessions.read().await.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reuses_known_session() {
        let store = SessionStore::new(10);
        let (id, first) = store.get_or_create(None).await;
        first.lock().await.chat.toggle_open();

        let (same_id, again) = store.get_or_create(Some(id)).await;
        assert_eq!(id, same_id);
        assert!(again.lock().await.chat.is_open());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_id_gets_fresh_session() {
        let store = SessionStore::new(10);
        let stale = Uuid::new_v4();
        let (id, _) = store.get_or_create(Some(stale)).await;
        assert_ne!(id, stale);
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        let store = SessionStore::new(2);
        let (a, _) = store.get_or_create(None).await;
        let (b, _) = store.get_or_create(None).await;

        // Touch a so b becomes the oldest
        store.get_or_create(Some(a)).await;
        let (c, _) = store.get_or_create(None).await;

        assert_eq!(store.len().await, 2);
        assert!(store.contains(&a).await);
        assert!(!store.contains(&b).await);
        assert!(store.contains(&c).await);
    }
}
