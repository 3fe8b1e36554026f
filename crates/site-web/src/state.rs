//! Application state shared across handlers.

use std::sync::Arc;

use chat_core::ChatBackend;
use database::Persistence;
use rand::rngs::StdRng;
use rand::SeedableRng;
use site_core::{Authenticator, ChatWidget, PaymentPolicy};
use tokio::sync::Mutex;
use tracing::error;

use crate::session::SessionStore;
use crate::watcher::ChatSettingsWatcher;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Typed store handle.
    pub persistence: Persistence,
    /// Chat backend wrapper.
    pub chat: ChatWidget,
    /// Admin password check.
    pub authenticator: Arc<dyn Authenticator>,
    /// Payment simulator outcome policy.
    pub payment_policy: PaymentPolicy,
    /// Random source for payment outcomes.
    pub rng: Arc<Mutex<StdRng>>,
    /// Visitor sessions.
    pub sessions: Arc<SessionStore>,
}

impl AppState {
    /// Create new application state.
    ///
    /// Must be called from within a tokio runtime; it spawns the settings
    /// change logger.
    pub fn new(
        persistence: Persistence,
        backend: Arc<dyn ChatBackend>,
        authenticator: Arc<dyn Authenticator>,
        payment_policy: PaymentPolicy,
        session_max: usize,
    ) -> Self {
        ChatSettingsWatcher::spawn(persistence.subscribe());

        Self {
            chat: ChatWidget::new(persistence.clone(), backend),
            persistence,
            authenticator,
            payment_policy,
            rng: Arc::new(Mutex::new(StdRng::from_entropy())),
            sessions: Arc::new(SessionStore::new(session_max)),
        }
    }

    /// Whether pages should draw the chat widget, read fresh from the store.
    /// A failed read hides the widget.
    pub async fn chat_visible(&self) -> bool {
        match self.chat.is_enabled().await {
            Ok(enabled) => enabled,
            Err(err) => {
                error!(error = %err, "Failed to read chat settings; hiding chat");
                false
            }
        }
    }

    /// Replace the payment random source, for reproducible outcomes.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Arc::new(Mutex::new(rng));
        self
    }
}
