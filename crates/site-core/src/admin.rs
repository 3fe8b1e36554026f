//! Password-gated admin panel: inquiry list and chat settings.

use database::{ChatSettings, DatabaseError, Inquiry, Persistence};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::auth::{AuthError, Authenticator};

pub const INCORRECT_PASSWORD: &str = "Incorrect password";
pub const SETTINGS_SAVED: &str = "Settings saved successfully!";

/// Errors from admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("admin login required")]
    Unauthenticated,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Persistence(#[from] DatabaseError),
}

pub type Result<T> = std::result::Result<T, AdminError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminTab {
    #[default]
    Inquiries,
    Settings,
}

impl AdminTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminTab::Inquiries => "inquiries",
            AdminTab::Settings => "settings",
        }
    }
}

/// Per-visitor admin panel state.
#[derive(Debug, Clone, Default)]
pub struct AdminPanel {
    authenticated: bool,
    tab: AdminTab,
    alert: Option<String>,
}

impl AdminPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn tab(&self) -> AdminTab {
        self.tab
    }

    /// Pending one-shot alert, cleared once taken.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Try a password. A wrong one leaves the panel locked and raises
    /// [`INCORRECT_PASSWORD`].
    pub async fn login(&mut self, auth: &dyn Authenticator, attempt: &str) -> Result<bool> {
        if auth.verify(attempt).await? {
            info!("Admin login succeeded");
            self.authenticated = true;
            self.alert = None;
        } else {
            warn!("Admin login failed");
            self.authenticated = false;
            self.alert = Some(INCORRECT_PASSWORD.to_string());
        }
        Ok(self.authenticated)
    }

    /// Close the panel. The next visit has to log in again.
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn select_tab(&mut self, tab: AdminTab) -> Result<()> {
        self.require_auth()?;
        self.tab = tab;
        Ok(())
    }

    /// Stored inquiries, newest first.
    pub async fn inquiries(&self, persistence: &Persistence) -> Result<Vec<Inquiry>> {
        self.require_auth()?;
        let mut list = persistence.inquiries().await?;
        list.reverse();
        Ok(list)
    }

    /// Remove one inquiry. Returns whether it existed.
    pub async fn delete_inquiry(&self, persistence: &Persistence, id: &str) -> Result<bool> {
        self.require_auth()?;
        Ok(persistence.delete_inquiry(id).await?)
    }

    pub async fn settings(&self, persistence: &Persistence) -> Result<ChatSettings> {
        self.require_auth()?;
        Ok(persistence.chat_settings().await?)
    }

    /// Write both chat keys. Subscribers of the store see the change right away.
    pub async fn save_settings(&mut self, persistence: &Persistence, settings: &ChatSettings) -> Result<()> {
        self.require_auth()?;
        persistence.save_chat_settings(settings).await?;
        self.alert = Some(SETTINGS_SAVED.to_string());
        Ok(())
    }

    fn require_auth(&self) -> Result<()> {
        if self.authenticated {
            Ok(())
        } else {
            Err(AdminError::Unauthenticated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SharedSecretAuthenticator;
    use database::{ChatEnabled, ChatPrompt, NewInquiry, StoreEventKind};

    const SECRET: &str = "test-secret";

    async fn logged_in() -> AdminPanel {
        let mut panel = AdminPanel::new();
        let auth = SharedSecretAuthenticator::new(SECRET);
        assert!(panel.login(&auth, SECRET).await.unwrap());
        panel
    }

    async fn seed(persistence: &Persistence, names: &[&str]) {
        for name in names {
            persistence
                .append_inquiry(NewInquiry {
                    name: name.to_string(),
                    email: "lead@example.com".to_string(),
                    message: "Please call me".to_string(),
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_wrong_password_sets_alert() {
        let mut panel = AdminPanel::new();
        let auth = SharedSecretAuthenticator::new(SECRET);

        assert!(!panel.login(&auth, "guess").await.unwrap());
        assert!(!panel.is_authenticated());
        assert_eq!(panel.take_alert().as_deref(), Some(INCORRECT_PASSWORD));
        assert_eq!(panel.take_alert(), None);
    }

    #[tokio::test]
    async fn test_unconfigured_secret_never_authenticates() {
        let mut panel = AdminPanel::new();
        let auth = SharedSecretAuthenticator::disabled();
        assert!(!panel.login(&auth, "").await.unwrap());
        assert!(!panel.login(&auth, "admin").await.unwrap());
    }

    #[tokio::test]
    async fn test_locked_panel_rejects_operations() {
        let persistence = Persistence::in_memory();
        let mut panel = AdminPanel::new();

        assert!(matches!(panel.inquiries(&persistence).await, Err(AdminError::Unauthenticated)));
        assert!(matches!(
            panel.delete_inquiry(&persistence, "1").await,
            Err(AdminError::Unauthenticated)
        ));
        assert!(matches!(panel.settings(&persistence).await, Err(AdminError::Unauthenticated)));
        assert!(matches!(
            panel.save_settings(&persistence, &ChatSettings::default()).await,
            Err(AdminError::Unauthenticated)
        ));
        assert!(matches!(panel.select_tab(AdminTab::Settings), Err(AdminError::Unauthenticated)));
    }

    #[tokio::test]
    async fn test_close_requires_new_login() {
        let mut panel = logged_in().await;
        panel.select_tab(AdminTab::Settings).unwrap();

        panel.close();
        assert!(!panel.is_authenticated());
        assert_eq!(panel.tab(), AdminTab::Inquiries);
    }

    #[tokio::test]
    async fn test_inquiries_newest_first() {
        let persistence = Persistence::in_memory();
        seed(&persistence, &["First", "Second", "Third"]).await;

        let panel = logged_in().await;
        let names: Vec<String> = panel
            .inquiries(&persistence)
            .await
            .unwrap()
            .into_iter()
            .map(|inq| inq.name)
            .collect();
        assert_eq!(names, vec!["Third", "Second", "First"]);
    }

    #[tokio::test]
    async fn test_delete_inquiry() {
        let persistence = Persistence::in_memory();
        seed(&persistence, &["First", "Second", "Third"]).await;
        let stored = persistence.inquiries().await.unwrap();

        let panel = logged_in().await;
        assert!(panel.delete_inquiry(&persistence, &stored[1].id).await.unwrap());
        assert!(!panel.delete_inquiry(&persistence, &stored[1].id).await.unwrap());

        let remaining = persistence.inquiries().await.unwrap();
        assert_eq!(remaining, vec![stored[0].clone(), stored[2].clone()]);
    }

    #[tokio::test]
    async fn test_save_settings_writes_both_keys_and_publishes() {
        let persistence = Persistence::in_memory();
        let mut events = persistence.subscribe();
        let mut panel = logged_in().await;

        let settings = ChatSettings {
            enabled: false,
            system_prompt: "Be brief.".to_string(),
        };
        panel.save_settings(&persistence, &settings).await.unwrap();

        assert_eq!(persistence.get::<ChatEnabled>().await.unwrap(), Some(false));
        assert_eq!(persistence.get::<ChatPrompt>().await.unwrap().as_deref(), Some("Be brief."));
        assert_eq!(panel.settings(&persistence).await.unwrap(), settings);
        assert_eq!(panel.take_alert().as_deref(), Some(SETTINGS_SAVED));

        let first = events.recv().await.unwrap();
        let second = events.recv().await.unwrap();
        assert_eq!(first.key, "nactax_chat_enabled");
        assert_eq!(second.key, "nactax_chat_prompt");
        assert_eq!(first.kind, StoreEventKind::Set);
    }
}
