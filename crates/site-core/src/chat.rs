//! Floating support chat.
//!
//! A [`ChatSession`] holds one visitor's transcript and widget state. The
//! [`ChatWidget`] service reads the chat settings and calls the backend.
//! A turn is split into [`ChatSession::begin_turn`] and
//! [`ChatSession::complete_turn`] so the caller can release its lock on the
//! session while the backend call is outstanding.

use std::sync::Arc;

use chat_core::{ChatBackend, ChatMessage, ChatRequest};
use database::{ChatSettings, DatabaseError, Persistence};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// First transcript entry of every session.
pub const GREETING: &str =
    "Hello! Welcome to NACTAX. How can I assist you with your tax or accounting needs today?";

/// Shown in place of a reply whenever the backend fails or answers with nothing.
pub const FALLBACK: &str =
    "I apologize, I'm having trouble connecting right now. Please call us at 614-699-0603.";

/// Errors from a chat turn.
#[derive(Debug, Error)]
pub enum ChatTurnError {
    #[error("message is empty")]
    EmptyInput,

    #[error("a reply is still pending")]
    Busy,

    #[error("chat is disabled")]
    Disabled,

    #[error("could not read chat settings: {0}")]
    Persistence(#[from] DatabaseError),
}

/// A turn whose user message is already in the transcript.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    messages: Vec<ChatMessage>,
}

impl PendingTurn {
    /// Build the backend request: prior transcript plus the new message.
    pub fn into_request(self, system_instruction: impl Into<String>) -> ChatRequest {
        ChatRequest::new(system_instruction, self.messages)
    }

    pub fn user_text(&self) -> &str {
        self.messages.last().map(|m| m.text.as_str()).unwrap_or_default()
    }
}

/// One visitor's chat transcript and widget state.
#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    transcript: Vec<ChatMessage>,
    open: bool,
    minimized: bool,
    loading: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self {
            transcript: vec![ChatMessage::assistant(GREETING)],
            open: false,
            minimized: false,
            loading: false,
        }
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    /// Whether a turn is waiting on the backend.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Open the widget from the floating button, or close it.
    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    pub fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
    }

    /// Append the user's message and enter loading.
    ///
    /// Blank input is rejected with [`ChatTurnError::EmptyInput`], and a
    /// second turn while one is outstanding with [`ChatTurnError::Busy`].
    /// Neither appends anything.
    pub fn begin_turn(&mut self, text: &str) -> Result<PendingTurn, ChatTurnError> {
        if text.trim().is_empty() {
            return Err(ChatTurnError::EmptyInput);
        }
        if self.loading {
            return Err(ChatTurnError::Busy);
        }

        self.transcript.push(ChatMessage::user(text));
        self.loading = true;

        Ok(PendingTurn {
            messages: self.transcript.clone(),
        })
    }

    /// Append the backend reply, or [`FALLBACK`] when there is none, and leave loading.
    pub fn complete_turn(&mut self, reply: Option<String>) -> &ChatMessage {
        let text = reply
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| FALLBACK.to_string());

        self.transcript.push(ChatMessage::assistant(text));
        self.loading = false;
        &self.transcript[self.transcript.len() - 1]
    }
}

/// Talks to the chat backend on behalf of sessions.
#[derive(Clone)]
pub struct ChatWidget {
    persistence: Persistence,
    backend: Arc<dyn ChatBackend>,
}

impl ChatWidget {
    pub fn new(persistence: Persistence, backend: Arc<dyn ChatBackend>) -> Self {
        Self { persistence, backend }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Current chat settings, read fresh from the store.
    pub async fn settings(&self) -> Result<ChatSettings, DatabaseError> {
        self.persistence.chat_settings().await
    }

    /// Whether the widget should render at all.
    pub async fn is_enabled(&self) -> Result<bool, DatabaseError> {
        Ok(self.settings().await?.enabled)
    }

    /// Produce the reply for a pending turn. `None` means the turn failed and
    /// the fallback should be shown. Nothing is retried.
    pub async fn reply(&self, turn: PendingTurn) -> Option<String> {
        let settings = match self.settings().await {
            Ok(settings) => settings,
            Err(err) => {
                error!(error = %err, "Failed to read chat settings");
                return None;
            }
        };

        let request = turn.into_request(settings.system_prompt);
        debug!(
            backend = self.backend.name(),
            messages = request.messages.len(),
            "Sending chat turn"
        );

        match self.backend.generate(request).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(backend = self.backend.name(), chars = text.len(), "Chat reply received");
                Some(text)
            }
            Ok(_) => {
                warn!(backend = self.backend.name(), "Chat backend returned an empty reply");
                None
            }
            Err(err) => {
                error!(backend = self.backend.name(), error = %err, "Chat backend call failed");
                None
            }
        }
    }

    /// Run a whole turn against a session the caller holds exclusively.
    pub async fn send<'a>(
        &self,
        session: &'a mut ChatSession,
        text: &str,
    ) -> Result<&'a ChatMessage, ChatTurnError> {
        if !self.is_enabled().await? {
            return Err(ChatTurnError::Disabled);
        }

        let turn = session.begin_turn(text)?;
        let reply = self.reply(turn).await;
        Ok(session.complete_turn(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chat_core::Role;
    use database::{ChatEnabled, ChatPrompt, DEFAULT_SYSTEM_PROMPT};
    use mock_brain::{EchoBrain, Scripted, ScriptedBrain};

    use crate::content::CONTACT;

    fn widget_with(brain: Arc<ScriptedBrain>) -> (ChatWidget, Persistence) {
        let persistence = Persistence::in_memory();
        (ChatWidget::new(persistence.clone(), brain), persistence)
    }

    #[test]
    fn test_session_starts_with_greeting() {
        let session = ChatSession::new();
        assert_eq!(session.transcript(), &[ChatMessage::assistant(GREETING)]);
        assert!(!session.is_open());
        assert!(!session.is_loading());
    }

    #[test]
    fn test_fallback_points_to_phone() {
        assert!(FALLBACK.contains(CONTACT.phone));
    }

    #[tokio::test]
    async fn test_reply_appended_after_user_message() {
        let brain = Arc::new(ScriptedBrain::replies(["We prepare business returns."]));
        let (widget, _) = widget_with(brain.clone());
        let mut session = ChatSession::new();

        let reply = widget.send(&mut session, "Do you do business taxes?").await.unwrap();
        assert_eq!(reply.text, "We prepare business returns.");

        let roles: Vec<Role> = session.transcript().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
        assert!(!session.is_loading());

        let requests = brain.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system_instruction, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(requests[0].messages[0], ChatMessage::assistant(GREETING));
        assert_eq!(requests[0].last_user_text(), Some("Do you do business taxes?"));
    }

    #[tokio::test]
    async fn test_prior_transcript_is_sent() {
        let brain = Arc::new(ScriptedBrain::replies(["first reply", "second reply"]));
        let (widget, _) = widget_with(brain.clone());
        let mut session = ChatSession::new();

        widget.send(&mut session, "one").await.unwrap();
        widget.send(&mut session, "two").await.unwrap();

        let requests = brain.requests().await;
        assert_eq!(requests[1].messages.len(), 4);
        assert_eq!(requests[1].messages[2], ChatMessage::assistant("first reply"));
        assert_eq!(session.transcript().len(), 5);
    }

    #[tokio::test]
    async fn test_failures_append_fallback_without_retry() {
        for outcome in [Scripted::NetworkFailure, Scripted::ApiFailure(500), Scripted::Empty] {
            let brain = Arc::new(ScriptedBrain::new([outcome]));
            let (widget, _) = widget_with(brain.clone());
            let mut session = ChatSession::new();

            let reply = widget.send(&mut session, "hello").await.unwrap();
            assert_eq!(reply.text, FALLBACK);
            assert_eq!(reply.role, Role::Assistant);
            assert_eq!(brain.requests().await.len(), 1);
            assert!(!session.is_loading());
        }
    }

    #[tokio::test]
    async fn test_blank_input_ignored() {
        let brain = Arc::new(ScriptedBrain::replies(["unused"]));
        let (widget, _) = widget_with(brain.clone());
        let mut session = ChatSession::new();

        let result = widget.send(&mut session, "   ").await;
        assert!(matches!(result, Err(ChatTurnError::EmptyInput)));
        assert_eq!(session.transcript().len(), 1);
        assert!(brain.requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_custom_prompt_used() {
        let brain = Arc::new(ScriptedBrain::replies(["ok"]));
        let (widget, persistence) = widget_with(brain.clone());
        persistence
            .set::<ChatPrompt>(&"Answer in one sentence.".to_string())
            .await
            .unwrap();

        let mut session = ChatSession::new();
        widget.send(&mut session, "hi").await.unwrap();

        assert_eq!(brain.requests().await[0].system_instruction, "Answer in one sentence.");
    }

    #[tokio::test]
    async fn test_disabled_rejects_turn() {
        let brain = Arc::new(ScriptedBrain::replies(["unused"]));
        let (widget, persistence) = widget_with(brain.clone());
        persistence.set::<ChatEnabled>(&false).await.unwrap();

        assert!(!widget.is_enabled().await.unwrap());

        let mut session = ChatSession::new();
        let result = widget.send(&mut session, "hello").await;
        assert!(matches!(result, Err(ChatTurnError::Disabled)));
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn test_second_turn_while_loading_is_busy() {
        let mut session = ChatSession::new();
        let turn = session.begin_turn("first").unwrap();
        assert_eq!(turn.user_text(), "first");
        assert!(session.is_loading());

        assert!(matches!(session.begin_turn("second"), Err(ChatTurnError::Busy)));
        assert_eq!(session.transcript().len(), 2);

        session.complete_turn(Some("done".to_string()));
        assert!(session.begin_turn("second").is_ok());
    }

    #[tokio::test]
    async fn test_split_turn_with_echo_backend() {
        let persistence = Persistence::in_memory();
        let widget = ChatWidget::new(persistence, Arc::new(EchoBrain::new()));
        let mut session = ChatSession::new();

        let turn = session.begin_turn("echo me").unwrap();
        let reply = widget.reply(turn).await;
        let message = session.complete_turn(reply);

        assert_eq!(message.text, "echo me");
        assert_eq!(widget.backend_name(), "EchoBrain");
    }

    #[test]
    fn test_open_and_minimize_toggles() {
        let mut session = ChatSession::new();
        session.toggle_open();
        assert!(session.is_open());
        session.toggle_minimized();
        assert!(session.is_minimized());
        session.toggle_open();
        assert!(!session.is_open());
    }
}
