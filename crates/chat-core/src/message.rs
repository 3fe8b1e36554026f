//! Transcript message types.

use serde::{Deserialize, Serialize};

/// Who wrote a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

impl ChatMessage {
    /// Create a user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// One single-shot generation request.
///
/// `messages` is the whole conversation so far, ending with the new user
/// message. The system instruction travels separately as configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub system_instruction: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(system_instruction: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            messages,
        }
    }

    /// Text of the final user message, if any.
    pub fn last_user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.is_user())
            .map(|m| m.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","text":"hi"}"#);
    }

    #[test]
    fn test_last_user_text() {
        let request = ChatRequest::new(
            "be nice",
            vec![
                ChatMessage::assistant("Hello!"),
                ChatMessage::user("first"),
                ChatMessage::assistant("reply"),
                ChatMessage::user("second"),
            ],
        );
        assert_eq!(request.last_user_text(), Some("second"));

        let empty = ChatRequest::new("", vec![ChatMessage::assistant("Hello!")]);
        assert_eq!(empty.last_user_text(), None);
    }
}
