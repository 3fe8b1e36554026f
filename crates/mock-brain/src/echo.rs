//! Echo brain implementation - echoes the last user message back.

use chat_core::{async_trait, ChatBackend, ChatError, ChatRequest};

/// A simple backend that echoes the newest user message.
///
/// Useful for testing the chat flow without any model behind it.
#[derive(Debug, Clone, Default)]
pub struct EchoBrain {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoBrain {
    /// Create a new EchoBrain with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoBrain with a custom prefix.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_brain::EchoBrain;
    ///
    /// let brain = EchoBrain::with_prefix("Echo: ");
    /// // Will respond with "Echo: <last user message>"
    /// ```
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

#[async_trait]
impl ChatBackend for EchoBrain {
    async fn generate(&self, request: ChatRequest) -> Result<String, ChatError> {
        let text = request.last_user_text().ok_or(ChatError::EmptyResponse)?;

        Ok(match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, text),
            None => text.to_string(),
        })
    }

    fn name(&self) -> &str {
        "EchoBrain"
    }
}
