//! The ChatBackend trait definition.

use async_trait::async_trait;

use crate::error::ChatError;
use crate::message::ChatRequest;

/// A text-generation service that turns a transcript into one reply.
///
/// Implementations range from the hosted Gemini API to canned test doubles.
/// This trait is object-safe and can be used with `Arc<dyn ChatBackend>`.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Generate the assistant reply for `request`.
    ///
    /// Returns the reply text, or an error if the call failed or produced
    /// nothing.
    async fn generate(&self, request: ChatRequest) -> Result<String, ChatError>;

    /// Get a human-readable name for this backend.
    fn name(&self) -> &str;

    /// Check if the backend is ready to take requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
