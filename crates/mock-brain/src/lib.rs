//! Mock chat backends for the support widget.
//!
//! This crate provides mock implementations of the `ChatBackend` trait for testing:
//! - `EchoBrain` - Echoes the last user message back
//! - `ScriptedBrain` - Replays queued replies and failures, recording requests
//! - `DelayedBrain` - Wraps another backend with artificial delay
//!
//! For production replies, use the `gemini-brain` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_brain::{ChatBackend, ChatMessage, ChatRequest, EchoBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_brain::ChatError> {
//!     let brain = EchoBrain::new();
//!
//!     let request = ChatRequest::new("Be nice.", vec![ChatMessage::user("Hello!")]);
//!
//!     let reply = brain.generate(request).await?;
//!     assert_eq!(reply, "Hello!");
//!     Ok(())
//! }
//! ```

mod delayed;
mod echo;
mod scripted;

// Re-export chat-core types for convenience
pub use chat_core::{async_trait, ChatBackend, ChatError, ChatMessage, ChatRequest};

// Export mock implementations
pub use delayed::DelayedBrain;
pub use echo::EchoBrain;
pub use scripted::{Scripted, ScriptedBrain};
