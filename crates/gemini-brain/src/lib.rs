//! Google Gemini chat backend.
//!
//! This crate provides a [`ChatBackend`] that sends each support chat turn to
//! the Generative Language API's `generateContent` endpoint.
//!
//! # Features
//!
//! - Uses `gemini-2.5-flash` by default
//! - Sends the full transcript plus the configured system instruction per turn
//! - Configurable via environment variables or a builder
//!
//! # Usage
//!
//! ```rust,no_run
//! use gemini_brain::{ChatBackend, ChatMessage, ChatRequest, GeminiBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = GeminiBrain::from_env()?;
//!     let reply = brain
//!         .generate(ChatRequest::new(
//!             "You are a helpful support agent.",
//!             vec![ChatMessage::user("What are your office hours?")],
//!         ))
//!         .await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::GeminiBrain;
pub use config::{GeminiBrainConfig, GeminiBrainConfigBuilder, DEFAULT_API_URL, DEFAULT_MODEL};

// Re-export chat-core types for convenience
pub use chat_core::{async_trait, ChatBackend, ChatError, ChatMessage, ChatRequest, Role};
