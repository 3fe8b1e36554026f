//! Core trait and types for chat backends.
//!
//! This crate provides the shared interface between the support chat widget
//! and whatever generates its replies. It defines:
//!
//! - [`ChatBackend`] - The trait that all backends must implement
//! - [`ChatMessage`] / [`ChatRequest`] - Transcript entries and the request sent per turn
//! - [`ChatError`] - Error types for backend calls
//!
//! # Example
//!
//! ```rust
//! use chat_core::{ChatBackend, ChatError, ChatRequest};
//! use async_trait::async_trait;
//!
//! struct Polite;
//!
//! #[async_trait]
//! impl ChatBackend for Polite {
//!     async fn generate(&self, _request: ChatRequest) -> Result<String, ChatError> {
//!         Ok("Thanks for reaching out!".to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Polite"
//!     }
//! }
//! ```

mod error;
mod message;
mod prompt;
mod trait_def;

pub use error::ChatError;
pub use message::{ChatMessage, ChatRequest, Role};
pub use prompt::{hash_prompt, prompt_fingerprint};
pub use trait_def::ChatBackend;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
