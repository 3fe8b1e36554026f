//! Delayed brain implementation - wraps another backend with artificial delay.

use std::time::Duration;

use chat_core::{async_trait, ChatBackend, ChatError, ChatRequest};
use tokio::time::sleep;

/// A backend that wraps another backend and adds artificial delay.
///
/// Useful for holding a chat turn in flight while a test pokes at the widget.
pub struct DelayedBrain<B: ChatBackend> {
    inner: B,
    delay: Duration,
}

impl<B: ChatBackend> DelayedBrain<B> {
    /// Create a new DelayedBrain wrapping the given backend with the specified delay.
    pub fn new(inner: B, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a backend with a delay in milliseconds.
    pub fn with_millis(inner: B, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }
}

#[async_trait]
impl<B: ChatBackend> ChatBackend for DelayedBrain<B> {
    async fn generate(&self, request: ChatRequest) -> Result<String, ChatError> {
        sleep(self.delay).await;
        self.inner.generate(request).await
    }

    fn name(&self) -> &str {
        "DelayedBrain"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}
