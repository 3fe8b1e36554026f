//! Scripted brain implementation - replays queued outcomes and records requests.

use std::collections::VecDeque;

use chat_core::{async_trait, ChatBackend, ChatError, ChatRequest};
use tokio::sync::Mutex;

/// A canned outcome for one call.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// Reply with this text.
    Reply(String),
    /// Reply with an empty string.
    Empty,
    /// Fail as if the network call was rejected.
    NetworkFailure,
    /// Fail with an API status.
    ApiFailure(u16),
}

/// A backend that answers from a script and records what it was asked.
///
/// When the script runs out every further call fails with
/// [`ChatError::Unavailable`].
#[derive(Debug, Default)]
pub struct ScriptedBrain {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedBrain {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A brain that replies with each of `replies` in turn.
    pub fn replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(replies.into_iter().map(|r| Scripted::Reply(r.into())))
    }

    /// Requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBrain {
    async fn generate(&self, request: ChatRequest) -> Result<String, ChatError> {
        self.requests.lock().await.push(request);

        let next = self.script.lock().await.pop_front();
        match next {
            Some(Scripted::Reply(text)) => Ok(text),
            Some(Scripted::Empty) => Ok(String::new()),
            Some(Scripted::NetworkFailure) => {
                Err(ChatError::Network("connection refused".to_string()))
            }
            Some(Scripted::ApiFailure(status)) => Err(ChatError::Api {
                status,
                message: "scripted failure".to_string(),
            }),
            None => Err(ChatError::Unavailable("script exhausted".to_string())),
        }
    }

    fn name(&self) -> &str {
        "ScriptedBrain"
    }
}
