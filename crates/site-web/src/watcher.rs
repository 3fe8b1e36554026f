//! Logs chat settings changes as they are published by the store.
//!
//! Rendering never consults this; pages and chat endpoints read the settings
//! fresh from the store on every request.

use database::{ChatEnabled, ChatPrompt, StoreEvent, StoreKey};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Follows store events and logs every chat settings write.
pub struct ChatSettingsWatcher;

impl ChatSettingsWatcher {
    /// Spawn the logging task. It holds only the receiver, so it ends once
    /// every store handle is dropped. The task yields the number of chat
    /// settings changes it saw.
    pub fn spawn(events: broadcast::Receiver<StoreEvent>) -> JoinHandle<u64> {
        tokio::spawn(Self::run(events))
    }

    async fn run(mut events: broadcast::Receiver<StoreEvent>) -> u64 {
        let mut seen = 0;
        loop {
            match events.recv().await {
                Ok(event) if is_chat_key(event.key) => {
                    seen += 1;
                    info!(key = event.key, kind = ?event.kind, "Chat settings changed");
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Settings watcher lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
        seen
    }
}

fn is_chat_key(key: &str) -> bool {
    key == ChatEnabled::NAME || key == ChatPrompt::NAME
}
