//! Typed persistence service shared by the site components.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};

use crate::error::Result;
use crate::keys::{ChatEnabled, ChatPrompt, Inquiries, StoreKey};
use crate::kv::KeyValueStore;
use crate::memory::MemoryStore;
use crate::models::{ChatSettings, Inquiry, NewInquiry};

/// Capacity of the change notification channel.
const EVENT_CAPACITY: usize = 64;

/// What happened to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEventKind {
    Set,
    Deleted,
}

/// Notification published after every successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEvent {
    /// Wire name of the key that changed.
    pub key: &'static str,
    pub kind: StoreEventKind,
}

/// Cloneable handle over a [`KeyValueStore`].
///
/// Adds typed access per key, the inquiry list operations, and an in-process
/// publish/subscribe channel so readers can react to settings changes.
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<StoreEvent>,
    /// Serializes read-modify-write cycles on list values within this process.
    list_lock: Arc<Mutex<()>>,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("subscribers", &self.events.receiver_count())
            .finish()
    }
}

impl Persistence {
    /// Wrap a store backend.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            store,
            events,
            list_lock: Arc::new(Mutex::new(())),
        }
    }

    /// A persistence handle over a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// The backend this handle writes to. A handle built over it with
    /// [`Persistence::new`] shares the data but has its own event channel.
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        self.store.clone()
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Read and decode the value under `K`.
    pub async fn get<K: StoreKey>(&self) -> Result<Option<K::Value>> {
        match self.store.get(K::NAME).await? {
            Some(raw) => Ok(Some(K::decode(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode and store a value under `K`.
    pub async fn set<K: StoreKey>(&self, value: &K::Value) -> Result<()> {
        let raw = K::encode(value)?;
        self.store.set(K::NAME, &raw).await?;
        self.publish(K::NAME, StoreEventKind::Set);
        Ok(())
    }

    /// Remove the value under `K`. Returns whether a value was present.
    pub async fn delete<K: StoreKey>(&self) -> Result<bool> {
        let removed = self.store.delete(K::NAME).await?;
        if removed {
            self.publish(K::NAME, StoreEventKind::Deleted);
        }
        Ok(removed)
    }

    /// All captured inquiries in submission order. A missing list is empty.
    pub async fn inquiries(&self) -> Result<Vec<Inquiry>> {
        Ok(self.get::<Inquiries>().await?.unwrap_or_default())
    }

    /// Append a new inquiry stamped with the current time.
    pub async fn append_inquiry(&self, new: NewInquiry) -> Result<Inquiry> {
        self.append_inquiry_at(new, Utc::now()).await
    }

    /// Append a new inquiry stamped with `now`.
    pub async fn append_inquiry_at(&self, new: NewInquiry, now: DateTime<Utc>) -> Result<Inquiry> {
        let _guard = self.list_lock.lock().await;

        let mut list = self.inquiries().await?;
        let inquiry = Inquiry {
            id: next_inquiry_id(&list, now),
            name: new.name,
            email: new.email,
            message: new.message,
            submitted_at: now,
        };
        list.push(inquiry.clone());
        self.set::<Inquiries>(&list).await?;

        info!(id = %inquiry.id, total = list.len(), "Inquiry stored");
        Ok(inquiry)
    }

    /// Remove the inquiry with `id`, keeping the others in order.
    ///
    /// Returns whether a record was removed. The list is rewritten either way.
    pub async fn delete_inquiry(&self, id: &str) -> Result<bool> {
        let _guard = self.list_lock.lock().await;

        let list = self.inquiries().await?;
        let before = list.len();
        let kept: Vec<Inquiry> = list.into_iter().filter(|inq| inq.id != id).collect();
        let removed = kept.len() != before;
        self.set::<Inquiries>(&kept).await?;

        info!(id, removed, remaining = kept.len(), "Inquiry delete");
        Ok(removed)
    }

    /// Current chat configuration, with defaults for anything unset.
    pub async fn chat_settings(&self) -> Result<ChatSettings> {
        let defaults = ChatSettings::default();
        let enabled = self.get::<ChatEnabled>().await?.unwrap_or(defaults.enabled);
        let system_prompt = self
            .get::<ChatPrompt>()
            .await?
            .filter(|prompt| !prompt.trim().is_empty())
            .unwrap_or(defaults.system_prompt);

        Ok(ChatSettings {
            enabled,
            system_prompt,
        })
    }

    /// Overwrite the chat configuration.
    pub async fn save_chat_settings(&self, settings: &ChatSettings) -> Result<()> {
        self.set::<ChatEnabled>(&settings.enabled).await?;
        self.set::<ChatPrompt>(&settings.system_prompt).await?;
        info!(enabled = settings.enabled, "Chat settings saved");
        Ok(())
    }

    fn publish(&self, key: &'static str, kind: StoreEventKind) {
        // No subscribers is fine.
        if self.events.send(StoreEvent { key, kind }).is_err() {
            debug!(key, "No store subscribers");
        }
    }
}

/// Derive an id from `now` in milliseconds, bumped past the largest stored
/// numeric id so ids stay unique and increasing when the clock stalls.
pub fn next_inquiry_id(existing: &[Inquiry], now: DateTime<Utc>) -> String {
    let candidate = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let newest = existing.iter().filter_map(|inq| inq.id.parse::<u64>().ok()).max();

    match newest {
        Some(max) if max >= candidate => (max + 1).to_string(),
        _ => candidate.to_string(),
    }
}
