// src/store/mod.rs
//! Key/value storage shared by every open view, with change notifications.
//!
//! A [`Store`] is the origin-wide storage area. Each view talks to it through
//! its own [`StoreHandle`], which stamps writes with the view's [`ViewId`] so
//! that a view's [`StorageSubscription`] only yields changes made elsewhere.
pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::core::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

pub const THEME_KEY: &str = "agri_theme";
pub const LANG_KEY: &str = "agri_lang";
pub const CART_KEY: &str = "agri_cart";

pub(crate) const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(Uuid);

impl ViewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &self.0.simple().to_string()[..8])
    }
}

/// A change to one key. `origin` is `None` when the write came from outside
/// this process (another process sharing the same storage file).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub origin: Option<ViewId>,
}

pub trait Store: Send + Sync + std::fmt::Debug {
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value`; emits a [`StorageEvent`] only when the value changed.
    fn set(&self, key: &str, value: &str, origin: ViewId) -> Result<()>;

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent>;
}

/// Notifies subscribers when `old` differs from `new`.
pub(crate) fn notify_change(
    sender: &broadcast::Sender<StorageEvent>,
    key: &str,
    old_value: Option<String>,
    new_value: Option<String>,
    origin: Option<ViewId>,
) {
    if old_value == new_value {
        return;
    }
    // No receivers is fine: nobody else is looking.
    let _ = sender.send(StorageEvent {
        key: key.to_string(),
        old_value,
        new_value,
        origin,
    });
}

/// One view's access to the shared store.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    id: ViewId,
    store: Arc<dyn Store>,
}

impl StoreHandle {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            id: ViewId::new(),
            store,
        }
    }

    /// Another view on the same storage area.
    pub fn open_view(&self) -> Self {
        Self::new(self.store.clone())
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.store.get(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.store.set(key, value, self.id)
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }

    pub fn subscribe(&self) -> StorageSubscription {
        StorageSubscription {
            id: self.id,
            receiver: self.store.subscribe(),
        }
    }
}

/// Changes made by other views (or other processes).
#[derive(Debug)]
pub struct StorageSubscription {
    id: ViewId,
    receiver: broadcast::Receiver<StorageEvent>,
}

impl StorageSubscription {
    /// Next foreign change; `None` once the store is gone.
    pub async fn recv(&mut self) -> Option<StorageEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if event.origin == Some(self.id) => continue,
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    log::warn!("View {} lagged, skipped {} storage events", self.id, skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Option<StorageEvent> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if event.origin == Some(self.id) => continue,
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    log::warn!("View {} lagged, skipped {} storage events", self.id, skipped);
                }
                Err(_) => return None,
            }
        }
    }
}
