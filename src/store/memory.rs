// src/store/memory.rs
use super::{notify_change, StorageEvent, Store, ViewId, EVENT_CAPACITY};
use crate::core::prelude::*;
use std::collections::HashMap;
use std::sync::RwLock;
use tokio::sync::broadcast;

/// Process-local storage area. Nothing survives the process.
#[derive(Debug)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    sender: broadcast::Sender<StorageEvent>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            entries: RwLock::new(HashMap::new()),
            sender,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|p| p.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str, origin: ViewId) -> Result<()> {
        let old = {
            let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
            entries.insert(key.to_string(), value.to_string())
        };
        notify_change(&self.sender, key, old, Some(value.to_string()), Some(origin));
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.sender.subscribe()
    }
}
