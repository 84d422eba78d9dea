// src/store/file.rs
use super::{notify_change, StorageEvent, Store, ViewId, EVENT_CAPACITY};
use crate::core::prelude::*;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Storage area persisted as one flat JSON object on disk.
///
/// A write re-reads the file, sets its one key and replaces the file by
/// rename while holding the entry lock. With [`watch`](Self::watch)
/// enabled, writes made by other processes are diffed against memory and
/// broadcast as foreign [`StorageEvent`]s.
#[derive(Debug)]
pub struct FileStore {
    shared: Arc<Shared>,
    watcher: Mutex<Option<RecommendedWatcher>>,
}

#[derive(Debug)]
struct Shared {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
    sender: broadcast::Sender<StorageEvent>,
}

impl FileStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let entries = Self::read_file(&path)?;
        log::debug!(
            "Opened storage {} ({} keys)",
            path.display(),
            entries.len()
        );

        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            shared: Arc::new(Shared {
                path,
                entries: RwLock::new(entries),
                sender,
            }),
            watcher: Mutex::new(None),
        })
    }

    pub fn path(&self) -> &Path {
        &self.shared.path
    }

    /// Starts turning external modifications of the file into events.
    pub fn watch(&self) -> Result<()> {
        let mut guard = self.watcher.lock().unwrap_or_else(|p| p.into_inner());
        if guard.is_some() {
            return Ok(());
        }

        let shared = self.shared.clone();
        let file_name = shared.path.file_name().map(|n| n.to_os_string());
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
                    return;
                }
                let ours = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                if ours {
                    if let Err(e) = shared.reload_external() {
                        log::warn!("Storage reload failed: {}", e);
                    }
                }
            }
            Err(e) => log::error!("Storage watch error: {:?}", e),
        })
        .map_err(|e| AppError::Storage(format!("Failed to create watcher: {}", e)))?;

        // Watch the directory so atomic replace-by-rename is seen too.
        let dir = match self.shared.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| AppError::Storage(format!("Failed to start watching: {}", e)))?;

        log::info!("Watching storage {}", self.shared.path.display());
        *guard = Some(watcher);
        Ok(())
    }

    /// Re-reads the file and emits events for keys changed on disk.
    pub fn reload(&self) -> Result<usize> {
        self.shared.reload_external()
    }

    fn read_file(path: &Path) -> Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

impl Shared {
    /// Replaces the file by rename so readers never see a partial write.
    fn write_file(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)?;
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "storage".to_string());
        let tmp = self
            .path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()));

        std::fs::write(&tmp, content)?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(AppError::Io(e));
        }
        Ok(())
    }

    fn reload_external(&self) -> Result<usize> {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        let on_disk = FileStore::read_file(&self.path)?;

        let keys: BTreeSet<String> = entries.keys().chain(on_disk.keys()).cloned().collect();
        let mut changed = 0;
        for key in keys {
            let old = entries.get(&key).cloned();
            let new = on_disk.get(&key).cloned();
            if old != new {
                changed += 1;
                notify_change(&self.sender, &key, old, new, None);
            }
        }

        if changed > 0 {
            log::debug!("Storage changed externally: {} keys", changed);
            *entries = on_disk;
        }
        Ok(changed)
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.shared.entries.read().unwrap_or_else(|p| p.into_inner());
        Ok(entries.get(key).cloned())
    }

    /// Merges one key into what is on disk now, so keys written by other
    /// processes since the last reload are kept. Those keys reach memory
    /// through the next reload.
    fn set(&self, key: &str, value: &str, origin: ViewId) -> Result<()> {
        let old = {
            let mut entries = self.shared.entries.write().unwrap_or_else(|p| p.into_inner());
            let mut on_disk = FileStore::read_file(&self.shared.path)?;
            on_disk.insert(key.to_string(), value.to_string());
            self.shared.write_file(&on_disk)?;
            entries.insert(key.to_string(), value.to_string())
        };
        notify_change(
            &self.shared.sender,
            key,
            old,
            Some(value.to_string()),
            Some(origin),
        );
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.shared.sender.subscribe()
    }
}
