// Persisted key/value state (the browser-storage stand-in)

use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

use crate::error::Result;

pub trait KeyValueStore: Send + Sync {
    /// Missing keys and unreadable backing state both read as `None`.
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic elsewhere never loses the map.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

/// All keys live in a single JSON object file.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        match serde_json::from_str(&contents) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "ignoring unreadable state file: {e}");
                BTreeMap::new()
            }
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        self.read_all().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.read_all();
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut entries = self.read_all();
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn memory_store_survives_a_poisoned_lock() {
        let store = Arc::new(MemoryStore::new());
        store.set("auth.user", "{}").unwrap();

        let holder = store.clone();
        let panicked = std::thread::spawn(move || {
            let _entries = holder.entries.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
        assert!(panicked.is_err());
        assert!(store.entries.is_poisoned());

        assert_eq!(store.get("auth.user").as_deref(), Some("{}"));
        store.set("access_token", "t").unwrap();
        assert_eq!(store.get("access_token").as_deref(), Some("t"));
        store.remove("auth.user").unwrap();
        assert_eq!(store.get("auth.user"), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        FileStore::new(&path).set("auth.user", "{}").unwrap();
        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get("auth.user").as_deref(), Some("{}"));

        reopened.remove("auth.user").unwrap();
        assert_eq!(FileStore::new(&path).get("auth.user"), None);
    }

    #[test]
    fn file_store_treats_garbage_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get("access_token"), None);
        store.set("access_token", "abc").unwrap();
        assert_eq!(store.get("access_token").as_deref(), Some("abc"));
    }

    #[test]
    fn memory_store_remove_missing_key_is_noop() {
        let store = MemoryStore::new();
        store.remove("nothing").unwrap();
        assert_eq!(store.get("nothing"), None);
    }
}
