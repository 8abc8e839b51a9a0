//! Device-local key-value storage backing the session flag.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tracing::debug;

/// Persistent key-value store scoped to this device.
///
/// Keys map to string values; a missing key reads as `None`. `set` is
/// called by the code that handles a successful login response, never by
/// `SessionClient` itself.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed store keeping one file per key under a data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create store directory: {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl SessionStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read store entry: {}", key))?;
        Ok(Some(contents))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.entry_path(key);
        std::fs::write(&path, value)
            .with_context(|| format!("Failed to write store entry: {}", key))?;
        debug!(key, "Store entry written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.entry_path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove store entry: {}", key))?;
            debug!(key, "Store entry removed");
        }
        Ok(())
    }
}

/// In-memory store backed by a mutex-protected map.
///
/// Used by tests and by callers that don't want the flag to outlive the
/// process.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().to_path_buf()).expect("store");

        assert_eq!(store.get("session").unwrap(), None);
        store.set("session", "82d9ab4c").unwrap();
        assert_eq!(store.get("session").unwrap().as_deref(), Some("82d9ab4c"));
        store.remove("session").unwrap();
        assert_eq!(store.get("session").unwrap(), None);
    }

    #[test]
    fn test_file_store_remove_absent_key_is_noop() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().to_path_buf()).expect("store");

        store.remove("session").unwrap();
        store.remove("session").unwrap();
        assert_eq!(store.get("session").unwrap(), None);
    }

    #[test]
    fn test_file_store_overwrites_existing_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::new(dir.path().to_path_buf()).expect("store");

        store.set("session", "first").unwrap();
        store.set("session", "second").unwrap();
        assert_eq!(store.get("session").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();

        assert_eq!(store.get("session").unwrap(), None);
        store.set("session", "value").unwrap();
        assert_eq!(store.get("session").unwrap().as_deref(), Some("value"));
        store.remove("session").unwrap();
        store.remove("session").unwrap();
        assert_eq!(store.get("session").unwrap(), None);
    }
}
