//! String key-value stores backing everything the user saves.
//!
//! Values are strings, as in browser storage. Durable data (annotations,
//! user breweries, hidden breweries) and session data (filters, expanded
//! breweries) each get their own store.

use crate::{BeerNoterError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, warn};

pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// One file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`; the directory is created on first write
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(BeerNoterError::Storage(format!("invalid key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(&path, value)?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote store key");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory store; clones share the same contents
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write, like a full or disabled browser storage
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.unavailable {
            return Err(BeerNoterError::Storage("storage is unavailable".to_string()));
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.unavailable {
            return Err(BeerNoterError::Storage("storage is unavailable".to_string()));
        }
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

/// Load a JSON value, falling back to the default when missing or malformed
pub fn load_json<T: DeserializeOwned + Default>(store: &dyn KeyValueStore, key: &str) -> T {
    let content = match store.get(key) {
        Ok(Some(content)) => content,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored data, starting empty");
            return T::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "Ignoring malformed stored data");
            T::default()
        }
    }
}

/// Persist a JSON value; failures are logged and reported as `false`
pub fn persist_json<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, value: &T) -> bool {
    let written = serde_json::to_string(value)
        .map_err(BeerNoterError::from)
        .and_then(|content| store.set(key, &content));

    match written {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "Failed to persist data, keeping changes for this session only");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("data"));

        assert_eq!(store.get("userBeerData").unwrap(), None);
        store.set("userBeerData", "{}").unwrap();
        assert_eq!(store.get("userBeerData").unwrap(), Some("{}".to_string()));

        store.remove("userBeerData").unwrap();
        assert_eq!(store.get("userBeerData").unwrap(), None);
        store.remove("userBeerData").unwrap();
    }

    #[test]
    fn test_file_store_rejects_path_keys() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path());

        assert!(store.set("../escape", "x").is_err());
        assert!(store.get("").is_err());
    }

    #[test]
    fn test_memory_store_clones_share_contents() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer.set("key", "value").unwrap();

        assert_eq!(store.get("key").unwrap(), Some("value".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_json_defaults_on_malformed() {
        let mut store = MemoryStore::new();
        store.set("broken", "{not json").unwrap();

        let loaded: BTreeMap<String, bool> = load_json(&store, "broken");
        assert!(loaded.is_empty());

        let missing: Vec<u64> = load_json(&store, "missing");
        assert!(missing.is_empty());
    }

    #[test]
    fn test_persist_json_reports_failure() {
        let mut store = MemoryStore::unavailable();
        assert!(!persist_json(&mut store, "key", &vec![1, 2, 3]));
        assert!(store.is_empty());

        let mut store = MemoryStore::new();
        assert!(persist_json(&mut store, "key", &vec![1, 2, 3]));
        assert_eq!(store.get("key").unwrap(), Some("[1,2,3]".to_string()));
    }
}
