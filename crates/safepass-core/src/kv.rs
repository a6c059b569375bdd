//! Key/value local storage contract.
//!
//! SafePass persists three values locally: the obfuscated credential blob,
//! the passcode encoding, and the theme flag. The store is deliberately a
//! flat string map with no schema versioning; a format change is a breaking
//! change with no migration path.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::{Error, Result};

/// Storage key for the obfuscated credential blob.
pub const CREDENTIALS_KEY: &str = "safepass_passwords";
/// Storage key for the passcode encoding.
pub const PASSCODE_KEY: &str = "safepass_auth";
/// Storage key for the dark theme flag.
pub const THEME_KEY: &str = "safepass_dark";

/// Contract for the local key/value store.
pub trait KeyValueStore {
    /// Fetch a value, `None` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store a value under a key, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a key. Removing an absent key is a no-op.
    fn remove(&self, key: &str) -> Result<()>;
}

/// File-backed store holding the whole map as one JSON document.
///
/// Every mutation rewrites the file; concurrent writers are last-writer-wins.
pub struct FileKeyValueStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Create a store backed by the given file path. The file and its parent
    /// directories are created lazily on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, serialized)?;
        Ok(())
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryKeyValueStore {
    map: Mutex<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let guard = self
            .map
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self
            .map
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut guard = self
            .map
            .lock()
            .map_err(|error| Error::Storage(error.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}
