//! Durable key-value storage for the client session
//!
//! The client persists exactly one value, the session token, under a fixed
//! key. Storage is injectable so tests can run against memory while the
//! command-line front end persists to a JSON file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};

/// Key under which the session token is persisted
pub const TOKEN_KEY: &str = "token";

/// Key-value storage backing the session store
pub trait TokenStorage: Send + Sync {
    /// Get a value by key
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Set a key-value pair, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove a key; removing a missing key is not an error
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Process-local storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let entries = self.entries.read().map_err(|_| StorageError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let mut entries = self.entries.write().map_err(|_| StorageError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// Storage persisted as a JSON object on disk
///
/// A missing file reads as empty. Every write rewrites the whole document
/// through a sibling temporary file, and a document that no longer parses is
/// overwritten by the next write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: RwLock<()>,
}

impl FileStorage {
    /// Create a storage backed by `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> StorageResult<HashMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(HashMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load the document for a rewrite; a corrupt document counts as empty
    fn load_for_write(&self) -> StorageResult<HashMap<String, String>> {
        match self.load() {
            Err(StorageError::Serialization(e)) => {
                warn!("Discarding corrupt storage file {}: {}", self.path.display(), e);
                Ok(HashMap::new())
            }
            other => other,
        }
    }

    fn store(&self, entries: &HashMap<String, String>) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);
        fs::write(&staging, serde_json::to_string_pretty(entries)?)?;
        fs::rename(&staging, &self.path)?;
        debug!("Wrote {} storage entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl TokenStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.lock.read().map_err(|_| StorageError::Poisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.lock.write().map_err(|_| StorageError::Poisoned)?;
        let mut entries = self.load_for_write()?;
        entries.insert(key.to_string(), value.to_string());
        self.store(&entries)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let _guard = self.lock.write().map_err(|_| StorageError::Poisoned)?;
        match self.load() {
            Ok(mut entries) => {
                if entries.remove(key).is_some() {
                    self.store(&entries)?;
                }
            }
            Err(StorageError::Serialization(e)) => {
                warn!("Discarding corrupt storage file {}: {}", self.path.display(), e);
                self.store(&HashMap::new())?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}
