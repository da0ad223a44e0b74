//! String key-value backends.
//!
//! The support repository only needs three named string records, so the
//! backing store is reduced to `get`/`set`/`remove` on strings.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use supportbot_core::SupportError;

use super::atomic_file::{AtomicFile, AtomicFileError};

/// Errors that can occur in a key-value backend.
#[derive(Debug)]
pub enum StoreError {
    /// The key cannot be mapped to a record.
    InvalidKey(String),
    /// The backing file could not be read, written or locked.
    File(AtomicFileError),
    /// The backend refused the write.
    WriteRejected(String),
    /// An internal lock was poisoned.
    Poisoned,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::InvalidKey(key) => write!(f, "Invalid store key '{}'", key),
            StoreError::File(e) => write!(f, "{}", e),
            StoreError::WriteRejected(e) => write!(f, "Write rejected: {}", e),
            StoreError::Poisoned => write!(f, "Store lock poisoned"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<AtomicFileError> for StoreError {
    fn from(e: AtomicFileError) -> Self {
        StoreError::File(e)
    }
}

impl From<StoreError> for SupportError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidKey(_) | StoreError::Poisoned => SupportError::internal(e.to_string()),
            _ => SupportError::io(e.to_string()),
        }
    }
}

/// A durable string store addressed by key.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value for `key`, or `None` if it was never set.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Stores each key as `<dir>/<key>.json`.
///
/// Keys are limited to ASCII letters, digits, `_` and `-`.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_for(&self, key: &str) -> Result<AtomicFile, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(AtomicFile::new(self.dir.join(format!("{}.json", key))))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.file_for(key)?.read()?)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.file_for(key)?.write(value)?;
        tracing::trace!("[Store] Wrote '{}' ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.file_for(key)?.remove()?;
        tracing::trace!("[Store] Removed '{}'", key);
        Ok(())
    }
}

/// A process-local store.
///
/// Writes can be switched off to simulate a full or read-only backend.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
    reject_writes: AtomicBool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set` and `remove` fail.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.reject_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteRejected("quota exceeded".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}
