//! Key-value storage adapters.
//!
//! [`DirKeyValueStore`] persists each key as one file inside a directory
//! opened through `cap_std`, so the store can never escape its root.
//! [`MemoryKeyValueStore`] lives for the process only and
//! [`DisabledKeyValueStore`] fails every call, standing in for storage that
//! the user or the platform switched off.

use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use cap_std::{ambient_authority, fs::Dir};

use crate::domain::ports::{KeyValueStore, KeyValueStoreError};

/// Per-value size limit applied by default, matching common browser quotas.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// File-per-key store rooted in one directory.
#[derive(Debug)]
pub struct DirKeyValueStore {
    root: Dir,
    quota_bytes: usize,
}

impl DirKeyValueStore {
    /// Open (creating when needed) the directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or opened.
    pub fn open(path: &Path) -> io::Result<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let root = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self {
            root,
            quota_bytes: DEFAULT_QUOTA_BYTES,
        })
    }

    /// Replace the per-value size limit.
    #[must_use]
    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }
}

impl KeyValueStore for DirKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let file = key_file(key)?;
        match self.root.read_to_string(file) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(KeyValueStoreError::io(format!("read {key}: {error}"))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let file = key_file(key)?;
        if value.len() > self.quota_bytes {
            return Err(KeyValueStoreError::quota_exceeded(key));
        }
        self.root
            .write(file, value.as_bytes())
            .map_err(|error| KeyValueStoreError::io(format!("write {key}: {error}")))
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let file = key_file(key)?;
        match self.root.remove_file(file) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(KeyValueStoreError::io(format!("remove {key}: {error}"))),
        }
    }
}

/// Keys become file names, so they are limited to a safe alphabet.
fn key_file(key: &str) -> Result<&Path, KeyValueStoreError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if valid {
        Ok(Path::new(key))
    } else {
        Err(KeyValueStoreError::io(format!("invalid storage key {key:?}")))
    }
}

/// Process-lifetime store.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

/// Store that rejects every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledKeyValueStore;

impl KeyValueStore for DisabledKeyValueStore {
    fn get(&self, _key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Err(KeyValueStoreError::unavailable("storage is disabled"))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), KeyValueStoreError> {
        Err(KeyValueStoreError::unavailable("storage is disabled"))
    }

    fn remove(&self, _key: &str) -> Result<(), KeyValueStoreError> {
        Err(KeyValueStoreError::unavailable("storage is disabled"))
    }
}
