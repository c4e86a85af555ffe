//! Driven port for origin-scoped persistent key-value storage.

use super::define_port_error;

define_port_error! {
    /// Failures raised by the storage backend.
    pub enum KeyValueStoreError {
        /// Storage is disabled or cannot be reached.
        Unavailable { message: String } =>
            "storage unavailable: {message}",
        /// Writing the value would exceed the storage quota.
        QuotaExceeded { key: String } =>
            "storage quota exceeded writing {key}",
        /// The backend failed while reading or writing.
        Io { message: String } =>
            "storage i/o failed: {message}",
    }
}

/// String key-value storage surviving page reloads.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    /// Delete `key`. Deleting a missing key succeeds.
    fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;
}
