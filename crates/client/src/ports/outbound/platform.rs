//! Platform abstraction ports
//!
//! Persistent key/value storage is abstracted so session sources stay
//! testable and platform-specific file handling lives in infrastructure.

use thiserror::Error;

/// Failure to persist a storage change.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("No configuration directory available on this platform")]
    NoConfigDir,

    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage data could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Persistent storage abstraction (localStorage/file-based)
pub trait StorageProvider: Clone + Send + Sync + 'static {
    /// Save a string value with the given key
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage key constants
pub mod storage_keys {
    pub const ACCESS_TOKEN: &str = "eventhub_access_token";
}
