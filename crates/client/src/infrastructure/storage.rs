//! JSON file storage for the CLI
//!
//! Entries live in a single `storage.json` under the platform config
//! directory (`directories::ProjectDirs` for `io.eventhub.wishlist`). A change
//! is committed to memory only after the file has been rewritten.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use directories::ProjectDirs;

use crate::ports::outbound::{StorageError, StorageProvider};

type Entries = BTreeMap<String, String>;

#[derive(Clone)]
pub struct FileStorageProvider {
    file: PathBuf,
    entries: Arc<RwLock<Entries>>,
}

impl FileStorageProvider {
    /// Open the store in the user's config directory.
    pub fn new() -> Result<Self, StorageError> {
        let dirs =
            ProjectDirs::from("io", "eventhub", "wishlist").ok_or(StorageError::NoConfigDir)?;
        Ok(Self::at_path(dirs.config_dir().join("storage.json")))
    }

    /// Open the store backed by `file`. A missing or unreadable file starts empty.
    pub fn at_path(file: impl Into<PathBuf>) -> Self {
        let file = file.into();
        let entries = read_entries(&file);
        tracing::debug!(path = %file.display(), entries = entries.len(), "Opened file storage");

        Self {
            file,
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    /// Apply `change` to a copy of the entries, write it out, then commit.
    ///
    /// The write lock is held across the file write so concurrent changes
    /// reach disk in the order they were committed.
    fn update(&self, change: impl FnOnce(&mut Entries)) -> Result<(), StorageError> {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = entries.clone();
        change(&mut next);

        if let Err(e) = write_entries(&self.file, &next) {
            tracing::error!(path = %self.file.display(), error = %e, "Failed to write storage");
            return Err(e);
        }
        *entries = next;
        Ok(())
    }
}

fn read_entries(file: &Path) -> Entries {
    let data = match fs::read_to_string(file) {
        Ok(data) => data,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Entries::new(),
        Err(e) => {
            tracing::warn!(path = %file.display(), error = %e, "Storage unreadable, starting empty");
            return Entries::new();
        }
    };
    serde_json::from_str(&data).unwrap_or_else(|e| {
        tracing::warn!(path = %file.display(), error = %e, "Storage corrupt, starting empty");
        Entries::new()
    })
}

/// Write through a sibling temp file and rename, so a crash never leaves a
/// half-written store behind.
fn write_entries(file: &Path, entries: &Entries) -> Result<(), StorageError> {
    if let Some(dir) = file.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let data = serde_json::to_vec_pretty(entries)?;
    let staging = file.with_extension("json.tmp");
    fs::write(&staging, data)?;
    fs::rename(&staging, file)?;
    Ok(())
}

impl StorageProvider for FileStorageProvider {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.load(key).is_none() {
            return Ok(());
        }
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
