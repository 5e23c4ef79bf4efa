//! Test doubles for the storage and notifier ports

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use eventhub_domain::EventId;

use crate::ports::outbound::{NotifierPort, StorageError, StorageProvider, UserNotice};

/// Storage provider kept entirely in memory.
#[derive(Clone, Default)]
pub struct MemoryStorageProvider {
    data: Arc<RwLock<HashMap<String, String>>>,
}

impl StorageProvider for MemoryStorageProvider {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Option<String> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.data
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}

/// Notifier that records every notice it receives.
#[derive(Default)]
pub struct CollectingNotifier {
    notices: Mutex<Vec<UserNotice>>,
}

impl CollectingNotifier {
    pub fn notices(&self) -> Vec<UserNotice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotifierPort for CollectingNotifier {
    fn notify(&self, notice: UserNotice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

/// Shorthand for numeric event ids.
pub fn event_ids(ids: &[u64]) -> Vec<EventId> {
    ids.iter().copied().map(EventId::from).collect()
}
