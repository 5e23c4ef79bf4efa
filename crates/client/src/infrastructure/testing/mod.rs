//! Testing utilities: a reference remote and simple port doubles.

pub mod fixtures;
pub mod in_memory_api;

pub use fixtures::{event_ids, CollectingNotifier, MemoryStorageProvider};
pub use in_memory_api::{InMemoryWishlistApi, REJECTED_STATUS_CODE};
