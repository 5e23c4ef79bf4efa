//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing the wishlist store to talk to the remote API, read the session
//! credential and notify the user without depending on concrete implementations.

pub mod notifier_port;
pub mod platform;
pub mod session_port;
pub mod wishlist_api_port;

pub use notifier_port::{NoticeSeverity, NotifierPort, UserNotice};
pub use platform::{storage_keys, StorageError, StorageProvider};
pub use session_port::SessionPort;
pub use wishlist_api_port::{ApiError, MutationAck, WishlistApiPort};

#[cfg(test)]
pub use notifier_port::MockNotifierPort;
#[cfg(test)]
pub use session_port::MockSessionPort;
#[cfg(test)]
pub use wishlist_api_port::MockWishlistApiPort;
