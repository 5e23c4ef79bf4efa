//! Session Port - ambient credential lookup
//!
//! Acquisition, refresh and expiry of tokens belong to the authentication
//! subsystem. The wishlist store only asks "is there a credential right now?"
//! at the start of each operation.

use eventhub_domain::Credential;

#[cfg_attr(test, mockall::automock)]
pub trait SessionPort: Send + Sync {
    fn credential(&self) -> Option<Credential>;
}
