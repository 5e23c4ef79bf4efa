//! EventHub Domain - value objects and invariants for the wishlist core.
//!
//! Pure types only: no networking, no async, no storage.

pub mod credential;
pub mod error;
pub mod ids;
pub mod wishlist;

pub use credential::Credential;
pub use error::DomainError;
pub use ids::EventId;
pub use wishlist::Wishlist;
