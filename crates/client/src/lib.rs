//! EventHub wishlist client.
//!
//! A client-side cache of the signed-in user's favorited events, kept in
//! sync with the remote wishlist API. The crate is split the usual way:
//! `ports` holds the trait boundaries, `application` the `WishlistStore`
//! and its errors/config, `infrastructure` the HTTP, storage and session
//! adapters.

pub mod application;
pub mod infrastructure;
pub mod ports;

// Re-export commonly used entrypoints
pub use application::services::{InitOutcome, WishlistSnapshot, WishlistStore};
pub use application::{ClientConfig, WishlistError};
