//! Application services
//!
//! Services depend on port traits, not concrete infrastructure
//! implementations.

pub mod wishlist_store;

pub use wishlist_store::{InitOutcome, WishlistSnapshot, WishlistStore};
