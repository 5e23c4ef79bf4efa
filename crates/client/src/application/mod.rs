//! Application layer - Use cases and orchestration

pub mod config;
pub mod error;
pub mod services;

// Re-export common types
pub use config::ClientConfig;
pub use error::WishlistError;
