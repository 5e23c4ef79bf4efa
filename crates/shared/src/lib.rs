//! EventHub Shared - wire types for the remote wishlist API
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, serde_json and the domain ids
//! 2. **No business logic** - Pure data types and serialization
//! 3. **Lenient decoding** - unknown fields are ignored so backend additions
//!    never break the client

pub mod wishlist;

pub use wishlist::{
    EventRefDto, StatusResponse, WishlistItemDto, WishlistListResponse, SUCCESS_STATUS_CODE,
};
