//! Ports - trait boundaries between the wishlist store and the outside world

pub mod outbound;
