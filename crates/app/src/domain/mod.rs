//! Reelcart Domain Concerns

pub mod accounts;
pub mod carts;
pub mod credits;
pub mod orders;
pub mod platform;
pub mod videos;
pub mod withdrawals;
