//! Reelcart
//!
//! Domain core for a short-video commerce platform: the entities, money
//! arithmetic and authoritative status state machines behind the video
//! moderation, order and withdrawal ledgers. This crate is pure — no I/O,
//! no async, no global state.

pub mod carts;
pub mod config;
pub mod credits;
pub mod fixtures;
pub mod ids;
pub mod money;
pub mod orders;
pub mod products;
pub mod users;
pub mod videos;
pub mod withdrawals;
