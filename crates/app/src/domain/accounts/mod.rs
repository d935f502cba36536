//! Accounts

pub mod errors;
pub mod service;

pub use errors::AccountsServiceError;
pub use service::*;
