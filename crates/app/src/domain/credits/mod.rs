//! Credits

pub mod errors;
pub mod service;

pub use errors::CreditsServiceError;
pub use service::*;
