//! Platform

pub mod errors;
pub mod service;

pub use errors::PlatformServiceError;
pub use service::*;
