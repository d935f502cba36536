//! Platform service errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformServiceError {
    #[error("platform fee must be between 0 and 100 percent")]
    InvalidFee,
}
