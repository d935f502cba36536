//! Credits service errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreditsServiceError {
    #[error("user not found")]
    UnknownUser,
}
