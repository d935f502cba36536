//! Accounts service errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountsServiceError {
    #[error("an account with this email already exists")]
    AlreadyExists,

    #[error("incorrect email or password")]
    InvalidCredentials,

    #[error("this account is banned")]
    Banned,

    #[error("user not found")]
    NotFound,

    #[error("no user is signed in")]
    NoSession,
}
