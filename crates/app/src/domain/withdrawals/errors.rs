//! Withdrawals service errors.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WithdrawalsServiceError {
    #[error("no user is signed in")]
    NoSession,

    #[error("withdrawal amount exceeds the available balance")]
    InsufficientBalance,

    #[error("withdrawal request not found")]
    NotFound,
}
