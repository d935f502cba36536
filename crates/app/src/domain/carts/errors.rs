//! Carts service errors.

use reelcart::money::MoneyError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartsServiceError {
    #[error(transparent)]
    Money(#[from] MoneyError),
}
