//! Orders service errors.

use reelcart::{
    money::MoneyError,
    orders::{InvalidOrderTransition, OrderError},
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrdersServiceError {
    #[error("order not found")]
    NotFound,

    #[error("the cart holds nothing from this seller")]
    NothingToCheckout,

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Transition(#[from] InvalidOrderTransition),

    #[error(transparent)]
    Money(#[from] MoneyError),
}
