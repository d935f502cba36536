//! Money arithmetic in unsigned minor units.
//!
//! Every money-like amount in this crate (prices, balances, totals,
//! revenue) is a `u64` count of minor units. Arithmetic is checked:
//! overflow is an error, never a wrap.

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use thiserror::Error;

/// Errors from money arithmetic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// A checked addition or multiplication overflowed `u64`.
    #[error("money arithmetic overflowed")]
    Overflow,

    /// A percentage calculation could not be safely represented.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,
}

/// Calculate `percent`% of a minor-unit amount, rounding midpoint away
/// from zero.
///
/// # Errors
///
/// Returns [`MoneyError::PercentConversion`] when the intermediate decimal
/// value overflows or cannot be converted back to `u64`.
pub fn percent_of_minor(percent: u8, minor: u64) -> Result<u64, MoneyError> {
    let minor = Decimal::from_u64(minor).ok_or(MoneyError::PercentConversion)?;
    let fraction = Decimal::from(percent)
        .checked_div(Decimal::ONE_HUNDRED)
        .ok_or(MoneyError::PercentConversion)?;

    fraction
        .checked_mul(minor)
        .ok_or(MoneyError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or(MoneyError::PercentConversion)
}

/// A single line's worth: unit price times quantity.
///
/// # Errors
///
/// Returns [`MoneyError::Overflow`] when the multiplication overflows.
pub fn line_total(unit_price: u64, quantity: u32) -> Result<u64, MoneyError> {
    unit_price
        .checked_mul(u64::from(quantity))
        .ok_or(MoneyError::Overflow)
}

/// Sum an iterator of minor-unit amounts.
///
/// # Errors
///
/// Returns [`MoneyError::Overflow`] when the running sum overflows.
pub fn sum_minor<I: IntoIterator<Item = u64>>(amounts: I) -> Result<u64, MoneyError> {
    amounts
        .into_iter()
        .try_fold(0_u64, |acc, amount| acc.checked_add(amount))
        .ok_or(MoneyError::Overflow)
}
