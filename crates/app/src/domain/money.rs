//! Money. Amounts are stored and exchanged as euro cents; sums and tax go
//! through `rusty_money` so an amount that does not fit is an error.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{
    Money, MoneyError,
    iso::{self, Currency},
};
use thiserror::Error;

/// VAT applied to every cart and order, in percent.
pub const TAX_RATE_PERCENT: i64 = 20;

/// An amount in euros.
pub type Euros = Money<'static, Currency>;

#[derive(Debug, Error, PartialEq)]
pub enum AmountError {
    #[error("amount does not fit in cents")]
    Overflow,

    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Lift `cents` into euros.
///
/// # Errors
///
/// Fails when `cents` exceeds what a signed minor-unit amount can hold.
pub fn euros(cents: u64) -> Result<Euros, AmountError> {
    let minor = i64::try_from(cents).map_err(|_too_large| AmountError::Overflow)?;

    Ok(Money::from_minor(minor, iso::EUR))
}

/// Back to cents, rounding half away from zero.
///
/// # Errors
///
/// Fails when the amount is negative or larger than `u64` cents.
pub fn cents(amount: &Euros) -> Result<u64, AmountError> {
    amount
        .amount()
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|minor| minor.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|minor| minor.to_u64())
        .ok_or(AmountError::Overflow)
}

/// The VAT rate as a fraction.
#[must_use]
pub fn tax_rate() -> Percentage {
    Percentage::from(Decimal::new(TAX_RATE_PERCENT, 2))
}

/// Tax owed on `amount`, rounded half-up to the nearest cent.
#[must_use]
pub fn tax_on(amount: &Euros) -> Euros {
    let tax = (tax_rate() * *amount.amount())
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    Money::from_decimal(tax, iso::EUR)
}

/// Sum of `amounts`, starting from zero euros.
///
/// # Errors
///
/// Fails when any amount or the sum does not fit.
pub fn sum(amounts: impl IntoIterator<Item = u64>) -> Result<Euros, AmountError> {
    amounts
        .into_iter()
        .try_fold(Money::from_minor(0, iso::EUR), |total, amount| {
            Ok(total.add(euros(amount)?)?)
        })
}

/// `amount` cents plus tax, in cents.
///
/// # Errors
///
/// Fails when the taxed amount no longer fits in cents.
pub fn with_tax(amount: u64) -> Result<u64, AmountError> {
    let amount = euros(amount)?;

    cents(&amount.add(tax_on(&amount))?)
}

/// Price of `quantity` units at `unit_price`.
///
/// # Errors
///
/// Fails when the product overflows.
pub fn line_total(unit_price: u64, quantity: u32) -> Result<u64, AmountError> {
    unit_price
        .checked_mul(u64::from(quantity))
        .ok_or(AmountError::Overflow)
}

/// Render cents as a decimal string, e.g. `250` becomes `2.50`.
#[must_use]
pub fn format_amount(amount: u64) -> String {
    Decimal::from_i128_with_scale(i128::from(amount), 2).to_string()
}
