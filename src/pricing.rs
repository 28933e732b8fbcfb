//! Pricing
//!
//! Conversions between [`Money`] amounts and the exact [`Decimal`] values grades are computed in.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors converting between decimals and money.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The value does not fit in the currency's minor units.
    #[error("{amount} cannot be represented in {currency} minor units")]
    NotRepresentable {
        /// Value that failed to convert
        amount: Decimal,

        /// ISO code of the target currency
        currency: &'static str,
    },
}

/// Returns the money amount in major units as an exact decimal.
pub fn to_decimal(money: &Money<'_, Currency>) -> Decimal {
    Decimal::new(money.to_minor_units(), money.currency().exponent)
}

/// Converts a major-unit decimal into money, rounding to the currency's minor units.
///
/// Midpoints round away from zero.
///
/// # Errors
///
/// Returns [`PricingError::NotRepresentable`] if the rounded amount overflows `i64` minor units.
pub fn to_money(amount: Decimal, currency: &Currency) -> Result<Money<'_, Currency>, PricingError> {
    let not_representable = || PricingError::NotRepresentable {
        amount,
        currency: currency.iso_alpha_code,
    };

    let scale = 10_i64
        .checked_pow(currency.exponent)
        .map(Decimal::from)
        .ok_or_else(not_representable)?;

    let minor = amount
        .round_dp_with_strategy(currency.exponent, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(scale)
        .and_then(|minor| minor.to_i64())
        .ok_or_else(not_representable)?;

    Ok(Money::from_minor(minor, currency))
}
