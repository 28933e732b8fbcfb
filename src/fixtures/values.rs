//! Fixture Values
//!
//! Parsing for the scalar values used across fixture files.

use std::fmt;

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, ILS, USD},
};
use serde::Deserialize;

use crate::{benefits::BenefitValue, fixtures::FixtureError, pricing::to_money};

/// A number as written in YAML: an integer, a float, or text such as `"10%"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FixtureNumber {
    /// Integer literal
    Integer(i64),

    /// Float literal
    Float(f64),

    /// Anything else
    Text(String),
}

impl fmt::Display for FixtureNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureNumber::Integer(value) => write!(f, "{value}"),
            FixtureNumber::Float(value) => write!(f, "{value}"),
            FixtureNumber::Text(value) => f.write_str(value.trim()),
        }
    }
}

/// Parse a non-negative decimal (e.g. `0.01`).
///
/// # Errors
///
/// Returns [`FixtureError::InvalidNumber`] if the value is not a non-negative decimal.
pub fn parse_decimal(number: &FixtureNumber) -> Result<Decimal, FixtureError> {
    let text = number.to_string();

    text.parse::<Decimal>()
        .ok()
        .filter(|value| !value.is_sign_negative())
        .ok_or(FixtureError::InvalidNumber(text))
}

/// Parse a benefit value: `"10%"` is a percentage, a plain number is a flat value.
///
/// # Errors
///
/// Returns [`FixtureError::InvalidNumber`] if the number part is not a non-negative decimal.
pub fn parse_value(number: &FixtureNumber) -> Result<BenefitValue, FixtureError> {
    let text = number.to_string();

    match text.strip_suffix('%') {
        Some(percent) => Ok(BenefitValue::percent(parse_decimal(
            &FixtureNumber::Text(percent.to_string()),
        )?)),
        None => Ok(BenefitValue::Flat(parse_decimal(number)?)),
    }
}

/// Parse a currency code (GBP, USD, EUR or ILS).
///
/// # Errors
///
/// Returns [`FixtureError::UnknownCurrency`] for any other code.
pub fn parse_currency(code: &str) -> Result<&'static Currency, FixtureError> {
    match code {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        "ILS" => Ok(ILS),
        other => Err(FixtureError::UnknownCurrency(other.to_string())),
    }
}

/// Parse a money string (e.g., "1000.00 ILS").
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount is
/// not a decimal that fits the currency's minor units, or if the currency code is unknown.
pub fn parse_money(s: &str) -> Result<Money<'static, Currency>, FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = parse_currency(code)?;

    to_money(amount, currency).map_err(|_err| FixtureError::InvalidPrice(s.to_string()))
}
