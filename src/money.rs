//! Money helpers

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Findable, Money, iso::Currency};
use thiserror::Error;

/// Errors parsing a money string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyParseError {
    /// Not in the `AMOUNT CURRENCY` format.
    #[error("invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown ISO currency code.
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),
}

/// Look up an ISO currency by its alpha code, e.g. `EGP`.
///
/// # Errors
///
/// Returns [`MoneyParseError::UnknownCurrency`] if the code isn't recognised.
pub fn parse_currency(code: &str) -> Result<&'static Currency, MoneyParseError> {
    Currency::find(code.trim()).ok_or_else(|| MoneyParseError::UnknownCurrency(code.to_string()))
}

/// Parse a price string (e.g. `"2.99 GBP"`).
///
/// The amount must be a whole number of the currency's minor units.
///
/// # Errors
///
/// Returns an error if the string is not in the format `AMOUNT CURRENCY`, if
/// the amount is not a decimal or is finer than the currency's minor unit,
/// or if the currency code is not recognised.
pub fn parse_money(s: &str) -> Result<Money<'static, Currency>, MoneyParseError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, code] = parts.as_slice() else {
        return Err(MoneyParseError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| MoneyParseError::InvalidPrice(s.to_string()))?;

    let currency = parse_currency(code)?;

    if amount.normalize().scale() > currency.exponent {
        return Err(MoneyParseError::InvalidPrice(format!(
            "{s} is finer than the smallest {} unit",
            currency.iso_alpha_code
        )));
    }

    let minor_units = amount
        .checked_mul(Decimal::from(10_i64.pow(currency.exponent)))
        .and_then(|value| value.to_i64())
        .ok_or_else(|| MoneyParseError::InvalidPrice(s.to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Amount in whole currency units, rounded half away from zero.
pub fn whole_units(money: &Money<'_, Currency>) -> Decimal {
    money
        .amount()
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
