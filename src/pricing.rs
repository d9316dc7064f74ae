//! Pricing
//!
//! Prices and line totals are whole minor units. The shipping fee is weight ×
//! rate kept at full decimal precision, so totals and balances may carry
//! fractions of a minor unit. Nothing is rounded until display.

use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::{shipping::ShippableItem, weight::TotalWeight};

/// Errors that can occur while calculating prices.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// A line total or fee doesn't fit in minor units.
    #[error("price calculation overflowed")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Per-kilogram shipping rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShippingRate {
    per_kg: Money<'static, Currency>,
}

impl ShippingRate {
    /// Create a new shipping rate.
    pub fn per_kg(per_kg: Money<'static, Currency>) -> Self {
        Self { per_kg }
    }

    /// Charge per kilogram.
    pub fn amount(&self) -> Money<'static, Currency> {
        self.per_kg
    }

    /// Currency the rate is charged in.
    pub fn currency(&self) -> &'static Currency {
        self.per_kg.currency()
    }
}

/// Price of `quantity` units at `price` each.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the total doesn't fit in minor units.
pub fn line_total(
    price: Money<'static, Currency>,
    quantity: u32,
) -> Result<Money<'static, Currency>, TotalPriceError> {
    let minor = price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(TotalPriceError::Overflow)?;

    Ok(Money::from_minor(minor, price.currency()))
}

/// Sum of price × quantity over a set of lines.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: a line total doesn't fit in minor units.
/// - [`TotalPriceError::Money`]: a line is priced in a different currency.
pub fn subtotal(
    lines: impl IntoIterator<Item = (Money<'static, Currency>, u32)>,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, TotalPriceError> {
    lines
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, (price, quantity)| {
            Ok(acc.add(line_total(price, quantity)?)?)
        })
}

/// Shipping fee for a set of items: total weight × per-kilogram rate, exact.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the fee doesn't fit in a [`Decimal`].
pub fn shipping_fee(
    items: &[ShippableItem],
    rate: &ShippingRate,
) -> Result<Money<'static, Currency>, TotalPriceError> {
    let TotalWeight(kilograms): TotalWeight = items.iter().map(ShippableItem::weight).sum();

    let fee = rate
        .amount()
        .amount()
        .checked_mul(kilograms)
        .ok_or(TotalPriceError::Overflow)?;

    Ok(Money::from_decimal(fee, rate.currency()))
}
