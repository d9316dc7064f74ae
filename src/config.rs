//! Checkout configuration
//!
//! ```yaml
//! currency: EGP
//! shipping_rate_per_kg: "10 EGP"
//! ```

use std::{fs, path::Path};

use rusty_money::{Money, iso::Currency};
use serde::Deserialize;
use thiserror::Error;

use crate::{
    money::{MoneyParseError, parse_currency, parse_money},
    pricing::ShippingRate,
};

/// Default shipping charge, in whole currency units per kilogram.
pub const DEFAULT_SHIPPING_RATE_PER_KG: i64 = 10;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid currency or price
    #[error(transparent)]
    Money(#[from] MoneyParseError),

    /// The shipping rate is in a different currency to the store.
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Negative shipping rate
    #[error("Shipping rate must not be negative: {0}")]
    NegativeShippingRate(String),
}

/// Settings as written in the YAML file.
#[derive(Debug, Deserialize)]
struct CheckoutSettings {
    currency: String,
    shipping_rate_per_kg: Option<String>,
}

/// Checkout configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckoutConfig {
    currency: &'static Currency,
    shipping_rate: ShippingRate,
}

impl CheckoutConfig {
    /// Create a configuration with the default shipping rate.
    pub fn new(currency: &'static Currency) -> Self {
        let per_kg = Money::from_minor(
            DEFAULT_SHIPPING_RATE_PER_KG * 10_i64.pow(currency.exponent),
            currency,
        );

        Self {
            currency,
            shipping_rate: ShippingRate::per_kg(per_kg),
        }
    }

    /// Replace the shipping rate.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::CurrencyMismatch`]: the rate isn't in the configured currency.
    /// - [`ConfigError::NegativeShippingRate`]: the rate is below zero.
    pub fn with_shipping_rate(mut self, rate: ShippingRate) -> Result<Self, ConfigError> {
        if rate.currency() != self.currency {
            return Err(ConfigError::CurrencyMismatch(
                self.currency.iso_alpha_code.to_string(),
                rate.currency().iso_alpha_code.to_string(),
            ));
        }

        if rate.amount().is_negative() {
            return Err(ConfigError::NegativeShippingRate(rate.amount().to_string()));
        }

        self.shipping_rate = rate;

        Ok(self)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is invalid, or the currency or rate can't be parsed.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let settings: CheckoutSettings = serde_norway::from_str(contents)?;
        let config = Self::new(parse_currency(&settings.currency)?);

        match settings.shipping_rate_per_kg {
            Some(rate) => config.with_shipping_rate(ShippingRate::per_kg(parse_money(&rate)?)),
            None => Ok(config),
        }
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }

    /// Store currency
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Shipping rate per kilogram
    pub fn shipping_rate(&self) -> &ShippingRate {
        &self.shipping_rate
    }
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self::new(rusty_money::iso::EGP)
    }
}
