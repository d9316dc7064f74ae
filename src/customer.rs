//! Customers

use rust_decimal::Decimal;
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors raised by balance changes.
#[derive(Debug, Error, PartialEq)]
pub enum CustomerError {
    /// Balance is lower than the amount to deduct.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Amount requested
        required: Money<'static, Currency>,
        /// Balance at the time of the request
        available: Money<'static, Currency>,
    },

    /// Opening balances can't be negative.
    #[error("balance for {0} must not be negative")]
    NegativeBalance(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A customer with a spendable balance.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    name: String,
    balance: Money<'static, Currency>,
}

impl Customer {
    /// Create a new customer with an opening balance.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::NegativeBalance`] if `balance` is below zero.
    pub fn new(
        name: impl Into<String>,
        balance: Money<'static, Currency>,
    ) -> Result<Self, CustomerError> {
        let name = name.into();

        if balance.is_negative() {
            return Err(CustomerError::NegativeBalance(name));
        }

        Ok(Self { name, balance })
    }

    /// Customer name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current balance
    pub fn balance(&self) -> Money<'static, Currency> {
        self.balance
    }

    /// Whether the balance covers `amount`, compared exactly.
    ///
    /// # Errors
    ///
    /// Returns [`CustomerError::Money`] if `amount` is in a different currency.
    pub fn can_afford(&self, amount: Money<'static, Currency>) -> Result<bool, CustomerError> {
        Ok(*self.balance.sub(amount)?.amount() >= Decimal::ZERO)
    }

    /// Debit `amount` from the balance.
    ///
    /// # Errors
    ///
    /// - [`CustomerError::InsufficientFunds`]: `amount` exceeds the balance.
    /// - [`CustomerError::Money`]: `amount` is in a different currency.
    pub fn deduct_balance(&mut self, amount: Money<'static, Currency>) -> Result<(), CustomerError> {
        let remaining = self.balance.sub(amount)?;

        if *remaining.amount() < Decimal::ZERO {
            return Err(CustomerError::InsufficientFunds {
                required: amount,
                available: self.balance,
            });
        }

        self.balance = remaining;

        Ok(())
    }
}
