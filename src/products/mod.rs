//! Products
//!
//! Every product embeds a [`Listing`] (name, price, available quantity) and
//! opts in to optional capabilities by implementing [`Expirable`] and/or
//! [`Shippable`] and exposing them through the `as_*` accessors on
//! [`Product`]. Callers query capabilities through those accessors and never
//! inspect the concrete variant.

use std::fmt;

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;
use thiserror::Error;

use crate::weight::{Weight, WeightError};

pub mod variants;

pub use variants::{
    DigitalProduct, ExpirableProduct, ExpirableShippableProduct, RegularProduct, ShippableProduct,
};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Errors raised by product construction and stock changes.
#[derive(Debug, Error, PartialEq)]
pub enum ProductError {
    /// Attempted to remove more units than are available.
    #[error("cannot reduce quantity by {requested}, only {available} available")]
    InvalidQuantity {
        /// Units requested
        requested: u32,
        /// Units available
        available: u32,
    },

    /// Product prices can't be negative.
    #[error("price of {0} must not be negative")]
    NegativePrice(String),

    /// Invalid shipping weight.
    #[error(transparent)]
    Weight(#[from] WeightError),
}

/// The name, price and stock level shared by every product variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    name: String,
    price: Money<'static, Currency>,
    quantity: u32,
}

impl Listing {
    /// Create a new listing.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::NegativePrice`] if `price` is below zero.
    pub fn new(
        name: impl Into<String>,
        price: Money<'static, Currency>,
        quantity: u32,
    ) -> Result<Self, ProductError> {
        let name = name.into();

        if price.is_negative() {
            return Err(ProductError::NegativePrice(name));
        }

        Ok(Listing {
            name,
            price,
            quantity,
        })
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price
    pub fn price(&self) -> Money<'static, Currency> {
        self.price
    }

    /// Units currently available
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Remove `amount` units from stock.
    ///
    /// Either the full amount is removed or nothing is.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::InvalidQuantity`] if `amount` exceeds the available quantity.
    pub fn reduce(&mut self, amount: u32) -> Result<(), ProductError> {
        self.quantity = self
            .quantity
            .checked_sub(amount)
            .ok_or(ProductError::InvalidQuantity {
                requested: amount,
                available: self.quantity,
            })?;

        Ok(())
    }
}

/// Capability: the product can go off and become unsellable.
pub trait Expirable {
    /// Whether the product has expired.
    fn is_expired(&self) -> bool;

    /// Update the expiry state.
    fn set_expired(&mut self, expired: bool);
}

/// Capability: the product is physically shipped and has a weight.
pub trait Shippable {
    /// Weight of a single unit.
    fn weight(&self) -> Weight;
}

/// A sellable product.
///
/// Implementors only provide access to their [`Listing`]; everything else has
/// a default. Variants with optional capabilities override the `as_*`
/// accessors.
pub trait Product: fmt::Debug {
    /// The listing backing this product.
    fn listing(&self) -> &Listing;

    /// The listing backing this product, mutably.
    fn listing_mut(&mut self) -> &mut Listing;

    /// Product name
    fn name(&self) -> &str {
        self.listing().name()
    }

    /// Unit price
    fn price(&self) -> Money<'static, Currency> {
        self.listing().price()
    }

    /// Units currently available
    fn quantity(&self) -> u32 {
        self.listing().quantity()
    }

    /// Remove `amount` units from stock, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::InvalidQuantity`] if `amount` exceeds the available quantity.
    fn reduce_quantity(&mut self, amount: u32) -> Result<(), ProductError> {
        self.listing_mut().reduce(amount)
    }

    /// The expiry capability, if this product has one.
    fn as_expirable(&self) -> Option<&dyn Expirable> {
        None
    }

    /// The expiry capability, mutably, if this product has one.
    fn as_expirable_mut(&mut self) -> Option<&mut dyn Expirable> {
        None
    }

    /// The shipping capability, if this product has one.
    fn as_shippable(&self) -> Option<&dyn Shippable> {
        None
    }

    /// True only for expirable products that have expired.
    fn has_expired(&self) -> bool {
        self.as_expirable()
            .is_some_and(|expirable| expirable.is_expired())
    }
}
