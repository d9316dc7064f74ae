//! Product Variants

use rusty_money::{Money, iso::Currency};

use crate::{
    products::{Expirable, Listing, Product, ProductError, Shippable},
    weight::Weight,
};

/// A product delivered electronically: never expires, never shipped.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitalProduct {
    listing: Listing,
}

impl DigitalProduct {
    /// Create a new digital product.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the price is negative.
    pub fn new(
        name: impl Into<String>,
        price: Money<'static, Currency>,
        quantity: u32,
    ) -> Result<Self, ProductError> {
        Ok(Self {
            listing: Listing::new(name, price, quantity)?,
        })
    }
}

impl Product for DigitalProduct {
    fn listing(&self) -> &Listing {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing {
        &mut self.listing
    }
}

/// A physical product collected in store, so it is never shipped.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularProduct {
    listing: Listing,
}

impl RegularProduct {
    /// Create a new regular product.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the price is negative.
    pub fn new(
        name: impl Into<String>,
        price: Money<'static, Currency>,
        quantity: u32,
    ) -> Result<Self, ProductError> {
        Ok(Self {
            listing: Listing::new(name, price, quantity)?,
        })
    }
}

impl Product for RegularProduct {
    fn listing(&self) -> &Listing {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing {
        &mut self.listing
    }
}

/// A physical product that is shipped to the customer.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippableProduct {
    listing: Listing,
    weight: Weight,
}

impl ShippableProduct {
    /// Create a new shippable product.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the price is negative.
    pub fn new(
        name: impl Into<String>,
        price: Money<'static, Currency>,
        quantity: u32,
        weight: Weight,
    ) -> Result<Self, ProductError> {
        Ok(Self {
            listing: Listing::new(name, price, quantity)?,
            weight,
        })
    }
}

impl Shippable for ShippableProduct {
    fn weight(&self) -> Weight {
        self.weight
    }
}

impl Product for ShippableProduct {
    fn listing(&self) -> &Listing {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing {
        &mut self.listing
    }

    fn as_shippable(&self) -> Option<&dyn Shippable> {
        Some(self)
    }
}

/// A perishable product that is collected rather than shipped.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpirableProduct {
    listing: Listing,
    expired: bool,
}

impl ExpirableProduct {
    /// Create a new expirable product.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the price is negative.
    pub fn new(
        name: impl Into<String>,
        price: Money<'static, Currency>,
        quantity: u32,
        expired: bool,
    ) -> Result<Self, ProductError> {
        Ok(Self {
            listing: Listing::new(name, price, quantity)?,
            expired,
        })
    }
}

impl Expirable for ExpirableProduct {
    fn is_expired(&self) -> bool {
        self.expired
    }

    fn set_expired(&mut self, expired: bool) {
        self.expired = expired;
    }
}

impl Product for ExpirableProduct {
    fn listing(&self) -> &Listing {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing {
        &mut self.listing
    }

    fn as_expirable(&self) -> Option<&dyn Expirable> {
        Some(self)
    }

    fn as_expirable_mut(&mut self) -> Option<&mut dyn Expirable> {
        Some(self)
    }
}

/// A perishable product that is also shipped, e.g. cheese.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpirableShippableProduct {
    listing: Listing,
    expired: bool,
    weight: Weight,
}

impl ExpirableShippableProduct {
    /// Create a new expirable, shippable product.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] if the price is negative.
    pub fn new(
        name: impl Into<String>,
        price: Money<'static, Currency>,
        quantity: u32,
        expired: bool,
        weight: Weight,
    ) -> Result<Self, ProductError> {
        Ok(Self {
            listing: Listing::new(name, price, quantity)?,
            expired,
            weight,
        })
    }
}

impl Expirable for ExpirableShippableProduct {
    fn is_expired(&self) -> bool {
        self.expired
    }

    fn set_expired(&mut self, expired: bool) {
        self.expired = expired;
    }
}

impl Shippable for ExpirableShippableProduct {
    fn weight(&self) -> Weight {
        self.weight
    }
}

impl Product for ExpirableShippableProduct {
    fn listing(&self) -> &Listing {
        &self.listing
    }

    fn listing_mut(&mut self) -> &mut Listing {
        &mut self.listing
    }

    fn as_expirable(&self) -> Option<&dyn Expirable> {
        Some(self)
    }

    fn as_expirable_mut(&mut self) -> Option<&mut dyn Expirable> {
        Some(self)
    }

    fn as_shippable(&self) -> Option<&dyn Shippable> {
        Some(self)
    }
}
