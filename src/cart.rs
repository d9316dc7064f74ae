//! Cart

use smallvec::SmallVec;
use thiserror::Error;

use crate::{catalog::Catalog, products::ProductKey};

/// Errors raised while adding to a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// The product isn't in the catalog.
    #[error("product {0:?} not found in catalog")]
    ProductNotFound(ProductKey),

    /// Quantities must be positive.
    #[error("cannot add zero units of {0}")]
    ZeroQuantity(String),

    /// The requested quantity exceeds what is in stock.
    #[error("not enough {name} in stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Product name
        name: String,
        /// Units requested in this call
        requested: u32,
        /// Units in stock
        available: u32,
    },

    /// The product has expired.
    #[error("{0} is expired")]
    ExpiredProduct(String),
}

/// A single cart entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    /// Product in the catalog
    pub product: ProductKey,

    /// Units requested
    pub quantity: u32,
}

/// Owned snapshot of cart entries.
pub type CartItems = SmallVec<[CartLine; 8]>;

/// Cart
///
/// Holds one entry per distinct product in first-added order.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: CartItems,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units of `product`, merging with any existing entry.
    ///
    /// Only this call's quantity is checked against live stock; units already
    /// in the cart are not counted. Checkout re-validates the merged total.
    ///
    /// # Errors
    ///
    /// - [`CartError::ProductNotFound`]: `product` is not in `catalog`.
    /// - [`CartError::ZeroQuantity`]: `quantity` is zero.
    /// - [`CartError::InsufficientStock`]: `quantity` exceeds the product's stock.
    /// - [`CartError::ExpiredProduct`]: the product is expirable and expired.
    pub fn add(
        &mut self,
        catalog: &Catalog,
        product: ProductKey,
        quantity: u32,
    ) -> Result<(), CartError> {
        let item = catalog
            .get(product)
            .ok_or(CartError::ProductNotFound(product))?;

        if quantity == 0 {
            return Err(CartError::ZeroQuantity(item.name().to_string()));
        }

        if quantity > item.quantity() {
            return Err(CartError::InsufficientStock {
                name: item.name().to_string(),
                requested: quantity,
                available: item.quantity(),
            });
        }

        if item.has_expired() {
            return Err(CartError::ExpiredProduct(item.name().to_string()));
        }

        match self.lines.iter_mut().find(|line| line.product == product) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine { product, quantity }),
        }

        Ok(())
    }

    /// Snapshot of the cart entries. Changing it doesn't change the cart.
    pub fn items(&self) -> CartItems {
        self.lines.clone()
    }

    /// Units of `product` in the cart, zero if absent.
    pub fn quantity_of(&self, product: ProductKey) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product == product)
            .map_or(0, |line| line.quantity)
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
