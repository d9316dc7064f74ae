//! Shipping

use std::{io, iter};

use smallvec::SmallVec;
use thiserror::Error;

use crate::{products::Product, weight::Weight};

pub mod notice;

pub use notice::ShipmentNotice;

/// Errors a carrier can raise while dispatching.
#[derive(Debug, Error)]
pub enum ShippingError {
    /// Failed to write shipping output.
    #[error("failed to write shipment: {0}")]
    Io(#[from] io::Error),

    /// The carrier refused the shipment.
    #[error("shipment rejected: {0}")]
    Rejected(String),
}

/// One physical unit to ship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippableItem {
    name: String,
    weight: Weight,
}

impl ShippableItem {
    /// Create a new shippable item.
    pub fn new(name: impl Into<String>, weight: Weight) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    /// Project a product into a shippable item, if it can be shipped.
    pub fn from_product(product: &dyn Product) -> Option<Self> {
        product
            .as_shippable()
            .map(|shippable| Self::new(product.name(), shippable.weight()))
    }

    /// Item name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Weight of the unit
    pub fn weight(&self) -> Weight {
        self.weight
    }
}

/// Shippable items, one per physical unit.
pub type ShippableItems = SmallVec<[ShippableItem; 10]>;

/// Expand `quantity` units of `product` into individual shippable items.
///
/// Returns nothing for products without the [`Shippable`](crate::products::Shippable)
/// capability.
pub fn expand(product: &dyn Product, quantity: u32) -> impl Iterator<Item = ShippableItem> {
    ShippableItem::from_product(product)
        .into_iter()
        .flat_map(move |item| iter::repeat_n(item, quantity as usize))
}

/// A carrier that receives physical units for dispatch.
pub trait ShippingService {
    /// Dispatch the given items.
    ///
    /// `items` has one element per physical unit. An empty slice must be
    /// treated as a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`ShippingError`] if the carrier could not accept the shipment.
    fn ship_items(&mut self, items: &[ShippableItem]) -> Result<(), ShippingError>;
}

impl<S: ShippingService + ?Sized> ShippingService for &mut S {
    fn ship_items(&mut self, items: &[ShippableItem]) -> Result<(), ShippingError> {
        (**self).ship_items(items)
    }
}

impl<S: ShippingService + ?Sized> ShippingService for Box<S> {
    fn ship_items(&mut self, items: &[ShippableItem]) -> Result<(), ShippingError> {
        (**self).ship_items(items)
    }
}
