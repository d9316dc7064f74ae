//! Product Fixtures

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    catalog::Catalog,
    fixtures::FixtureError,
    money::parse_money,
    products::{
        DigitalProduct, ExpirableProduct, ExpirableShippableProduct, ProductKey, RegularProduct,
        ShippableProduct,
    },
    weight::Weight,
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Map of product key -> product fixture
    pub products: FxHashMap<String, ProductFixture>,
}

/// Which capabilities a fixture product has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Neither expires nor ships
    Digital,
    /// Sold in store, neither expires nor ships
    Regular,
    /// Ships, doesn't expire
    Shippable,
    /// Expires, doesn't ship
    Expirable,
    /// Expires and ships
    ExpirableShippable,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Product variant
    pub kind: ProductKind,

    /// Unit price (e.g., "100 EGP")
    pub price: String,

    /// Units in stock
    pub quantity: u32,

    /// Unit weight for shippable kinds (e.g., "0.4 kg")
    #[serde(default)]
    pub weight: Option<String>,

    /// Starting expiry state for expirable kinds
    #[serde(default)]
    pub expired: bool,
}

impl ProductFixture {
    /// Build the product and add it to `catalog`.
    ///
    /// # Errors
    ///
    /// Returns an error if the price or weight can't be parsed, or a shippable
    /// kind has no weight.
    pub fn insert_into(self, catalog: &mut Catalog) -> Result<ProductKey, FixtureError> {
        let price = parse_money(&self.price)?;

        let key = match self.kind {
            ProductKind::Digital => {
                catalog.insert(DigitalProduct::new(self.name, price, self.quantity)?)
            }
            ProductKind::Regular => {
                catalog.insert(RegularProduct::new(self.name, price, self.quantity)?)
            }
            ProductKind::Shippable => {
                let weight = self.weight()?;

                catalog.insert(ShippableProduct::new(self.name, price, self.quantity, weight)?)
            }
            ProductKind::Expirable => catalog.insert(ExpirableProduct::new(
                self.name,
                price,
                self.quantity,
                self.expired,
            )?),
            ProductKind::ExpirableShippable => {
                let weight = self.weight()?;

                catalog.insert(ExpirableShippableProduct::new(
                    self.name,
                    price,
                    self.quantity,
                    self.expired,
                    weight,
                )?)
            }
        };

        Ok(key)
    }

    fn weight(&self) -> Result<Weight, FixtureError> {
        let weight = self
            .weight
            .as_deref()
            .ok_or_else(|| FixtureError::MissingWeight(self.name.clone()))?;

        parse_weight(weight)
    }
}

/// Parse a weight string (e.g., "0.4 kg" or "0.4kg") into a [`Weight`].
///
/// # Errors
///
/// Returns [`FixtureError::InvalidWeight`] if the string isn't a kilogram
/// amount, or [`FixtureError::Weight`] if the amount isn't positive.
pub fn parse_weight(s: &str) -> Result<Weight, FixtureError> {
    let kilograms = s
        .trim()
        .strip_suffix("kg")
        .ok_or_else(|| FixtureError::InvalidWeight(s.to_string()))?
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidWeight(s.to_string()))?;

    Ok(Weight::from_kilograms(kilograms)?)
}
