//! Cart Fixtures

use serde::Deserialize;
use smallvec::SmallVec;

use crate::{
    cart::{Cart, CartError},
    catalog::Catalog,
    products::ProductKey,
};

/// Wrapper for checkout scenarios in YAML
#[derive(Debug, Deserialize)]
pub struct CartsFixture {
    /// Scenarios, run in file order
    pub checkouts: Vec<CheckoutFixture>,
}

/// One checkout: who pays and what goes in the cart.
#[derive(Debug, Deserialize)]
pub struct CheckoutFixture {
    /// Scenario name
    pub name: String,

    /// Customer key
    pub customer: String,

    /// Cart additions, in order
    pub items: Vec<CartItemFixture>,
}

/// A single cart addition.
#[derive(Debug, Deserialize)]
pub struct CartItemFixture {
    /// Product key
    pub product: String,

    /// Units to add
    pub quantity: u32,
}

/// A checkout scenario with product keys resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    name: String,
    customer: String,
    additions: SmallVec<[(ProductKey, u32); 8]>,
}

impl Scenario {
    /// Create a new scenario.
    pub fn new(
        name: impl Into<String>,
        customer: impl Into<String>,
        additions: SmallVec<[(ProductKey, u32); 8]>,
    ) -> Self {
        Self {
            name: name.into(),
            customer: customer.into(),
            additions,
        }
    }

    /// Scenario name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Key of the paying customer
    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Cart additions in order
    pub fn additions(&self) -> &[(ProductKey, u32)] {
        &self.additions
    }

    /// Build the scenario's cart by replaying every addition.
    ///
    /// # Errors
    ///
    /// Returns the first [`CartError`] raised by [`Cart::add`].
    pub fn fill_cart(&self, catalog: &Catalog) -> Result<Cart, CartError> {
        let mut cart = Cart::new();

        for &(product, quantity) in &self.additions {
            cart.add(catalog, product, quantity)?;
        }

        Ok(cart)
    }
}
