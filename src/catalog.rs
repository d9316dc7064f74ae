//! Catalog
//!
//! Owns every product in the store. Carts refer to products by [`ProductKey`]
//! and the checkout borrows the catalog mutably to update stock.

use rustc_hash::FxHashMap;
use slotmap::SlotMap;

use crate::products::{Product, ProductKey};

/// Product catalog
#[derive(Debug, Default)]
pub struct Catalog {
    products: SlotMap<ProductKey, Box<dyn Product>>,
    names: FxHashMap<String, ProductKey>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product and return its key.
    ///
    /// A later product with the same name shadows the earlier one in
    /// [`Catalog::find`]; both stay addressable by key.
    pub fn insert(&mut self, product: impl Product + 'static) -> ProductKey {
        let name = product.name().to_string();
        let key = self.products.insert(Box::new(product));

        self.names.insert(name, key);

        key
    }

    /// Get a product by key.
    pub fn get(&self, key: ProductKey) -> Option<&dyn Product> {
        self.products.get(key).map(|product| &**product)
    }

    /// Get a product by key, mutably.
    pub fn get_mut(&mut self, key: ProductKey) -> Option<&mut (dyn Product + 'static)> {
        self.products.get_mut(key).map(|product| &mut **product)
    }

    /// Look up a product key by product name.
    pub fn find(&self, name: &str) -> Option<ProductKey> {
        self.names.get(name).copied()
    }

    /// Number of products
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
