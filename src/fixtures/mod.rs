//! Fixtures
//!
//! A fixture set is three YAML files sharing a name:
//!
//! - `products/<set>.yml`: the catalog
//! - `customers/<set>.yml`: customers and opening balances
//! - `carts/<set>.yml`: checkout scenarios, run in file order

use std::{
    fs,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    customer::{Customer, CustomerError},
    fixtures::{carts::CartsFixture, customers::CustomersFixture, products::ProductsFixture},
    money::MoneyParseError,
    products::{ProductError, ProductKey},
    weight::WeightError,
};

pub mod carts;
pub mod customers;
pub mod products;

pub use carts::Scenario;

/// Customers keyed by their fixture key.
pub type Customers = FxHashMap<String, Customer>;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price or currency
    #[error(transparent)]
    Money(#[from] MoneyParseError),

    /// Invalid weight format
    #[error("Invalid weight format: {0}")]
    InvalidWeight(String),

    /// Weight not positive
    #[error(transparent)]
    Weight(#[from] WeightError),

    /// Shippable product without a weight
    #[error("Shippable product {0} has no weight")]
    MissingWeight(String),

    /// Product rejected on construction
    #[error(transparent)]
    Product(#[from] ProductError),

    /// Customer rejected on construction
    #[error(transparent)]
    Customer(#[from] CustomerError),

    /// Product not found
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Customer not found
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// Currency mismatch between prices or balances
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    catalog: Catalog,

    /// Fixture key -> catalog key
    product_keys: FxHashMap<String, ProductKey>,

    customers: Customers,

    scenarios: Vec<Scenario>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: Catalog::new(),
            product_keys: FxHashMap::default(),
            customers: FxHashMap::default(),
            scenarios: Vec::new(),
            currency: None,
        }
    }

    /// Load products, customers and carts from the set called `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the three files can't be loaded.
    pub fn from_set(base_path: impl Into<PathBuf>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path);

        fixture
            .load_products(name)?
            .load_customers(name)?
            .load_carts(name)?;

        Ok(fixture)
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = read_yaml(&self.base_path, "products", name)?;

        for (key, product_fixture) in fixture.products {
            let product_key = product_fixture.insert_into(&mut self.catalog)?;

            if let Some(product) = self.catalog.get(product_key) {
                let currency = product.price().currency();

                self.check_currency(currency)?;
            }

            self.product_keys.insert(key, product_key);
        }

        Ok(self)
    }

    /// Load customers from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_customers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CustomersFixture = read_yaml(&self.base_path, "customers", name)?;

        for (key, customer_fixture) in fixture.customers {
            let customer = Customer::try_from(customer_fixture)?;

            self.check_currency(customer.balance().currency())?;
            self.customers.insert(key, customer);
        }

        Ok(self)
    }

    /// Load checkout scenarios from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if a scenario
    /// refers to a product or customer that hasn't been loaded.
    pub fn load_carts(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: CartsFixture = read_yaml(&self.base_path, "carts", name)?;

        for checkout in fixture.checkouts {
            if !self.customers.contains_key(&checkout.customer) {
                return Err(FixtureError::CustomerNotFound(checkout.customer));
            }

            let additions = checkout
                .items
                .into_iter()
                .map(|item| {
                    self.product_key(&item.product)
                        .map(|key| (key, item.quantity))
                })
                .collect::<Result<SmallVec<[(ProductKey, u32); 8]>, FixtureError>>()?;

            self.scenarios
                .push(Scenario::new(checkout.name, checkout.customer, additions));
        }

        Ok(self)
    }

    /// Get a product key by its fixture key
    ///
    /// # Errors
    ///
    /// Returns [`FixtureError::ProductNotFound`] if no product has that key.
    pub fn product_key(&self, key: &str) -> Result<ProductKey, FixtureError> {
        self.product_keys
            .get(key)
            .copied()
            .ok_or_else(|| FixtureError::ProductNotFound(key.to_string()))
    }

    /// The loaded catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Loaded scenarios in file order
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Currency shared by every price and balance, once anything is loaded.
    pub fn currency(&self) -> Option<&'static Currency> {
        self.currency
    }

    /// Split the fixture into the catalog, customers and scenarios.
    pub fn into_parts(self) -> (Catalog, Customers, Vec<Scenario>) {
        (self.catalog, self.customers, self.scenarios)
    }

    fn check_currency(&mut self, currency: &'static Currency) -> Result<(), FixtureError> {
        match self.currency {
            Some(existing) if existing != currency => Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            )),
            Some(_) => Ok(()),
            None => {
                self.currency = Some(currency);

                Ok(())
            }
        }
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

fn read_yaml<T: serde::de::DeserializeOwned>(
    base_path: &Path,
    kind: &str,
    name: &str,
) -> Result<T, FixtureError> {
    let file_path = base_path.join(kind).join(format!("{name}.yml"));
    let contents = fs::read_to_string(&file_path)?;

    Ok(serde_norway::from_str(&contents)?)
}
