//! Customer Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{customer::Customer, fixtures::FixtureError, money::parse_money};

/// Wrapper for customers in YAML
#[derive(Debug, Deserialize)]
pub struct CustomersFixture {
    /// Map of customer key -> customer fixture
    pub customers: FxHashMap<String, CustomerFixture>,
}

/// Customer Fixture
#[derive(Debug, Deserialize)]
pub struct CustomerFixture {
    /// Customer name
    pub name: String,

    /// Opening balance (e.g., "2000 EGP")
    pub balance: String,
}

impl TryFrom<CustomerFixture> for Customer {
    type Error = FixtureError;

    fn try_from(fixture: CustomerFixture) -> Result<Self, Self::Error> {
        let balance = parse_money(&fixture.balance)?;

        Ok(Customer::new(fixture.name, balance)?)
    }
}
