//! Tally prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    catalog::Catalog,
    checkout::{Checkout, CheckoutError, CheckoutStage},
    config::{CheckoutConfig, ConfigError},
    customer::{Customer, CustomerError},
    fixtures::{Fixture, FixtureError, Scenario},
    money::{parse_money, whole_units},
    pricing::ShippingRate,
    products::{
        DigitalProduct, Expirable, ExpirableProduct, ExpirableShippableProduct, Listing, Product,
        ProductError, ProductKey, RegularProduct, Shippable, ShippableProduct,
    },
    receipt::{Receipt, ReceiptError, ReceiptLine},
    shipping::{ShipmentNotice, ShippableItem, ShippingError, ShippingService},
    weight::{Weight, WeightError},
};
