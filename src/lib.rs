//! Tally
//!
//! Tally is an in-memory checkout simulator. It models a product catalog with
//! optional expiry and shipping capabilities, a cart, customer balances, and
//! a checkout that validates the whole cart, prices it (including a weight
//! based shipping fee), hands physical units to a carrier, takes payment,
//! updates stock and produces a receipt.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod cli;
pub mod config;
pub mod customer;
pub mod fixtures;
pub mod money;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod shipping;
pub mod weight;
