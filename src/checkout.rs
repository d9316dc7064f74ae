//! Checkout
//!
//! A checkout validates the whole cart before touching anything. Stock, expiry
//! and affordability (including the shipping fee) are all checked up front,
//! so a rejected checkout leaves the catalog, customer and cart unchanged.

use std::fmt;

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    cart::Cart,
    catalog::Catalog,
    config::CheckoutConfig,
    customer::{Customer, CustomerError},
    pricing::{self, TotalPriceError},
    products::{Product, ProductError, ProductKey},
    receipt::{Receipt, ReceiptLine, ReceiptLines},
    shipping::{self, ShippableItems, ShippingError, ShippingService},
};

/// Errors that abort a checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Nothing to check out.
    #[error("cart is empty")]
    EmptyCart,

    /// A cart entry refers to a product that is no longer in the catalog.
    #[error("product {0:?} not found in catalog")]
    ProductNotFound(ProductKey),

    /// The cart asks for more units than are in stock.
    #[error("{name} is out of stock: requested {requested}, available {available}")]
    OutOfStock {
        /// Product name
        name: String,
        /// Units in the cart
        requested: u32,
        /// Units in stock
        available: u32,
    },

    /// An expirable product in the cart has expired.
    #[error("{0} is expired")]
    ExpiredProduct(String),

    /// The balance doesn't cover subtotal plus shipping.
    #[error("insufficient funds: total {required}, balance {available}")]
    InsufficientFunds {
        /// Subtotal plus shipping
        required: Money<'static, Currency>,
        /// Customer balance
        available: Money<'static, Currency>,
    },

    /// The carrier failed to accept the shipment.
    #[error(transparent)]
    Shipping(#[from] ShippingError),

    /// Price calculation failed.
    #[error(transparent)]
    Pricing(#[from] TotalPriceError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Stock update failed.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// Payment failed.
    #[error(transparent)]
    Customer(#[from] CustomerError),
}

/// Stages of a checkout, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStage {
    /// Checking the cart against the catalog.
    Validating,
    /// Computing subtotal, shipping and total.
    Pricing,
    /// Handing physical units to the carrier.
    Shipping,
    /// Debiting the customer.
    Paying,
    /// Reducing stock.
    UpdatingInventory,
    /// Building the receipt.
    Receipting,
    /// Checkout complete.
    Done,
    /// Checkout failed.
    Rejected,
}

impl CheckoutStage {
    /// Stage name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStage::Validating => "validating",
            CheckoutStage::Pricing => "pricing",
            CheckoutStage::Shipping => "shipping",
            CheckoutStage::Paying => "paying",
            CheckoutStage::UpdatingInventory => "updating_inventory",
            CheckoutStage::Receipting => "receipting",
            CheckoutStage::Done => "done",
            CheckoutStage::Rejected => "rejected",
        }
    }

    /// Whether a failure at this stage may already have reached the carrier,
    /// the customer or the catalog.
    ///
    /// Failures before [`CheckoutStage::Shipping`] never have side effects.
    pub fn has_side_effects(&self) -> bool {
        !matches!(
            self,
            CheckoutStage::Validating | CheckoutStage::Pricing | CheckoutStage::Rejected
        )
    }
}

impl fmt::Display for CheckoutStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs checkouts against a carrier.
#[derive(Debug)]
pub struct Checkout<S> {
    shipping: S,
    config: CheckoutConfig,
    stage: CheckoutStage,
}

impl<S: ShippingService> Checkout<S> {
    /// Create a new checkout with the given carrier and configuration.
    pub fn new(shipping: S, config: CheckoutConfig) -> Self {
        Self {
            shipping,
            config,
            stage: CheckoutStage::Validating,
        }
    }

    /// Checkout configuration
    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// The carrier
    pub fn shipping(&self) -> &S {
        &self.shipping
    }

    /// Where the last checkout ended: [`CheckoutStage::Done`] or
    /// [`CheckoutStage::Rejected`]. [`CheckoutStage::Validating`] before the first.
    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    /// Get the carrier back.
    pub fn into_shipping(self) -> S {
        self.shipping
    }

    /// Check out `cart` for `customer`.
    ///
    /// On success the customer is debited, stock is reduced, the cart is
    /// cleared and a [`Receipt`] is returned. A failure before shipping leaves
    /// everything untouched.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::EmptyCart`]: the cart has no entries.
    /// - [`CheckoutError::ProductNotFound`]: an entry isn't in the catalog.
    /// - [`CheckoutError::OutOfStock`]: an entry exceeds the product's stock.
    /// - [`CheckoutError::ExpiredProduct`]: an entry has expired.
    /// - [`CheckoutError::InsufficientFunds`]: the balance doesn't cover the total.
    /// - [`CheckoutError::Shipping`]: the carrier failed. Nothing is charged.
    #[tracing::instrument(
        name = "checkout",
        skip_all,
        fields(customer = %customer.name(), lines = cart.len())
    )]
    pub fn checkout(
        &mut self,
        catalog: &mut Catalog,
        customer: &mut Customer,
        cart: &mut Cart,
    ) -> Result<Receipt, CheckoutError> {
        let mut stage = CheckoutStage::Validating;

        let result = self.process(catalog, customer, cart, &mut stage);

        match &result {
            Ok(receipt) => {
                info!(
                    subtotal = %receipt.subtotal(),
                    shipping = %receipt.shipping(),
                    total = %receipt.total(),
                    remaining_balance = %receipt.remaining_balance(),
                    "checkout complete"
                );
            }
            Err(err) => {
                let failed_at = stage;

                stage = CheckoutStage::Rejected;

                warn!(
                    %failed_at,
                    side_effects = failed_at.has_side_effects(),
                    error = %err,
                    "checkout rejected"
                );
            }
        }

        self.stage = stage;

        result
    }

    fn process(
        &mut self,
        catalog: &mut Catalog,
        customer: &mut Customer,
        cart: &mut Cart,
        stage: &mut CheckoutStage,
    ) -> Result<Receipt, CheckoutError> {
        debug!(stage = %stage, "checkout stage");

        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let entries = cart.items();

        for entry in &entries {
            let product = lookup(catalog, entry.product)?;

            if entry.quantity > product.quantity() {
                return Err(CheckoutError::OutOfStock {
                    name: product.name().to_string(),
                    requested: entry.quantity,
                    available: product.quantity(),
                });
            }

            if product.has_expired() {
                return Err(CheckoutError::ExpiredProduct(product.name().to_string()));
            }
        }

        advance(stage, CheckoutStage::Pricing);

        let currency = self.config.currency();
        let mut lines = ReceiptLines::new();
        let mut prices: SmallVec<[(Money<'static, Currency>, u32); 8]> = SmallVec::new();
        let mut items = ShippableItems::new();

        for entry in &entries {
            let product = lookup(catalog, entry.product)?;

            lines.push(ReceiptLine::new(
                product.name(),
                entry.quantity,
                pricing::line_total(product.price(), entry.quantity)?,
            ));
            prices.push((product.price(), entry.quantity));
            items.extend(shipping::expand(product, entry.quantity));
        }

        let subtotal = pricing::subtotal(prices, currency)?;
        let shipping_fee = pricing::shipping_fee(&items, self.config.shipping_rate())?;
        let total = subtotal.add(shipping_fee)?;

        debug!(%subtotal, %shipping_fee, %total, units = items.len(), "priced");

        if !customer.can_afford(total)? {
            return Err(CheckoutError::InsufficientFunds {
                required: total,
                available: customer.balance(),
            });
        }

        advance(stage, CheckoutStage::Shipping);

        if !items.is_empty() {
            self.shipping.ship_items(&items)?;
        }

        advance(stage, CheckoutStage::Paying);

        customer.deduct_balance(total)?;

        advance(stage, CheckoutStage::UpdatingInventory);

        for entry in &entries {
            catalog
                .get_mut(entry.product)
                .ok_or(CheckoutError::ProductNotFound(entry.product))?
                .reduce_quantity(entry.quantity)?;
        }

        advance(stage, CheckoutStage::Receipting);

        let receipt = Receipt::new(lines, subtotal, shipping_fee, total, customer.balance());

        cart.clear();

        advance(stage, CheckoutStage::Done);

        Ok(receipt)
    }
}

fn lookup(catalog: &Catalog, key: ProductKey) -> Result<&dyn Product, CheckoutError> {
    catalog.get(key).ok_or(CheckoutError::ProductNotFound(key))
}

fn advance(stage: &mut CheckoutStage, next: CheckoutStage) {
    debug!(from = %stage, to = %next, "checkout stage");

    *stage = next;
}
