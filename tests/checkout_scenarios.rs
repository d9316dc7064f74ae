//! End-to-end checkout scenarios.

use std::path::PathBuf;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency, iso::EGP};
use tally::prelude::*;
use testresult::TestResult;

fn egp(major: i64) -> Money<'static, Currency> {
    Money::from_minor(major * 100, EGP)
}

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Carrier that records shipments and can be told to fail.
#[derive(Debug, Default)]
struct RecordingCarrier {
    shipments: Vec<Vec<ShippableItem>>,
    reject: bool,
}

impl ShippingService for RecordingCarrier {
    fn ship_items(&mut self, items: &[ShippableItem]) -> Result<(), ShippingError> {
        if self.reject {
            return Err(ShippingError::Rejected("depot closed".to_string()));
        }

        self.shipments.push(items.to_vec());

        Ok(())
    }
}

struct Store {
    catalog: Catalog,
    cheese: ProductKey,
    biscuits: ProductKey,
    tv: ProductKey,
    scratch_card: ProductKey,
}

fn store() -> TestResult<Store> {
    let mut catalog = Catalog::new();

    let cheese = catalog.insert(ExpirableShippableProduct::new(
        "Cheese",
        egp(100),
        10,
        false,
        Weight::from_kilograms(Decimal::new(4, 1))?,
    )?);
    let biscuits = catalog.insert(ExpirableShippableProduct::new(
        "Biscuits",
        egp(150),
        5,
        false,
        Weight::from_kilograms(Decimal::new(7, 1))?,
    )?);
    let tv = catalog.insert(RegularProduct::new("TV", egp(1_000), 3)?);
    let scratch_card = catalog.insert(DigitalProduct::new("Scratch Card", egp(50), 100)?);

    Ok(Store {
        catalog,
        cheese,
        biscuits,
        tv,
        scratch_card,
    })
}

fn quantity(catalog: &Catalog, key: ProductKey) -> Option<u32> {
    catalog.get(key).map(|product| product.quantity())
}

#[test]
fn shipped_groceries_are_charged_with_shipping() -> TestResult {
    let Store {
        mut catalog,
        cheese,
        biscuits,
        ..
    } = store()?;
    let mut customer = Customer::new("John Doe", egp(2_000))?;
    let mut cart = Cart::new();
    let mut checkout = Checkout::new(RecordingCarrier::default(), CheckoutConfig::default());

    cart.add(&catalog, cheese, 2)?;
    cart.add(&catalog, biscuits, 1)?;

    let receipt = checkout.checkout(&mut catalog, &mut customer, &mut cart)?;

    assert_eq!(receipt.subtotal(), egp(350));
    assert_eq!(receipt.shipping(), egp(15));
    assert_eq!(receipt.total(), egp(365));
    assert_eq!(receipt.remaining_balance(), egp(1_635));
    assert_eq!(customer.balance(), egp(1_635));
    assert_eq!(quantity(&catalog, cheese), Some(8));
    assert_eq!(quantity(&catalog, biscuits), Some(4));
    assert!(cart.is_empty());

    let mut out = Vec::new();
    receipt.write_to(&mut out)?;

    assert_eq!(
        String::from_utf8(out)?,
        "** Checkout receipt **\n\
         2x Cheese 200\n\
         1x Biscuits 150\n\
         ----------------------\n\
         Subtotal 350\n\
         Shipping 15\n\
         Amount 365\n\
         Remaining balance 1635\n"
    );

    Ok(())
}

#[test]
fn carrier_gets_one_item_per_unit() -> TestResult {
    let Store {
        mut catalog,
        cheese,
        biscuits,
        scratch_card,
        ..
    } = store()?;
    let mut customer = Customer::new("John Doe", egp(2_000))?;
    let mut cart = Cart::new();
    let mut checkout = Checkout::new(RecordingCarrier::default(), CheckoutConfig::default());

    cart.add(&catalog, cheese, 3)?;
    cart.add(&catalog, scratch_card, 5)?;
    cart.add(&catalog, biscuits, 2)?;

    checkout.checkout(&mut catalog, &mut customer, &mut cart)?;

    let shipments = checkout.into_shipping().shipments;
    let [shipment] = shipments.as_slice() else {
        return Err("expected exactly one shipment".into());
    };

    let names: Vec<&str> = shipment.iter().map(ShippableItem::name).collect();

    assert_eq!(
        names,
        ["Cheese", "Cheese", "Cheese", "Biscuits", "Biscuits"]
    );

    Ok(())
}

#[test]
fn digital_and_regular_products_add_no_shipping() -> TestResult {
    let Store {
        mut catalog,
        tv,
        scratch_card,
        ..
    } = store()?;
    let mut customer = Customer::new("John Doe", egp(2_000))?;
    let mut cart = Cart::new();
    let mut checkout = Checkout::new(RecordingCarrier::default(), CheckoutConfig::default());

    cart.add(&catalog, scratch_card, 3)?;
    cart.add(&catalog, tv, 1)?;

    let receipt = checkout.checkout(&mut catalog, &mut customer, &mut cart)?;

    assert_eq!(receipt.subtotal(), egp(1_150));
    assert_eq!(receipt.shipping(), egp(0));
    assert_eq!(customer.balance(), egp(850));
    assert!(checkout.shipping().shipments.is_empty());

    Ok(())
}

#[test]
fn empty_cart_changes_nothing() -> TestResult {
    let Store { mut catalog, .. } = store()?;
    let mut customer = Customer::new("John Doe", egp(2_000))?;
    let mut checkout = Checkout::new(RecordingCarrier::default(), CheckoutConfig::default());

    let result = checkout.checkout(&mut catalog, &mut customer, &mut Cart::new());

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    assert_eq!(customer.balance(), egp(2_000));

    Ok(())
}

#[test]
fn shipping_fee_counts_towards_affordability() -> TestResult {
    let Store {
        mut catalog,
        cheese,
        ..
    } = store()?;
    let mut customer = Customer::new("John Doe", egp(200))?;
    let mut cart = Cart::new();
    let mut checkout = Checkout::new(RecordingCarrier::default(), CheckoutConfig::default());

    cart.add(&catalog, cheese, 2)?;

    let result = checkout.checkout(&mut catalog, &mut customer, &mut cart);

    assert!(matches!(
        result,
        Err(CheckoutError::InsufficientFunds { required, available })
            if required == egp(208) && available == egp(200)
    ));
    assert_eq!(customer.balance(), egp(200));
    assert_eq!(quantity(&catalog, cheese), Some(10));
    assert_eq!(cart.quantity_of(cheese), 2);
    assert!(checkout.shipping().shipments.is_empty());

    Ok(())
}

#[test]
fn failed_line_rejects_whole_cart() -> TestResult {
    let Store {
        mut catalog,
        cheese,
        tv,
        ..
    } = store()?;
    let mut customer = Customer::new("John Doe", egp(10_000))?;
    let mut cart = Cart::new();
    let mut checkout = Checkout::new(RecordingCarrier::default(), CheckoutConfig::default());

    cart.add(&catalog, cheese, 1)?;
    cart.add(&catalog, tv, 3)?;
    cart.add(&catalog, tv, 1)?;

    let result = checkout.checkout(&mut catalog, &mut customer, &mut cart);

    assert!(matches!(result, Err(CheckoutError::OutOfStock { name, .. }) if name == "TV"));
    assert_eq!(quantity(&catalog, cheese), Some(10));
    assert_eq!(quantity(&catalog, tv), Some(3));
    assert_eq!(customer.balance(), egp(10_000));

    Ok(())
}

#[test]
fn expired_products_are_rejected_when_added() -> TestResult {
    let mut catalog = Catalog::new();
    let milk = catalog.insert(ExpirableProduct::new("Milk", egp(30), 5, true)?);

    let result = Cart::new().add(&catalog, milk, 1);

    assert_eq!(result, Err(CartError::ExpiredProduct("Milk".to_string())));

    Ok(())
}

#[test]
fn products_expiring_in_the_cart_are_rejected_at_checkout() -> TestResult {
    let Store {
        mut catalog,
        cheese,
        ..
    } = store()?;
    let mut customer = Customer::new("John Doe", egp(2_000))?;
    let mut cart = Cart::new();
    let mut checkout = Checkout::new(RecordingCarrier::default(), CheckoutConfig::default());

    cart.add(&catalog, cheese, 1)?;

    catalog
        .get_mut(cheese)
        .and_then(|product| product.as_expirable_mut())
        .ok_or("cheese should be expirable")?
        .set_expired(true);

    let result = checkout.checkout(&mut catalog, &mut customer, &mut cart);

    assert!(matches!(result, Err(CheckoutError::ExpiredProduct(name)) if name == "Cheese"));
    assert_eq!(customer.balance(), egp(2_000));

    Ok(())
}

#[test]
fn carrier_failure_aborts_before_payment() -> TestResult {
    let Store {
        mut catalog,
        cheese,
        ..
    } = store()?;
    let mut customer = Customer::new("John Doe", egp(2_000))?;
    let mut cart = Cart::new();
    let carrier = RecordingCarrier {
        reject: true,
        ..RecordingCarrier::default()
    };
    let mut checkout = Checkout::new(carrier, CheckoutConfig::default());

    cart.add(&catalog, cheese, 2)?;

    let result = checkout.checkout(&mut catalog, &mut customer, &mut cart);

    assert!(matches!(
        result,
        Err(CheckoutError::Shipping(ShippingError::Rejected(_)))
    ));
    assert_eq!(customer.balance(), egp(2_000));
    assert_eq!(quantity(&catalog, cheese), Some(10));
    assert_eq!(cart.len(), 1);

    Ok(())
}

#[test]
fn shipping_fraction_of_a_piastre_is_not_forgiven() -> TestResult {
    let mut catalog = Catalog::new();
    let stamp = catalog.insert(ShippableProduct::new(
        "Stamp",
        egp(100),
        1,
        Weight::from_kilograms(Decimal::new(4, 4))?,
    )?);
    let mut customer = Customer::new("John Doe", egp(100))?;
    let mut cart = Cart::new();
    let mut checkout = Checkout::new(RecordingCarrier::default(), CheckoutConfig::default());

    cart.add(&catalog, stamp, 1)?;

    let result = checkout.checkout(&mut catalog, &mut customer, &mut cart);

    assert!(
        matches!(
            &result,
            Err(CheckoutError::InsufficientFunds { required, available })
                if *required.amount() == Decimal::new(100_004, 3) && *available == egp(100)
        ),
        "expected insufficient funds, got {result:?}"
    );
    assert_eq!(checkout.stage(), CheckoutStage::Rejected);
    assert_eq!(customer.balance(), egp(100));
    assert_eq!(quantity(&catalog, stamp), Some(1));
    assert_eq!(cart.quantity_of(stamp), 1);
    assert!(checkout.shipping().shipments.is_empty());

    Ok(())
}

#[test]
fn cart_checked_out_against_another_catalog_is_rejected() -> TestResult {
    let Store { catalog, cheese, .. } = store()?;
    let mut customer = Customer::new("John Doe", egp(2_000))?;
    let mut cart = Cart::new();
    let mut checkout = Checkout::new(RecordingCarrier::default(), CheckoutConfig::default());

    cart.add(&catalog, cheese, 1)?;

    let mut other = Catalog::new();
    let result = checkout.checkout(&mut other, &mut customer, &mut cart);

    assert!(matches!(result, Err(CheckoutError::ProductNotFound(key)) if key == cheese));
    assert_eq!(customer.balance(), egp(2_000));
    assert_eq!(cart.quantity_of(cheese), 1);
    assert_eq!(quantity(&catalog, cheese), Some(10));
    assert!(checkout.shipping().shipments.is_empty());

    Ok(())
}

#[test]
fn configured_rate_is_used() -> TestResult {
    let Store {
        mut catalog,
        biscuits,
        ..
    } = store()?;
    let mut customer = Customer::new("John Doe", egp(2_000))?;
    let mut cart = Cart::new();
    let config = CheckoutConfig::from_yaml("currency: EGP\nshipping_rate_per_kg: 25 EGP\n")?;
    let mut checkout = Checkout::new(RecordingCarrier::default(), config);

    cart.add(&catalog, biscuits, 1)?;

    let receipt = checkout.checkout(&mut catalog, &mut customer, &mut cart)?;

    // 0.7kg at 25/kg
    assert_eq!(receipt.shipping(), Money::from_minor(1_750, EGP));

    Ok(())
}

#[test]
fn reference_fixture_runs_both_checkouts() -> TestResult {
    let fixture = Fixture::from_set(fixtures_dir(), "reference")?;
    let (mut catalog, mut customers, scenarios) = fixture.into_parts();
    let mut notices = Vec::new();
    let mut checkout = Checkout::new(
        ShipmentNotice::new(&mut notices),
        CheckoutConfig::default(),
    );
    let mut receipts = Vec::new();

    for scenario in &scenarios {
        let customer = customers
            .get_mut(scenario.customer())
            .ok_or("customer missing")?;
        let mut cart = scenario.fill_cart(&catalog)?;

        receipts.push(checkout.checkout(&mut catalog, customer, &mut cart)?);
    }

    drop(checkout);

    let totals: Vec<_> = receipts.iter().map(Receipt::total).collect();

    assert_eq!(totals, [egp(365), egp(1_150)]);
    assert_eq!(
        customers.get("john").map(Customer::balance),
        Some(egp(485))
    );
    assert_eq!(
        String::from_utf8(notices)?,
        "** Shipment notice **\n\
         2x Cheese 400g\n\
         1x Biscuits 700g\n\
         Total package weight 1.5kg\n"
    );

    Ok(())
}

#[test]
fn pantry_fixture_rejects_bad_carts() -> TestResult {
    let fixture = Fixture::from_set(fixtures_dir(), "pantry")?;
    let (mut catalog, mut customers, scenarios) = fixture.into_parts();
    let mut checkout = Checkout::new(RecordingCarrier::default(), CheckoutConfig::default());

    let [expired_milk, too_much_rice, cannot_afford, weekly_shop] = scenarios.as_slice() else {
        return Err("expected four scenarios".into());
    };

    assert!(matches!(
        expired_milk.fill_cart(&catalog),
        Err(CartError::ExpiredProduct(_))
    ));
    assert!(matches!(
        too_much_rice.fill_cart(&catalog),
        Err(CartError::InsufficientStock { .. })
    ));

    let poor = customers
        .get_mut(cannot_afford.customer())
        .ok_or("customer missing")?;
    let mut cart = cannot_afford.fill_cart(&catalog)?;

    assert!(matches!(
        checkout.checkout(&mut catalog, poor, &mut cart),
        Err(CheckoutError::InsufficientFunds { .. })
    ));

    let amira = customers
        .get_mut(weekly_shop.customer())
        .ok_or("customer missing")?;
    let mut cart = weekly_shop.fill_cart(&catalog)?;

    assert_eq!(cart.len(), 2);

    let receipt = checkout.checkout(&mut catalog, amira, &mut cart)?;

    assert_eq!(receipt.subtotal(), egp(144));
    assert_eq!(receipt.shipping(), egp(29));
    assert_eq!(receipt.remaining_balance(), egp(327));

    Ok(())
}
