//! Tally
//!
//! Runs every checkout scenario in a fixture set, printing shipment notices
//! and receipts to stdout.

use std::io::{self, Write};

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use tally::{
    checkout::Checkout, cli::CheckoutArgs, config::CheckoutConfig, fixtures::Fixture,
    observability, shipping::ShipmentNotice,
};
use tracing::info;

fn main() -> Result<()> {
    let args = CheckoutArgs::parse();

    observability::init_subscriber(&args.logging)?;

    let config = match &args.config {
        Some(path) => CheckoutConfig::load(path)?,
        None => CheckoutConfig::default(),
    };

    let fixture = Fixture::from_set(&args.fixtures_dir, &args.fixture)?;

    if let Some(currency) = fixture
        .currency()
        .filter(|&currency| currency != config.currency())
    {
        bail!(
            "fixture set {} is priced in {}, but checkout is configured for {}",
            args.fixture,
            currency.iso_alpha_code,
            config.currency().iso_alpha_code
        );
    }

    info!(
        fixture = %args.fixture,
        scenarios = fixture.scenarios().len(),
        "fixture loaded"
    );

    let (mut catalog, mut customers, scenarios) = fixture.into_parts();
    let mut checkout = Checkout::new(ShipmentNotice::stdout(), config);
    let mut stdout = io::stdout();

    for scenario in &scenarios {
        writeln!(stdout, "== {} ==", scenario.name())?;

        let customer = customers
            .get_mut(scenario.customer())
            .ok_or_else(|| anyhow!("customer {} not loaded", scenario.customer()))?;

        let mut cart = match scenario.fill_cart(&catalog) {
            Ok(cart) => cart,
            Err(err) => {
                writeln!(stdout, "Could not fill cart: {err}\n")?;

                continue;
            }
        };

        match checkout.checkout(&mut catalog, customer, &mut cart) {
            Ok(receipt) if args.table => receipt.write_table(&mut stdout)?,
            Ok(receipt) => receipt.write_to(&mut stdout)?,
            Err(err) => writeln!(stdout, "Checkout failed: {err}")?,
        }

        writeln!(stdout)?;
    }

    stdout.flush()?;

    Ok(())
}
