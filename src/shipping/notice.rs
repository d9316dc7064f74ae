//! Shipment Notice
//!
//! A carrier that writes a plain-text shipment notice:
//!
//! ```text
//! ** Shipment notice **
//! 2x Cheese 400g
//! 1x Biscuits 700g
//! Total package weight 1.5kg
//! ```

use std::io::{self, Write};

use rust_decimal::RoundingStrategy;
use smallvec::SmallVec;
use tracing::info;

use crate::{
    shipping::{ShippableItem, ShippingError, ShippingService},
    weight::TotalWeight,
};

/// Carrier that prints a shipment notice to a writer.
#[derive(Debug)]
pub struct ShipmentNotice<W> {
    out: W,
}

impl ShipmentNotice<io::Stdout> {
    /// Shipment notice printed to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ShipmentNotice<W> {
    /// Create a new shipment notice writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Get the underlying writer back.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ShippingService for ShipmentNotice<W> {
    fn ship_items(&mut self, items: &[ShippableItem]) -> Result<(), ShippingError> {
        if items.is_empty() {
            return Ok(());
        }

        writeln!(self.out, "** Shipment notice **")?;

        for (item, count) in group_identical(items) {
            writeln!(
                self.out,
                "{count}x {} {}g",
                item.name(),
                item
                    .weight()
                    .grams()
                    .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            )?;
        }

        let total: TotalWeight = items.iter().map(ShippableItem::weight).sum();

        writeln!(
            self.out,
            "Total package weight {:.1}kg",
            total.0.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        )?;

        info!(units = items.len(), total_kg = %total.0, "shipment dispatched");

        Ok(())
    }
}

/// Count identical items (same name and weight), keeping first-seen order.
fn group_identical(items: &[ShippableItem]) -> SmallVec<[(&ShippableItem, usize); 8]> {
    let mut groups: SmallVec<[(&ShippableItem, usize); 8]> = SmallVec::new();

    for item in items {
        match groups.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, count)) => *count += 1,
            None => groups.push((item, 1)),
        }
    }

    groups
}
