//! Receipt
//!
//! The plain rendering uses whole currency units:
//!
//! ```text
//! ** Checkout receipt **
//! 2x Cheese 200
//! 1x Biscuits 150
//! ----------------------
//! Subtotal 350
//! Shipping 15
//! Amount 365
//! Remaining balance 1635
//! ```

use std::io;

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::money::whole_units;

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// A purchased line: quantity, product name and line total.
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    name: String,
    quantity: u32,
    line_total: Money<'static, Currency>,
}

impl ReceiptLine {
    /// Create a new receipt line.
    pub fn new(name: impl Into<String>, quantity: u32, line_total: Money<'static, Currency>) -> Self {
        Self {
            name: name.into(),
            quantity,
            line_total,
        }
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units purchased
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price × quantity
    pub fn line_total(&self) -> Money<'static, Currency> {
        self.line_total
    }
}

/// Receipt lines in cart order.
pub type ReceiptLines = SmallVec<[ReceiptLine; 8]>;

/// Final receipt for a completed checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    lines: ReceiptLines,
    subtotal: Money<'static, Currency>,
    shipping: Money<'static, Currency>,
    total: Money<'static, Currency>,
    remaining_balance: Money<'static, Currency>,
}

impl Receipt {
    /// Create a new receipt with the given details.
    pub fn new(
        lines: ReceiptLines,
        subtotal: Money<'static, Currency>,
        shipping: Money<'static, Currency>,
        total: Money<'static, Currency>,
        remaining_balance: Money<'static, Currency>,
    ) -> Self {
        Self {
            lines,
            subtotal,
            shipping,
            total,
            remaining_balance,
        }
    }

    /// Purchased lines
    pub fn lines(&self) -> &[ReceiptLine] {
        &self.lines
    }

    /// Sum of line totals
    pub fn subtotal(&self) -> Money<'static, Currency> {
        self.subtotal
    }

    /// Shipping fee
    pub fn shipping(&self) -> Money<'static, Currency> {
        self.shipping
    }

    /// Amount charged: subtotal plus shipping.
    pub fn total(&self) -> Money<'static, Currency> {
        self.total
    }

    /// Customer balance after payment.
    pub fn remaining_balance(&self) -> Money<'static, Currency> {
        self.remaining_balance
    }

    /// Write the receipt in the plain format, amounts in whole units.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Io`] if writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        writeln!(out, "** Checkout receipt **")?;

        for line in &self.lines {
            writeln!(
                out,
                "{}x {} {}",
                line.quantity,
                line.name,
                whole_units(&line.line_total)
            )?;
        }

        writeln!(out, "----------------------")?;
        writeln!(out, "Subtotal {}", whole_units(&self.subtotal))?;
        writeln!(out, "Shipping {}", whole_units(&self.shipping))?;
        writeln!(out, "Amount {}", whole_units(&self.total))?;
        writeln!(out, "Remaining balance {}", whole_units(&self.remaining_balance))?;

        Ok(())
    }

    /// Write the receipt as a table followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::Io`] if writing fails.
    pub fn write_table(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Qty", "Item", "Amount"]);

        for line in &self.lines {
            builder.push_record([
                line.quantity.to_string(),
                line.name.clone(),
                line.line_total.to_string(),
            ]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(0..1), Alignment::right());
        table.modify(Columns::new(2..3), Alignment::right());

        writeln!(out, "\n{table}")?;

        let summary = [
            ("Subtotal:", self.subtotal.to_string()),
            ("Shipping:", self.shipping.to_string()),
            ("Total:", self.total.to_string()),
            ("Remaining balance:", self.remaining_balance.to_string()),
        ];

        let label_width = summary.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = summary.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        for (label, value) in &summary {
            writeln!(out, " {label:>label_width$}  {value:>value_width$}")?;
        }

        writeln!(out)?;

        Ok(())
    }
}
