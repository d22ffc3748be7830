//! Receipt
//!
//! Human-readable rendering of a [`BillResponse`].

use std::io;

use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{amounts::format_amount, bill::BillResponse, items::ItemId};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Full-price subtotal does not fit in a decimal
    #[error("subtotal overflowed")]
    SubtotalOverflow,

    /// Writing to the output failed
    #[error("failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

/// Receipt view over a computed bill.
#[derive(Debug, Clone, Copy)]
pub struct Receipt<'a> {
    bill: &'a BillResponse,
}

impl<'a> Receipt<'a> {
    /// Create a receipt for `bill`.
    pub fn new(bill: &'a BillResponse) -> Self {
        Self { bill }
    }

    /// Cost of the priced lines without any offers applied.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::SubtotalOverflow`] if the sum does not fit.
    pub fn subtotal(&self) -> Result<Decimal, ReceiptError> {
        self.bill
            .lines()
            .iter()
            .try_fold(Decimal::ZERO, |acc, line| {
                line.unit_price
                    .checked_mul(Decimal::from(line.quantity))
                    .and_then(|full| acc.checked_add(full))
            })
            .ok_or(ReceiptError::SubtotalOverflow)
    }

    /// Amount saved by offers.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptError::SubtotalOverflow`] if the subtotal does not fit.
    pub fn savings(&self) -> Result<Decimal, ReceiptError> {
        Ok(self.subtotal()? - self.bill.total_charge())
    }

    /// Write the receipt table and summary to `out`.
    ///
    /// # Errors
    ///
    /// Returns an error if the subtotal overflows or writing fails.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Offer", "Qty", "Unit Price", "Charged", "Avg"]);

        for (idx, line) in self.bill.lines().iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.item_id.to_string(),
                line.offer_type.to_string(),
                line.quantity.to_string(),
                format_amount(line.unit_price),
                format_amount(line.charged),
                format_amount(line.average_unit_charge),
            ]);
        }

        let mut table = builder.build();
        let mut theme = Theme::from(Style::modern_rounded());

        theme.remove_horizontal_lines();
        theme.insert_horizontal_line(
            1,
            HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤')),
        );

        table.with(theme);
        table.modify(Rows::first(), Color::BOLD);
        table.modify(Columns::new(3..7), Alignment::right());

        writeln!(out, "\n{table}")?;

        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let rows = [
            ("Items:", self.bill.total_quantity().to_string()),
            ("Subtotal:", format_amount(self.subtotal()?)),
            ("Savings:", format_amount(self.savings()?)),
            ("Total:", format_amount(self.bill.total_charge())),
        ];

        let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
        let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

        writeln!(out)?;

        for (label, value) in rows {
            writeln!(out, " {label:<label_width$} {value:>value_width$}")?;
        }

        if !self.bill.unrecognized().is_empty() {
            let names: Vec<&str> = self
                .bill
                .unrecognized()
                .iter()
                .map(ItemId::as_str)
                .collect();

            writeln!(out, "\n Not priced (unknown items): {}", names.join(", "))?;
        }

        Ok(())
    }
}
