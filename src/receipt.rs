//! Receipt

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// Error writing to the output
    #[error(transparent)]
    IO(#[from] io::Error),
}

/// Discount given by a single promotion.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionLine<'a> {
    name: String,
    discount: Money<'a, Currency>,
}

impl<'a> PromotionLine<'a> {
    /// Create a new promotion line.
    pub fn new(name: impl Into<String>, discount: Money<'a, Currency>) -> Self {
        Self {
            name: name.into(),
            discount,
        }
    }

    /// Promotion name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Discount given by the promotion
    pub fn discount(&self) -> &Money<'a, Currency> {
        &self.discount
    }
}

/// Breakdown of a single basket total.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    /// Total cost before any promotions
    subtotal: Money<'a, Currency>,

    /// Discount per promotion, in the order the promotions ran
    lines: SmallVec<[PromotionLine<'a>; 4]>,

    /// Total amount paid after all promotions
    total: Money<'a, Currency>,
}

impl<'a> Receipt<'a> {
    /// Create a new receipt with the given details.
    pub fn new(
        subtotal: Money<'a, Currency>,
        lines: SmallVec<[PromotionLine<'a>; 4]>,
        total: Money<'a, Currency>,
    ) -> Self {
        Self {
            subtotal,
            lines,
            total,
        }
    }

    /// Total cost before any promotions
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Total amount paid after all promotions
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Discount given by each promotion
    pub fn lines(&self) -> &[PromotionLine<'a>] {
        &self.lines
    }

    /// Calculate the savings made by applying promotions.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Writes the receipt as a table of promotions followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the savings cannot be calculated or the output
    /// cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Promotion", "Discount"]);

        for line in &self.lines {
            builder.push_record([line.name().to_string(), line.discount().to_string()]);
        }

        let mut table = builder.build();

        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..), Alignment::right());

        writeln!(out, "{table}")?;

        let discount = self.savings()?;

        writeln!(out, " Subtotal: {}", self.subtotal)?;
        writeln!(out, " Discount: {discount}")?;
        writeln!(out, " Total:    {}", self.total)?;

        Ok(())
    }
}
