//! Promotions
//!
//! A promotion looks at the whole basket and the catalog and returns a single
//! discount amount. Promotions are independent: the basket invokes each one
//! exactly once, in registration order, and sums the results.

use std::fmt::Debug;

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::catalog::Catalog;

pub mod bulk_discount;
pub mod buy_one_get_one_free;

pub use bulk_discount::BulkDiscount;
pub use buy_one_get_one_free::BuyOneGetOneFree;

/// Errors that can occur while a promotion calculates its discount.
#[derive(Debug, Error, PartialEq)]
pub enum PromotionError {
    /// The discount could not be represented in minor units.
    #[error("discount for {0} overflowed")]
    Overflow(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// A pluggable discount rule.
///
/// Implementations must be pure: the same items and catalog always produce the
/// same discount, and the returned amount should never be negative.
pub trait Promotion: Debug {
    /// Human readable promotion name, used on receipts and in logs.
    fn name(&self) -> &str;

    /// Calculate the discount this promotion gives on the whole basket.
    ///
    /// # Errors
    ///
    /// Returns a [`PromotionError`] if the discount cannot be calculated.
    fn discount<'a>(
        &self,
        items: &[String],
        catalog: &Catalog<'a>,
    ) -> Result<Money<'a, Currency>, PromotionError>;
}

/// Count the items in the basket carrying the given code.
pub fn count_of(items: &[String], code: &str) -> usize {
    items.iter().filter(|item| *item == code).count()
}

/// Multiply a per-unit amount by a quantity without overflowing.
pub(crate) fn times<'a>(
    code: &str,
    unit: &Money<'a, Currency>,
    quantity: usize,
) -> Result<Money<'a, Currency>, PromotionError> {
    let minor = i64::try_from(quantity)
        .ok()
        .and_then(|quantity| unit.to_minor_units().checked_mul(quantity))
        .ok_or_else(|| PromotionError::Overflow(code.to_string()))?;

    Ok(Money::from_minor(minor, unit.currency()))
}
