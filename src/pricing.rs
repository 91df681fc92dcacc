//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::catalog::Catalog;

/// Errors that can occur while calculating total price.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// An item code has no matching product in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates the gross price of a list of item codes against a catalog.
///
/// Items are priced in order, so the first unknown code is the one reported.
/// An empty list totals to zero in the catalog currency.
///
/// # Errors
///
/// - [`TotalPriceError::ProductNotFound`]: an item code is not in the catalog.
/// - [`TotalPriceError::Money`]: wrapped money arithmetic or currency mismatch error.
pub fn total_price<'a, S: AsRef<str>>(
    items: &[S],
    catalog: &Catalog<'a>,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    items.iter().try_fold(
        Money::from_minor(0, catalog.currency()),
        |acc, code| -> Result<Money<'a, Currency>, TotalPriceError> {
            let code = code.as_ref();
            let product = catalog
                .find(code)
                .ok_or_else(|| TotalPriceError::ProductNotFound(code.to_string()))?;

            Ok(acc.add(*product.price())?)
        },
    )
}
