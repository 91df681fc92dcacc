//! Products

use rusty_money::{Money, iso::Currency};

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product code (e.g. `FR1`)
    pub code: String,

    /// Product name
    pub name: String,

    /// Product price
    pub price: Money<'a, Currency>,
}

impl<'a> Product<'a> {
    /// Create a new product.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            price,
        }
    }

    /// Returns the price of the product
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }
}
