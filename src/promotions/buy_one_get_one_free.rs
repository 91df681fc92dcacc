//! Buy One Get One Free

use rusty_money::{Money, iso::Currency};

use crate::{
    catalog::Catalog,
    promotions::{Promotion, PromotionError, count_of, times},
};

/// Every second item with the target code is free.
///
/// Gives nothing once the product is withdrawn from the catalog, even if it is
/// still in the basket.
#[derive(Debug, Clone)]
pub struct BuyOneGetOneFree {
    name: String,
    code: String,
}

impl BuyOneGetOneFree {
    /// Create a new buy-one-get-one-free promotion on the given product code.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();

        Self {
            name: format!("Buy one get one free ({code})"),
            code,
        }
    }

    /// Replace the generated promotion name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Return the targeted product code.
    pub fn code(&self) -> &str {
        &self.code
    }
}

impl Promotion for BuyOneGetOneFree {
    fn name(&self) -> &str {
        &self.name
    }

    fn discount<'a>(
        &self,
        items: &[String],
        catalog: &Catalog<'a>,
    ) -> Result<Money<'a, Currency>, PromotionError> {
        let Some(product) = catalog.find(&self.code) else {
            return Ok(Money::from_minor(0, catalog.currency()));
        };

        let free = count_of(items, &self.code) / 2;

        times(&self.code, product.price(), free)
    }
}
