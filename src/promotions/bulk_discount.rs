//! Bulk Discount

use rusty_money::{Money, iso::Currency};

use crate::{
    catalog::Catalog,
    promotions::{Promotion, PromotionError, count_of, times},
};

/// A flat amount off every unit once enough units of one product are bought.
///
/// The discount covers all units, not just those above the threshold. Gives
/// nothing once the product is withdrawn from the catalog.
#[derive(Debug, Clone)]
pub struct BulkDiscount {
    name: String,
    code: String,
    threshold: usize,
    per_unit: Money<'static, Currency>,
}

impl BulkDiscount {
    /// Create a bulk discount of `per_unit` off each unit of `code` once at
    /// least `threshold` units are in the basket.
    pub fn new(
        code: impl Into<String>,
        threshold: usize,
        per_unit: Money<'static, Currency>,
    ) -> Self {
        let code = code.into();

        Self {
            name: format!("Bulk discount ({code}, {threshold}+)"),
            code,
            threshold,
            per_unit,
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

    /// Return the minimum number of units that triggers the discount.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Return the amount taken off each unit.
    pub fn per_unit(&self) -> &Money<'static, Currency> {
        &self.per_unit
    }
}

impl Promotion for BulkDiscount {
    fn name(&self) -> &str {
        &self.name
    }

    fn discount<'a>(
        &self,
        items: &[String],
        catalog: &Catalog<'a>,
    ) -> Result<Money<'a, Currency>, PromotionError> {
        if !catalog.contains(&self.code) {
            return Ok(Money::from_minor(0, catalog.currency()));
        }

        let count = count_of(items, &self.code);

        if count < self.threshold {
            return Ok(Money::from_minor(0, catalog.currency()));
        }

        times(&self.code, &self.per_unit, count)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use crate::products::Product;

    use super::*;

    fn basket(codes: &[&str]) -> Vec<String> {
        codes.iter().map(ToString::to_string).collect()
    }

    fn strawberry_catalog<'a>() -> Result<Catalog<'a>, crate::catalog::CatalogError> {
        Catalog::with_products(
            [
                Product::new("SR1", "Strawberries", Money::from_minor(500, GBP)),
                Product::new("FR1", "Fruit tea", Money::from_minor(311, GBP)),
            ],
            GBP,
        )
    }

    fn strawberries_deal() -> BulkDiscount {
        BulkDiscount::new("SR1", 3, Money::from_minor(50, GBP))
    }

    #[test]
    fn below_threshold_gives_nothing() -> TestResult {
        let catalog = strawberry_catalog()?;

        let discount = strawberries_deal().discount(&basket(&["SR1", "SR1", "FR1"]), &catalog)?;

        assert_eq!(discount, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn threshold_discounts_every_unit() -> TestResult {
        let catalog = strawberry_catalog()?;

        let discount =
            strawberries_deal().discount(&basket(&["SR1", "SR1", "FR1", "SR1"]), &catalog)?;

        assert_eq!(discount, Money::from_minor(150, GBP));

        Ok(())
    }

    #[test]
    fn above_threshold_keeps_discounting_every_unit() -> TestResult {
        let catalog = strawberry_catalog()?;

        let discount = strawberries_deal().discount(&basket(&["SR1"; 5]), &catalog)?;

        assert_eq!(discount, Money::from_minor(250, GBP));

        Ok(())
    }

    #[test]
    fn withdrawn_product_gives_nothing() -> TestResult {
        let catalog = Catalog::with_products(
            [Product::new("FR1", "Fruit tea", Money::from_minor(311, GBP))],
            GBP,
        )?;

        let discount = strawberries_deal().discount(&basket(&["SR1"; 4]), &catalog)?;

        assert_eq!(discount, Money::from_minor(0, GBP));

        Ok(())
    }

    #[test]
    fn accessors_return_configuration() {
        let deal = strawberries_deal();

        assert_eq!(deal.code(), "SR1");
        assert_eq!(deal.threshold(), 3);
        assert_eq!(deal.per_unit(), &Money::from_minor(50, GBP));
        assert_eq!(deal.name(), "Bulk discount (SR1, 3+)");
    }
}
