//! Basket

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::{
    catalog::Catalog,
    pricing::{TotalPriceError, total_price},
    promotions::{Promotion, PromotionError},
    receipt::{PromotionLine, Receipt},
};

/// Errors related to adding items to a basket or totalling it.
#[derive(Debug, Error, PartialEq)]
pub enum BasketError {
    /// A list of product codes could not be parsed.
    #[error("Invalid product code list: {0}")]
    InvalidArgument(String),

    /// An item in the basket has no matching product in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A promotion failed to calculate its discount.
    #[error("Promotion '{name}' failed: {source}")]
    Promotion {
        /// Name of the failing promotion
        name: String,

        /// Underlying promotion error
        source: PromotionError,
    },

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl From<TotalPriceError> for BasketError {
    fn from(err: TotalPriceError) -> Self {
        match err {
            TotalPriceError::ProductNotFound(code) => BasketError::ProductNotFound(code),
            TotalPriceError::Money(err) => BasketError::Money(err),
        }
    }
}

/// Basket
///
/// Borrows its catalog and promotions; only the item codes belong to the
/// basket. Codes are not checked against the catalog until the basket is
/// totalled, so withdrawn products can be added but fail at checkout.
#[derive(Debug)]
pub struct Basket<'a> {
    catalog: &'a Catalog<'a>,
    promotions: &'a [Box<dyn Promotion>],
    items: Vec<String>,
}

impl<'a> Basket<'a> {
    /// Create an empty basket with no promotions.
    pub fn new(catalog: &'a Catalog<'a>) -> Self {
        Self::with_promotions(catalog, &[])
    }

    /// Create an empty basket applying the given promotions, in order.
    pub fn with_promotions(
        catalog: &'a Catalog<'a>,
        promotions: &'a [Box<dyn Promotion>],
    ) -> Self {
        Basket {
            catalog,
            promotions,
            items: Vec::new(),
        }
    }

    /// Add a single item by product code.
    pub fn add(&mut self, code: impl Into<String>) {
        self.items.push(code.into());
    }

    /// Add several items at once, preserving their order.
    pub fn add_many<I>(&mut self, codes: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.items.extend(codes.into_iter().map(Into::into));
    }

    /// Add items from a comma-separated list of product codes, e.g. `"FR1, SR1, FR1"`.
    ///
    /// Nothing is added unless the whole list is valid.
    ///
    /// # Errors
    ///
    /// Returns [`BasketError::InvalidArgument`] if the list is blank, has an
    /// empty entry, or an entry containing whitespace.
    pub fn add_list(&mut self, list: &str) -> Result<(), BasketError> {
        if list.trim().is_empty() {
            return Err(BasketError::InvalidArgument(
                "expected at least one product code".to_string(),
            ));
        }

        let codes = list
            .split(',')
            .map(str::trim)
            .map(|code| {
                if code.is_empty() || code.contains(char::is_whitespace) {
                    Err(BasketError::InvalidArgument(format!(
                        "'{list}' is not a comma separated list of product codes"
                    )))
                } else {
                    Ok(code)
                }
            })
            .collect::<Result<SmallVec<[&str; 8]>, _>>()?;

        self.add_many(codes);

        Ok(())
    }

    /// Remove every item from the basket.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Get the item codes in the order they were added.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Get the number of items in the basket.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the basket is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the catalog the basket prices against.
    pub fn catalog(&self) -> &'a Catalog<'a> {
        self.catalog
    }

    /// Get the promotions applied by the basket.
    pub fn promotions(&self) -> &'a [Box<dyn Promotion>] {
        self.promotions
    }

    /// Get the currency of the basket.
    pub fn currency(&self) -> &'static Currency {
        self.catalog.currency()
    }

    /// Calculate the gross total of the basket, before promotions.
    ///
    /// # Errors
    ///
    /// - [`BasketError::ProductNotFound`]: the first item whose code is not in the catalog.
    /// - [`BasketError::Money`]: money arithmetic or currency mismatch error.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, BasketError> {
        Ok(total_price(&self.items, self.catalog)?)
    }

    /// Calculate the combined discount of every promotion.
    ///
    /// # Errors
    ///
    /// - [`BasketError::Promotion`]: a promotion failed to calculate its discount.
    /// - [`BasketError::Money`]: money arithmetic or currency mismatch error.
    pub fn discount(&self) -> Result<Money<'a, Currency>, BasketError> {
        let lines = self.promotion_lines()?;

        sum_lines(&lines, self.currency())
    }

    /// Calculate the net total: gross total minus all promotion discounts.
    ///
    /// The result is not floored, so discounts larger than the gross total
    /// produce a negative amount.
    ///
    /// # Errors
    ///
    /// See [`Basket::receipt`].
    pub fn total(&self) -> Result<Money<'a, Currency>, BasketError> {
        Ok(self.receipt()?.total())
    }

    /// Price the basket and return the full breakdown.
    ///
    /// Every item is priced before any promotion runs; promotions then run
    /// once each, in the order they were registered.
    ///
    /// # Errors
    ///
    /// - [`BasketError::ProductNotFound`]: the first item whose code is not in the catalog.
    /// - [`BasketError::Promotion`]: a promotion failed to calculate its discount.
    /// - [`BasketError::Money`]: money arithmetic or currency mismatch error.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(items = self.items.len(), promotions = self.promotions.len())
    )]
    pub fn receipt(&self) -> Result<Receipt<'a>, BasketError> {
        let subtotal = self.subtotal()?;
        let lines = self.promotion_lines()?;
        let discount = sum_lines(&lines, self.currency())?;
        let total = subtotal.sub(discount)?;

        debug!(%subtotal, %discount, %total, "priced basket");

        Ok(Receipt::new(subtotal, lines, total))
    }

    fn promotion_lines(&self) -> Result<SmallVec<[PromotionLine<'a>; 4]>, BasketError> {
        self.promotions
            .iter()
            .map(|promotion| -> Result<PromotionLine<'a>, BasketError> {
                let discount = promotion
                    .discount(&self.items, self.catalog)
                    .map_err(|source| BasketError::Promotion {
                        name: promotion.name().to_string(),
                        source,
                    })?;

                if discount.is_negative() {
                    warn!(
                        promotion = promotion.name(),
                        %discount,
                        "promotion returned a negative discount"
                    );
                } else {
                    trace!(promotion = promotion.name(), %discount, "applied promotion");
                }

                Ok(PromotionLine::new(promotion.name(), discount))
            })
            .collect()
    }
}

fn sum_lines<'a>(
    lines: &[PromotionLine<'a>],
    currency: &'static Currency,
) -> Result<Money<'a, Currency>, BasketError> {
    lines
        .iter()
        .try_fold(Money::from_minor(0, currency), |acc, line| {
            acc.add(*line.discount())
        })
        .map_err(BasketError::from)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use crate::{
        catalog::CatalogError,
        products::Product,
        promotions::{BulkDiscount, BuyOneGetOneFree},
    };

    use super::*;

    fn test_catalog<'a>() -> Result<Catalog<'a>, CatalogError> {
        Catalog::with_products(
            [
                Product::new("FR1", "Fruit tea", Money::from_minor(311, iso::GBP)),
                Product::new("SR1", "Strawberries", Money::from_minor(500, iso::GBP)),
                Product::new("CF1", "Coffee", Money::from_minor(1123, iso::GBP)),
            ],
            iso::GBP,
        )
    }

    fn test_promotions() -> [Box<dyn Promotion>; 2] {
        [
            Box::new(BuyOneGetOneFree::new("FR1")),
            Box::new(BulkDiscount::new("SR1", 3, Money::from_minor(50, iso::GBP))),
        ]
    }

    #[derive(Debug)]
    struct Fixed(i64);

    impl Promotion for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn discount<'a>(
            &self,
            _items: &[String],
            catalog: &Catalog<'a>,
        ) -> Result<Money<'a, Currency>, PromotionError> {
            Ok(Money::from_minor(self.0, catalog.currency()))
        }
    }

    #[derive(Debug)]
    struct Failing;

    impl Promotion for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn discount<'a>(
            &self,
            _items: &[String],
            _catalog: &Catalog<'a>,
        ) -> Result<Money<'a, Currency>, PromotionError> {
            Err(PromotionError::Overflow("FR1".to_string()))
        }
    }

    #[test]
    fn new_basket_is_empty() -> TestResult {
        let catalog = test_catalog()?;
        let basket = Basket::new(&catalog);

        assert!(basket.is_empty());
        assert!(basket.promotions().is_empty());
        assert_eq!(basket.currency(), iso::GBP);

        Ok(())
    }

    #[test]
    fn add_appends_in_order() -> TestResult {
        let catalog = test_catalog()?;
        let mut basket = Basket::new(&catalog);

        basket.add("SR1");
        basket.add(String::from("FR1"));

        assert_eq!(basket.items(), ["SR1", "FR1"]);

        Ok(())
    }

    #[test]
    fn add_defers_catalog_validation() -> TestResult {
        let catalog = test_catalog()?;
        let mut basket = Basket::new(&catalog);

        basket.add("XX1");

        assert_eq!(basket.len(), 1);
        assert_eq!(
            basket.total(),
            Err(BasketError::ProductNotFound("XX1".to_string()))
        );

        Ok(())
    }

    #[test]
    fn add_many_accepts_arrays_and_vecs() -> TestResult {
        let catalog = test_catalog()?;
        let mut basket = Basket::new(&catalog);

        basket.add_many(["FR1", "SR1"]);
        basket.add_many(vec![String::from("CF1")]);

        assert_eq!(basket.items(), ["FR1", "SR1", "CF1"]);

        Ok(())
    }

    #[test]
    fn add_list_splits_on_commas() -> TestResult {
        let catalog = test_catalog()?;
        let mut basket = Basket::new(&catalog);

        basket.add_list("FR1, SR1,FR1 ,CF1")?;

        assert_eq!(basket.items(), ["FR1", "SR1", "FR1", "CF1"]);

        Ok(())
    }

    #[test]
    fn add_list_rejects_blank_input() -> TestResult {
        let catalog = test_catalog()?;
        let mut basket = Basket::new(&catalog);

        assert!(matches!(
            basket.add_list("   "),
            Err(BasketError::InvalidArgument(_))
        ));

        Ok(())
    }

    #[test]
    fn add_list_rejects_empty_entries_without_adding() -> TestResult {
        let catalog = test_catalog()?;
        let mut basket = Basket::new(&catalog);

        assert!(matches!(
            basket.add_list("FR1,,SR1"),
            Err(BasketError::InvalidArgument(_))
        ));
        assert!(matches!(
            basket.add_list("FR1 SR1"),
            Err(BasketError::InvalidArgument(_))
        ));
        assert!(basket.is_empty());

        Ok(())
    }

    #[test]
    fn clear_empties_items() -> TestResult {
        let catalog = test_catalog()?;
        let promotions = test_promotions();
        let mut basket = Basket::with_promotions(&catalog, &promotions);

        basket.add_many(["FR1", "FR1"]);
        basket.clear();

        assert!(basket.is_empty());
        assert_eq!(basket.total()?, Money::from_minor(0, iso::GBP));
        assert_eq!(basket.promotions().len(), 2);

        Ok(())
    }

    #[test]
    fn subtotal_ignores_promotions() -> TestResult {
        let catalog = test_catalog()?;
        let promotions = test_promotions();
        let mut basket = Basket::with_promotions(&catalog, &promotions);

        basket.add_many(["FR1", "FR1"]);

        assert_eq!(basket.subtotal()?, Money::from_minor(622, iso::GBP));
        assert_eq!(basket.discount()?, Money::from_minor(311, iso::GBP));
        assert_eq!(basket.total()?, Money::from_minor(311, iso::GBP));

        Ok(())
    }

    #[test]
    fn total_reports_first_unknown_code() -> TestResult {
        let catalog = test_catalog()?;
        let mut basket = Basket::new(&catalog);

        basket.add_many(["FR1", "AB1", "CD2"]);

        assert_eq!(
            basket.total(),
            Err(BasketError::ProductNotFound("AB1".to_string()))
        );

        Ok(())
    }

    #[test]
    fn total_is_not_floored_at_zero() -> TestResult {
        let catalog = test_catalog()?;
        let promotions: [Box<dyn Promotion>; 1] = [Box::new(Fixed(1000))];
        let mut basket = Basket::with_promotions(&catalog, &promotions);

        basket.add("FR1");

        assert_eq!(basket.total()?, Money::from_minor(-689, iso::GBP));

        Ok(())
    }

    #[test]
    fn negative_discounts_are_summed_as_is() -> TestResult {
        let catalog = test_catalog()?;
        let promotions: [Box<dyn Promotion>; 2] = [Box::new(Fixed(-100)), Box::new(Fixed(30))];
        let mut basket = Basket::with_promotions(&catalog, &promotions);

        basket.add("FR1");

        assert_eq!(basket.total()?, Money::from_minor(381, iso::GBP));

        Ok(())
    }

    #[test]
    fn failing_promotion_is_reported_by_name() -> TestResult {
        let catalog = test_catalog()?;
        let promotions: [Box<dyn Promotion>; 2] = [Box::new(Fixed(10)), Box::new(Failing)];
        let mut basket = Basket::with_promotions(&catalog, &promotions);

        basket.add("FR1");

        assert_eq!(
            basket.total(),
            Err(BasketError::Promotion {
                name: "failing".to_string(),
                source: PromotionError::Overflow("FR1".to_string()),
            })
        );

        Ok(())
    }

    #[test]
    fn receipt_lists_promotions_in_registration_order() -> TestResult {
        let catalog = test_catalog()?;
        let promotions = test_promotions();
        let mut basket = Basket::with_promotions(&catalog, &promotions);

        basket.add_many(["SR1", "SR1", "FR1", "SR1"]);

        let receipt = basket.receipt()?;
        let names: Vec<&str> = receipt.lines().iter().map(PromotionLine::name).collect();

        assert_eq!(
            names,
            ["Buy one get one free (FR1)", "Bulk discount (SR1, 3+)"]
        );
        assert_eq!(receipt.subtotal(), Money::from_minor(1811, iso::GBP));
        assert_eq!(receipt.total(), Money::from_minor(1661, iso::GBP));

        Ok(())
    }
}
