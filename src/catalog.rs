//! Catalog
//!
//! An ordered, read-only list of products queried by code. Lookups are
//! case-sensitive and the first product with a given code wins, so a later
//! duplicate never shadows an earlier entry.

use std::slice;

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::products::Product;

/// Errors related to catalog construction.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// A product was supplied without a code (product index).
    #[error("Product {0} has an empty code")]
    EmptyCode(usize),

    /// A product has a price below zero (product index).
    #[error("Product {0} has a negative price")]
    NegativePrice(usize),

    /// A product's currency differs from the catalog currency (index, product currency, catalog currency).
    #[error("Product {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    products: Vec<Product<'a>>,

    /// Code -> position of the first product carrying that code
    index: FxHashMap<String, usize>,

    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Catalog {
            products: Vec::new(),
            index: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog from an ordered list of products.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::EmptyCode`]: a product has an empty code.
    /// - [`CatalogError::NegativePrice`]: a product has a price below zero.
    /// - [`CatalogError::CurrencyMismatch`]: a product is priced in a different currency.
    pub fn with_products(
        products: impl Into<Vec<Product<'a>>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let products = products.into();
        let mut index = FxHashMap::default();

        for (i, product) in products.iter().enumerate() {
            if product.code.is_empty() {
                return Err(CatalogError::EmptyCode(i));
            }

            if product.price().is_negative() {
                return Err(CatalogError::NegativePrice(i));
            }

            let product_currency = product.price().currency();

            if product_currency != currency {
                return Err(CatalogError::CurrencyMismatch(
                    i,
                    product_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            index.entry(product.code.clone()).or_insert(i);
        }

        Ok(Catalog {
            products,
            index,
            currency,
        })
    }

    /// Find the first product with the given code.
    pub fn find(&self, code: &str) -> Option<&Product<'a>> {
        self.index
            .get(code)
            .and_then(|&idx| self.products.get(idx))
    }

    /// Check whether a product with the given code is still sold.
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Iterate over the products in catalog order.
    pub fn iter(&self) -> slice::Iter<'_, Product<'a>> {
        self.products.iter()
    }

    /// Get the number of products in the catalog.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get the currency of the catalog.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

impl<'c, 'a> IntoIterator for &'c Catalog<'a> {
    type Item = &'c Product<'a>;
    type IntoIter = slice::Iter<'c, Product<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
