//! Pricing Rules
//!
//! The catalog and promotion list a basket is built from, loaded from YAML:
//!
//! ```yaml
//! currency: GBP
//! products:
//!   - code: FR1
//!     name: Fruit tea
//!     price: 3.11 GBP
//! promotions:
//!   - type: buy_one_get_one_free
//!     code: FR1
//! ```
//!
//! `products` is required and must be a list. `promotions` is optional and
//! defaults to no promotions, but must be a list when present. `currency`
//! defaults to the currency of the first product.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_norway::Value;
use thiserror::Error;
use tracing::debug;

use crate::{
    basket::Basket,
    catalog::{Catalog, CatalogError},
    products::Product,
    promotions::Promotion,
    rules::{
        products::{ProductConfig, parse_currency},
        promotions::PromotionConfig,
    },
};

pub mod products;
pub mod promotions;

/// Errors raised while loading pricing rules.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// IO error reading the rules file
    #[error("Failed to read pricing rules: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// The `products` key is missing
    #[error("Pricing rules need a list of products (code, name, price)")]
    MissingProducts,

    /// The `products` key is not a list
    #[error("Products must be a list of products (code, name, price)")]
    ProductsNotSequence,

    /// The `promotions` key is present but not a list
    #[error("Promotions must be a list")]
    PromotionsNotSequence,

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// A promotion amount is in a different currency (product code, promotion currency, catalog currency)
    #[error("Promotion on {0} is priced in {1}, but catalog has currency {2}")]
    PromotionCurrencyMismatch(String, &'static str, &'static str),

    /// No currency given and no products to take it from
    #[error("No currency given and no products loaded; currency unknown")]
    NoCurrency,

    /// The products do not form a valid catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Raw pricing rules document
#[derive(Debug, Deserialize)]
struct PricingRulesConfig {
    currency: Option<String>,

    products: Vec<ProductConfig>,

    #[serde(default)]
    promotions: Vec<PromotionConfig>,
}

/// A catalog together with the promotions that apply to it.
#[derive(Debug)]
pub struct PricingRules {
    catalog: Catalog<'static>,
    promotions: Vec<Box<dyn Promotion>>,
}

impl PricingRules {
    /// Create pricing rules from an existing catalog and promotions.
    pub fn new(catalog: Catalog<'static>, promotions: Vec<Box<dyn Promotion>>) -> Self {
        Self {
            catalog,
            promotions,
        }
    }

    /// Load pricing rules from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are not
    /// valid pricing rules (see [`PricingRules::from_yaml`]).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        debug!(path = %path.display(), "loading pricing rules");

        Self::from_yaml(&contents)
    }

    /// Parse pricing rules from a YAML document.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::MissingProducts`] / [`ConfigurationError::ProductsNotSequence`]:
    ///   `products` is absent or not a list.
    /// - [`ConfigurationError::PromotionsNotSequence`]: `promotions` is present but not a list.
    /// - [`ConfigurationError::Yaml`]: the document or an entry is malformed.
    /// - [`ConfigurationError::InvalidPrice`] / [`ConfigurationError::UnknownCurrency`]:
    ///   an amount cannot be parsed.
    /// - [`ConfigurationError::PromotionCurrencyMismatch`]: a promotion amount is
    ///   not in the catalog currency.
    /// - [`ConfigurationError::NoCurrency`]: no currency and no products.
    /// - [`ConfigurationError::Catalog`]: the products do not form a valid catalog.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigurationError> {
        let document: Value = serde_norway::from_str(yaml)?;

        match document.get("products") {
            None => return Err(ConfigurationError::MissingProducts),
            Some(products) if !products.is_sequence() => {
                return Err(ConfigurationError::ProductsNotSequence);
            }
            Some(_) => {}
        }

        if document
            .get("promotions")
            .is_some_and(|promotions| !promotions.is_sequence())
        {
            return Err(ConfigurationError::PromotionsNotSequence);
        }

        let config: PricingRulesConfig = serde_norway::from_value(document)?;

        let products = config
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let currency = match (config.currency.as_deref(), products.first()) {
            (Some(code), _) => parse_currency(code)?,
            (None, Some(product)) => product.price().currency(),
            (None, None) => return Err(ConfigurationError::NoCurrency),
        };

        let catalog = Catalog::with_products(products, currency)?;

        let promotions = config
            .promotions
            .into_iter()
            .map(|promotion| promotion.try_into_promotion(currency))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            products = catalog.len(),
            promotions = promotions.len(),
            currency = currency.iso_alpha_code,
            "loaded pricing rules"
        );

        Ok(Self::new(catalog, promotions))
    }

    /// Get the catalog
    pub fn catalog(&self) -> &Catalog<'static> {
        &self.catalog
    }

    /// Get the promotions, in the order they apply
    pub fn promotions(&self) -> &[Box<dyn Promotion>] {
        &self.promotions
    }

    /// Create an empty basket priced by these rules.
    pub fn basket(&self) -> Basket<'_> {
        Basket::with_promotions(&self.catalog, &self.promotions)
    }
}
