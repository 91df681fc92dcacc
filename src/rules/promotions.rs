//! Promotion Configuration

use rusty_money::iso::Currency;
use serde::Deserialize;

use crate::{
    promotions::{BulkDiscount, BuyOneGetOneFree, Promotion},
    rules::{ConfigurationError, products::parse_money},
};

/// Promotion entry in the pricing rules
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PromotionConfig {
    /// Buy one get one free promotion
    BuyOneGetOneFree {
        /// Targeted product code
        code: String,

        /// Optional display name
        name: Option<String>,
    },

    /// Bulk discount promotion
    BulkDiscount {
        /// Targeted product code
        code: String,

        /// Minimum number of units before the discount applies
        threshold: usize,

        /// Amount off each unit (e.g., "0.50 GBP")
        per_unit: String,

        /// Optional display name
        name: Option<String>,
    },
}

impl PromotionConfig {
    /// Build the configured promotion for a catalog priced in `currency`.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::InvalidPrice`] / [`ConfigurationError::UnknownCurrency`]:
    ///   a configured amount cannot be parsed.
    /// - [`ConfigurationError::PromotionCurrencyMismatch`]: a configured amount is
    ///   not in the catalog currency.
    pub fn try_into_promotion(
        self,
        currency: &'static Currency,
    ) -> Result<Box<dyn Promotion>, ConfigurationError> {
        match self {
            PromotionConfig::BuyOneGetOneFree { code, name } => {
                let promotion = BuyOneGetOneFree::new(code);

                Ok(Box::new(match name {
                    Some(name) => promotion.with_name(name),
                    None => promotion,
                }))
            }
            PromotionConfig::BulkDiscount {
                code,
                threshold,
                per_unit,
                name,
            } => {
                let per_unit = parse_money(&per_unit)?;

                if per_unit.currency() != currency {
                    return Err(ConfigurationError::PromotionCurrencyMismatch(
                        code,
                        per_unit.currency().iso_alpha_code,
                        currency.iso_alpha_code,
                    ));
                }

                let promotion = BulkDiscount::new(code, threshold, per_unit);

                Ok(Box::new(match name {
                    Some(name) => promotion.with_name(name),
                    None => promotion,
                }))
            }
        }
    }
}
