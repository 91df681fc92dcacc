//! Checkout
//!
//! Prices a basket of product codes against a catalog, then takes off the
//! discounts given by an ordered list of pluggable promotions.
//!
//! ```no_run
//! use checkout::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let rules = PricingRules::from_path("fixtures/pricing_rules/default.yml")?;
//! let mut basket = rules.basket();
//!
//! basket.add_many(["FR1", "SR1", "FR1", "CF1"]);
//!
//! let total = basket.total()?;
//! # Ok(())
//! # }
//! ```

pub mod basket;
pub mod catalog;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod receipt;
pub mod rules;
pub mod utils;
