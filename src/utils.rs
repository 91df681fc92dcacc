//! Utils

use std::path::PathBuf;

use clap::Parser;

/// Arguments for the basket example
#[derive(Debug, Parser)]
pub struct ExampleBasketArgs {
    /// Pricing rules file (products and promotions)
    #[clap(short, long, default_value = "fixtures/pricing_rules/default.yml")]
    pub rules: PathBuf,

    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG` is unset
    #[clap(short, long, default_value = "info")]
    pub log_level: String,

    /// Product codes to add to the basket, either separately or comma separated
    #[clap(required = true)]
    pub items: Vec<String>,
}
