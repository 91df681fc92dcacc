//! Basket Example
//!
//! Loads a pricing rules file, fills a basket and prints the receipt.
//!
//! Use `-r` to choose the pricing rules file
//! Use `-l` to set the log level when `RUST_LOG` is unset
//!
//! ```sh
//! cargo run --example basket -- FR1 SR1 FR1 CF1
//! cargo run --example basket -- -l debug FR1,FR1
//! ```

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use checkout::{rules::PricingRules, utils::ExampleBasketArgs};

/// Basket Example
pub fn main() -> Result<()> {
    let args = ExampleBasketArgs::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    let rules = PricingRules::from_path(&args.rules)?;
    let mut basket = rules.basket();

    for entry in &args.items {
        basket.add_list(entry)?;
    }

    info!(items = basket.len(), "pricing basket");

    let receipt = basket.receipt()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt.write_to(&mut handle)?;

    Ok(())
}
