//! Product Configuration

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{products::Product, rules::ConfigurationError};

/// Product entry in the pricing rules
#[derive(Debug, Deserialize)]
pub struct ProductConfig {
    /// Product code
    pub code: String,

    /// Product name
    pub name: String,

    /// Product price (e.g., "3.11 GBP")
    pub price: String,
}

impl TryFrom<ProductConfig> for Product<'static> {
    type Error = ConfigurationError;

    fn try_from(config: ProductConfig) -> Result<Self, Self::Error> {
        let price = parse_money(&config.price)?;

        Ok(Product::new(config.code, config.name, price))
    }
}

/// Parse a money string (e.g., "3.11 GBP") into a `Money` value.
///
/// # Errors
///
/// See [`parse_price`].
pub fn parse_money(s: &str) -> Result<Money<'static, Currency>, ConfigurationError> {
    let (minor_units, currency) = parse_price(s)?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Parse price string (e.g., "2.99 GBP") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY",
/// if the amount is not a non-negative decimal, if it is more precise than
/// the currency's minor unit, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), ConfigurationError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    if parts.len() != 2 {
        return Err(ConfigurationError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    }

    let amount = parts
        .first()
        .ok_or_else(|| ConfigurationError::InvalidPrice(s.to_string()))?
        .parse::<Decimal>()
        .map_err(|_err| ConfigurationError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(ConfigurationError::InvalidPrice(format!(
            "Prices cannot be negative, got: {s}"
        )));
    }

    let currency_code = parts
        .get(1)
        .ok_or_else(|| ConfigurationError::InvalidPrice(s.to_string()))?;

    let currency = parse_currency(currency_code)?;

    if amount.scale() > currency.exponent {
        return Err(ConfigurationError::InvalidPrice(format!(
            "{currency_code} amounts have at most {} decimal places, got: {s}",
            currency.exponent
        )));
    }

    let minor_units = 10_i64
        .checked_pow(currency.exponent)
        .and_then(|scale| amount.checked_mul(Decimal::from(scale)))
        .and_then(|value| value.to_i64())
        .ok_or_else(|| ConfigurationError::InvalidPrice(s.to_string()))?;

    Ok((minor_units, currency))
}

/// Parse an ISO currency code.
///
/// # Errors
///
/// Returns [`ConfigurationError::UnknownCurrency`] for unsupported codes.
pub fn parse_currency(code: &str) -> Result<&'static Currency, ConfigurationError> {
    match code {
        "GBP" => Ok(GBP),
        "USD" => Ok(USD),
        "EUR" => Ok(EUR),
        other => Err(ConfigurationError::UnknownCurrency(other.to_string())),
    }
}
