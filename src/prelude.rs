//! Checkout prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    basket::{Basket, BasketError},
    catalog::{Catalog, CatalogError},
    pricing::{TotalPriceError, total_price},
    products::Product,
    promotions::{BulkDiscount, BuyOneGetOneFree, Promotion, PromotionError, count_of},
    receipt::{PromotionLine, Receipt, ReceiptError},
    rules::{ConfigurationError, PricingRules, promotions::PromotionConfig},
};
