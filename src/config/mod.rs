//! Configuration loading and management for the checkout cost calculator.
//!
//! This module provides the pricing table used by every calculation: discount
//! tiers, weight bands, fees, and region and tier multipliers. The table is
//! either built in ([`PricingConfig::standard`]) or loaded from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use checkout_cost::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/standard").unwrap();
//! println!("Loaded pricing: {}", loader.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CategoryDiscountTier, DiscountsConfig, PricingConfig, PricingMetadata, RegionMultipliers,
    RegionsConfig, ShippingConfig, TierShippingFactors, ValueDiscountTier, WeightBand,
};
