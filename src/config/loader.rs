//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading pricing
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{CostError, CostResult};
use crate::models::{CustomerTier, Region};

use super::types::{
    DiscountsConfig, PricingConfig, PricingMetadata, RegionsConfig, ShippingConfig, WeightBand,
};

/// Loads and provides access to pricing configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query discounts, weight bands, and multipliers.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/standard/
/// ├── pricing.yaml    # Pricing table metadata
/// ├── discounts.yaml  # Category and order-value discount tiers
/// ├── shipping.yaml   # Weight bands, fees and volumetric divisor
/// └── regions.yaml    # Region multipliers and tier shipping factors
/// ```
///
/// # Example
///
/// ```no_run
/// use checkout_cost::config::ConfigLoader;
/// use checkout_cost::models::Region;
///
/// let loader = ConfigLoader::load("./config/standard").unwrap();
/// println!("North multiplier: {}", loader.region_multiplier(Region::North));
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PricingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/standard")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Any required field is missing from the configuration
    /// - The loaded values fail [`PricingConfig::validate`]
    pub fn load<P: AsRef<Path>>(path: P) -> CostResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<PricingMetadata>(&path.join("pricing.yaml"))?;
        let discounts = Self::load_yaml::<DiscountsConfig>(&path.join("discounts.yaml"))?;
        let shipping = Self::load_yaml::<ShippingConfig>(&path.join("shipping.yaml"))?;
        let regions = Self::load_yaml::<RegionsConfig>(&path.join("regions.yaml"))?;

        let config = PricingConfig::new(metadata, discounts, shipping, regions);
        config.validate()?;

        debug!(
            path = %path.display(),
            name = %config.metadata().name,
            version = %config.metadata().version,
            "Loaded pricing configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> CostResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| CostError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| CostError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying pricing configuration.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Consumes the loader and returns the pricing configuration.
    pub fn into_config(self) -> PricingConfig {
        self.config
    }

    /// Returns the pricing metadata.
    pub fn metadata(&self) -> &PricingMetadata {
        self.config.metadata()
    }

    /// Gets the category discount rate for a number of units of one category.
    pub fn category_discount_rate(&self, quantity: u64) -> Decimal {
        self.config.category_discount_rate(quantity)
    }

    /// Gets the order-value discount rate for a subtotal.
    pub fn value_discount_rate(&self, subtotal: Decimal) -> Decimal {
        self.config.value_discount_rate(subtotal)
    }

    /// Gets the weight band for a total shipment weight.
    ///
    /// A loaded configuration always has an unbounded last band, so this
    /// never fails after a successful [`ConfigLoader::load`].
    pub fn weight_band(&self, weight: Decimal) -> CostResult<&WeightBand> {
        self.config
            .weight_band(weight)
            .ok_or_else(|| CostError::InvalidConfig {
                field: "shipping.weight_bands".to_string(),
                message: "must not be empty".to_string(),
            })
    }

    /// Gets the shipping multiplier of a region.
    pub fn region_multiplier(&self, region: Region) -> Decimal {
        self.config.region_multiplier(region)
    }

    /// Gets the shipping factor of a customer tier.
    pub fn tier_shipping_factor(&self, tier: CustomerTier) -> Decimal {
        self.config.tier_shipping_factor(tier)
    }
}
