//! Configuration types for checkout pricing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{CostError, CostResult};
use crate::models::{CustomerTier, Region};

/// Metadata about the pricing table.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingMetadata {
    /// The human-readable name of the pricing table.
    pub name: String,
    /// The version or effective date of the pricing table.
    pub version: String,
    /// ISO 4217 currency code of all monetary values.
    pub currency: String,
}

/// A quantity tier of the per-category discount.
///
/// Applies when the units of a category reach `min_quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryDiscountTier {
    /// Minimum units of a category for this tier to apply.
    pub min_quantity: u64,
    /// The discount rate (e.g. 0.05 for 5% off).
    pub rate: Decimal,
}

/// A tier of the order-value discount.
///
/// Applies when the subtotal is strictly greater than `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValueDiscountTier {
    /// The subtotal that must be exceeded.
    pub threshold: Decimal,
    /// The discount rate (e.g. 0.10 for 10% off).
    pub rate: Decimal,
}

/// Discounts configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscountsConfig {
    /// Quantity tiers of the category discount.
    pub category_discounts: Vec<CategoryDiscountTier>,
    /// Tiers of the order-value discount.
    pub value_discounts: Vec<ValueDiscountTier>,
}

/// A weight range with its shipping rate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeightBand {
    /// Short label of the band (e.g. "A").
    pub label: String,
    /// Inclusive upper bound in kilograms. `None` means unbounded.
    #[serde(default)]
    pub max_weight: Option<Decimal>,
    /// Charge per kilogram of total weight.
    pub rate_per_kg: Decimal,
    /// Whether shipments in this band skip the minimum fee.
    #[serde(default)]
    pub minimum_fee_exempt: bool,
}

impl WeightBand {
    /// Returns true if `weight` falls at or below this band's upper bound.
    pub fn contains(&self, weight: Decimal) -> bool {
        self.max_weight.is_none_or(|max| weight <= max)
    }
}

/// Shipping configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ShippingConfig {
    /// Divisor turning cubic centimetres into volumetric kilograms.
    pub volumetric_divisor: Decimal,
    /// Flat surcharge per fragile unit.
    pub fragile_surcharge_per_unit: Decimal,
    /// Flat fee added unless the weight band is exempt.
    pub minimum_fee: Decimal,
    /// Weight bands in ascending order of upper bound.
    pub weight_bands: Vec<WeightBand>,
}

/// Shipping multiplier for each region.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionMultipliers {
    /// Multiplier for [`Region::Southeast`].
    pub southeast: Decimal,
    /// Multiplier for [`Region::South`].
    pub south: Decimal,
    /// Multiplier for [`Region::Northeast`].
    pub northeast: Decimal,
    /// Multiplier for [`Region::CentralWest`].
    pub central_west: Decimal,
    /// Multiplier for [`Region::North`].
    pub north: Decimal,
}

impl RegionMultipliers {
    /// Returns the multiplier for a region.
    pub fn get(&self, region: Region) -> Decimal {
        match region {
            Region::Southeast => self.southeast,
            Region::South => self.south,
            Region::Northeast => self.northeast,
            Region::CentralWest => self.central_west,
            Region::North => self.north,
        }
    }
}

/// Shipping multiplier for each customer tier.
#[derive(Debug, Clone, Deserialize)]
pub struct TierShippingFactors {
    /// Factor for [`CustomerTier::Bronze`].
    pub bronze: Decimal,
    /// Factor for [`CustomerTier::Silver`].
    pub silver: Decimal,
    /// Factor for [`CustomerTier::Gold`].
    pub gold: Decimal,
}

impl TierShippingFactors {
    /// Returns the factor for a tier.
    pub fn get(&self, tier: CustomerTier) -> Decimal {
        match tier {
            CustomerTier::Bronze => self.bronze,
            CustomerTier::Silver => self.silver,
            CustomerTier::Gold => self.gold,
        }
    }
}

/// Regions configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionsConfig {
    /// Multiplier per region.
    pub region_multipliers: RegionMultipliers,
    /// Factor per customer tier.
    pub tier_shipping_factors: TierShippingFactors,
}

/// The complete pricing configuration.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in a pricing configuration directory, or built in via
/// [`PricingConfig::standard`].
///
/// # Example
///
/// ```
/// use checkout_cost::config::PricingConfig;
/// use checkout_cost::models::Region;
/// use rust_decimal::Decimal;
///
/// let config = PricingConfig::standard();
/// assert_eq!(config.region_multiplier(Region::North), Decimal::new(130, 2));
/// assert_eq!(config.category_discount_rate(5), Decimal::new(10, 2));
/// ```
#[derive(Debug, Clone)]
pub struct PricingConfig {
    /// Pricing table metadata.
    metadata: PricingMetadata,
    /// Category discount tiers (sorted highest `min_quantity` first).
    category_discounts: Vec<CategoryDiscountTier>,
    /// Value discount tiers (sorted highest threshold first).
    value_discounts: Vec<ValueDiscountTier>,
    /// Shipping configuration (bands sorted ascending, unbounded last).
    shipping: ShippingConfig,
    /// Region and tier multipliers.
    regions: RegionsConfig,
}

impl PricingConfig {
    /// Creates a new PricingConfig from its component parts.
    ///
    /// Tiers and bands are sorted into lookup order; call
    /// [`PricingConfig::validate`] to check the values.
    pub fn new(
        metadata: PricingMetadata,
        discounts: DiscountsConfig,
        shipping: ShippingConfig,
        regions: RegionsConfig,
    ) -> Self {
        let mut category_discounts = discounts.category_discounts;
        category_discounts.sort_by(|a, b| b.min_quantity.cmp(&a.min_quantity));

        let mut value_discounts = discounts.value_discounts;
        value_discounts.sort_by(|a, b| b.threshold.cmp(&a.threshold));

        let mut shipping = shipping;
        shipping
            .weight_bands
            .sort_by(|a, b| match (a.max_weight, b.max_weight) {
                (Some(a), Some(b)) => a.cmp(&b),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            });

        Self {
            metadata,
            category_discounts,
            value_discounts,
            shipping,
            regions,
        }
    }

    /// Returns the built-in standard pricing table.
    pub fn standard() -> Self {
        let metadata = PricingMetadata {
            name: "Standard Checkout Pricing".to_string(),
            version: "2025-01-01".to_string(),
            currency: "BRL".to_string(),
        };

        let discounts = DiscountsConfig {
            category_discounts: vec![
                CategoryDiscountTier {
                    min_quantity: 8,
                    rate: Decimal::new(15, 2),
                },
                CategoryDiscountTier {
                    min_quantity: 5,
                    rate: Decimal::new(10, 2),
                },
                CategoryDiscountTier {
                    min_quantity: 3,
                    rate: Decimal::new(5, 2),
                },
            ],
            value_discounts: vec![
                ValueDiscountTier {
                    threshold: Decimal::new(100000, 2),
                    rate: Decimal::new(20, 2),
                },
                ValueDiscountTier {
                    threshold: Decimal::new(50000, 2),
                    rate: Decimal::new(10, 2),
                },
            ],
        };

        let shipping = ShippingConfig {
            volumetric_divisor: Decimal::from(6000),
            fragile_surcharge_per_unit: Decimal::new(500, 2),
            minimum_fee: Decimal::new(1200, 2),
            weight_bands: vec![
                WeightBand {
                    label: "A".to_string(),
                    max_weight: Some(Decimal::new(500, 2)),
                    rate_per_kg: Decimal::new(0, 2),
                    minimum_fee_exempt: true,
                },
                WeightBand {
                    label: "B".to_string(),
                    max_weight: Some(Decimal::new(1000, 2)),
                    rate_per_kg: Decimal::new(200, 2),
                    minimum_fee_exempt: false,
                },
                WeightBand {
                    label: "C".to_string(),
                    max_weight: Some(Decimal::new(5000, 2)),
                    rate_per_kg: Decimal::new(400, 2),
                    minimum_fee_exempt: false,
                },
                WeightBand {
                    label: "D".to_string(),
                    max_weight: None,
                    rate_per_kg: Decimal::new(700, 2),
                    minimum_fee_exempt: false,
                },
            ],
        };

        let regions = RegionsConfig {
            region_multipliers: RegionMultipliers {
                southeast: Decimal::new(100, 2),
                south: Decimal::new(105, 2),
                northeast: Decimal::new(110, 2),
                central_west: Decimal::new(120, 2),
                north: Decimal::new(130, 2),
            },
            tier_shipping_factors: TierShippingFactors {
                bronze: Decimal::new(100, 2),
                silver: Decimal::new(50, 2),
                gold: Decimal::new(0, 2),
            },
        };

        Self::new(metadata, discounts, shipping, regions)
    }

    /// Checks that every value of the configuration is usable.
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> CostResult<()> {
        for tier in &self.category_discounts {
            check_rate("discounts.category_discounts.rate", tier.rate)?;
        }
        for tier in &self.value_discounts {
            check_rate("discounts.value_discounts.rate", tier.rate)?;
            check_non_negative("discounts.value_discounts.threshold", tier.threshold)?;
        }

        let shipping = &self.shipping;
        if shipping.volumetric_divisor <= Decimal::ZERO {
            return Err(invalid_config(
                "shipping.volumetric_divisor",
                "must be greater than zero",
            ));
        }
        check_non_negative(
            "shipping.fragile_surcharge_per_unit",
            shipping.fragile_surcharge_per_unit,
        )?;
        check_non_negative("shipping.minimum_fee", shipping.minimum_fee)?;

        let Some(last_band) = shipping.weight_bands.last() else {
            return Err(invalid_config("shipping.weight_bands", "must not be empty"));
        };
        if last_band.max_weight.is_some() {
            return Err(invalid_config(
                "shipping.weight_bands",
                "the last band must have no max_weight",
            ));
        }
        let mut previous_max: Option<Decimal> = None;
        for band in &shipping.weight_bands {
            check_non_negative("shipping.weight_bands.rate_per_kg", band.rate_per_kg)?;
            if let Some(max) = band.max_weight {
                if previous_max.is_some_and(|previous| max <= previous) {
                    return Err(invalid_config(
                        "shipping.weight_bands",
                        format!("band '{}' does not increase max_weight", band.label),
                    ));
                }
                previous_max = Some(max);
            } else if !std::ptr::eq(band, last_band) {
                return Err(invalid_config(
                    "shipping.weight_bands",
                    format!("band '{}' is unbounded but not last", band.label),
                ));
            }
        }

        for region in Region::ALL {
            check_non_negative(
                "regions.region_multipliers",
                self.regions.region_multipliers.get(region),
            )?;
        }
        for tier in CustomerTier::ALL {
            check_non_negative(
                "regions.tier_shipping_factors",
                self.regions.tier_shipping_factors.get(tier),
            )?;
        }

        Ok(())
    }

    /// Returns the pricing metadata.
    pub fn metadata(&self) -> &PricingMetadata {
        &self.metadata
    }

    /// Returns the category discount tiers, highest quantity first.
    pub fn category_discounts(&self) -> &[CategoryDiscountTier] {
        &self.category_discounts
    }

    /// Returns the value discount tiers, highest threshold first.
    pub fn value_discounts(&self) -> &[ValueDiscountTier] {
        &self.value_discounts
    }

    /// Returns the shipping configuration.
    pub fn shipping(&self) -> &ShippingConfig {
        &self.shipping
    }

    /// Returns the region and tier multipliers.
    pub fn regions(&self) -> &RegionsConfig {
        &self.regions
    }

    /// Returns the category discount rate for a number of units, or zero.
    pub fn category_discount_rate(&self, quantity: u64) -> Decimal {
        self.category_discounts
            .iter()
            .find(|tier| quantity >= tier.min_quantity)
            .map(|tier| tier.rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the value discount tier whose threshold `subtotal` strictly exceeds.
    pub fn value_discount_tier(&self, subtotal: Decimal) -> Option<&ValueDiscountTier> {
        self.value_discounts
            .iter()
            .find(|tier| subtotal > tier.threshold)
    }

    /// Returns the value discount rate for a subtotal, or zero.
    pub fn value_discount_rate(&self, subtotal: Decimal) -> Decimal {
        self.value_discount_tier(subtotal)
            .map(|tier| tier.rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns the weight band containing `weight`.
    ///
    /// Only `None` when the configuration has no bands at all.
    pub fn weight_band(&self, weight: Decimal) -> Option<&WeightBand> {
        self.shipping
            .weight_bands
            .iter()
            .find(|band| band.contains(weight))
            .or_else(|| self.shipping.weight_bands.last())
    }

    /// Returns the shipping multiplier of a region.
    pub fn region_multiplier(&self, region: Region) -> Decimal {
        self.regions.region_multipliers.get(region)
    }

    /// Returns the shipping factor of a customer tier.
    pub fn tier_shipping_factor(&self, tier: CustomerTier) -> Decimal {
        self.regions.tier_shipping_factors.get(tier)
    }
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self::standard()
    }
}

fn invalid_config(field: &str, message: impl Into<String>) -> CostError {
    CostError::InvalidConfig {
        field: field.to_string(),
        message: message.into(),
    }
}

fn check_non_negative(field: &str, value: Decimal) -> CostResult<()> {
    if value < Decimal::ZERO {
        return Err(invalid_config(field, format!("{} must not be negative", value)));
    }
    Ok(())
}

fn check_rate(field: &str, rate: Decimal) -> CostResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(invalid_config(
            field,
            format!("{} is outside the range 0 to 1", rate),
        ));
    }
    Ok(())
}
