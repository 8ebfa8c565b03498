//! Shipping fee calculation.
//!
//! The shipping fee is built in the following order:
//!
//! 1. Sum taxable weight times quantity over every line into the total weight,
//!    adding the fragile surcharge per fragile unit along the way.
//! 2. Select the weight band containing the total weight.
//! 3. Add the minimum fee unless the band is exempt.
//! 4. Add total weight times the band's per-kilogram rate.
//! 5. Multiply by the region multiplier, then by the tier factor.
//!
//! Nothing here is rounded; only the checkout total is.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PricingConfig;
use crate::error::{CostError, CostResult};
use crate::models::{AuditStep, AuditWarning, CustomerTier, LineItem, Region, ShippingBreakdown};

use super::taxable_weight::taxable_weight;

/// Warning code raised when a product has a negative physical weight.
pub const NEGATIVE_WEIGHT_WARNING: &str = "NEGATIVE_WEIGHT";

/// The result of a shipping calculation, including audit steps and warnings.
#[derive(Debug, Clone)]
pub struct ShippingResult {
    /// The components and final value of the shipping fee.
    pub breakdown: ShippingBreakdown,
    /// One audit step per stage: weight, band, region and tier.
    pub audit_steps: Vec<AuditStep>,
    /// Warnings about suspicious product data.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates the shipping fee for a set of line items.
///
/// # Arguments
///
/// * `items` - The validated line items of the cart
/// * `region` - The customer's delivery region
/// * `tier` - The customer's loyalty tier
/// * `config` - The pricing table
/// * `step_number` - The step number of the first audit step
///
/// # Errors
///
/// Returns `InvalidConfig` if the pricing table has no weight bands,
/// `InvalidLineItem` if a line's weight does not fit in a `Decimal`, and
/// `InvalidInput` if a shipping amount does not.
///
/// # Examples
///
/// ```
/// use checkout_cost::calculation::calculate_shipping;
/// use checkout_cost::config::PricingConfig;
/// use checkout_cost::models::{CustomerTier, LineItem, Product, ProductCategory, Region};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let product = Product {
///     id: "sku_001".to_string(),
///     name: "Lamp".to_string(),
///     category: ProductCategory::Furniture,
///     unit_price: Decimal::from(100),
///     weight_kg: Decimal::from(7),
///     length_cm: Decimal::ZERO,
///     width_cm: Decimal::ZERO,
///     height_cm: Decimal::ZERO,
///     fragile: false,
/// };
///
/// // 12.00 minimum fee + 7kg x 2.00
/// let result = calculate_shipping(
///     &[LineItem::new(product, 1)],
///     Region::Southeast,
///     CustomerTier::Bronze,
///     &PricingConfig::standard(),
///     1,
/// )
/// .unwrap();
/// assert_eq!(result.breakdown.shipping, Decimal::from_str("26.00").unwrap());
/// ```
pub fn calculate_shipping(
    items: &[LineItem],
    region: Region,
    tier: CustomerTier,
    config: &PricingConfig,
    step_number: u32,
) -> CostResult<ShippingResult> {
    let shipping_config = config.shipping();
    let mut warnings = Vec::new();
    let mut audit_steps = Vec::with_capacity(3);

    // Step 1: total weight and fragile surcharge
    let mut total_weight = Decimal::ZERO;
    let mut fragile_units: u64 = 0;
    for item in items {
        let unit_weight = taxable_weight(&item.product, config)?;
        total_weight = unit_weight
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|line_weight| total_weight.checked_add(line_weight))
            .ok_or_else(|| CostError::line_out_of_range(&item.product.id))?;
        if item.product.fragile {
            fragile_units += u64::from(item.quantity);
        }
        if item.product.weight_kg < Decimal::ZERO {
            warnings.push(AuditWarning {
                code: NEGATIVE_WEIGHT_WARNING.to_string(),
                message: format!(
                    "Product '{}' has negative weight {} kg; taxable weight is the greater of physical and volumetric weight (here {} kg)",
                    item.product.id,
                    item.product.weight_kg,
                    unit_weight.normalize()
                ),
                severity: "medium".to_string(),
            });
        }
    }
    let fragile_surcharge = shipping_config
        .fragile_surcharge_per_unit
        .checked_mul(Decimal::from(fragile_units))
        .ok_or_else(|| CostError::out_of_range("fragile surcharge"))?;

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "taxable_weight".to_string(),
        rule_name: "Taxable Weight".to_string(),
        input: serde_json::json!({
            "line_items": items.len(),
            "volumetric_divisor": shipping_config.volumetric_divisor.normalize().to_string()
        }),
        output: serde_json::json!({
            "total_weight": total_weight.normalize().to_string(),
            "fragile_units": fragile_units,
            "fragile_surcharge": fragile_surcharge.normalize().to_string()
        }),
        reasoning: format!(
            "Total taxable weight {} kg; {} fragile units x ${} = ${}",
            total_weight.normalize(),
            fragile_units,
            shipping_config.fragile_surcharge_per_unit.normalize(),
            fragile_surcharge.normalize()
        ),
    });

    // Steps 2-4: weight band, minimum fee, weight charge
    let band = config
        .weight_band(total_weight)
        .ok_or_else(|| CostError::InvalidConfig {
            field: "shipping.weight_bands".to_string(),
            message: "must not be empty".to_string(),
        })?;
    let minimum_fee = if band.minimum_fee_exempt {
        Decimal::ZERO
    } else {
        shipping_config.minimum_fee
    };
    let weight_charge = total_weight
        .checked_mul(band.rate_per_kg)
        .ok_or_else(|| CostError::out_of_range("weight charge"))?;
    let base_shipping = fragile_surcharge
        .checked_add(minimum_fee)
        .and_then(|fees| fees.checked_add(weight_charge))
        .ok_or_else(|| CostError::out_of_range("shipping fee"))?;

    debug!(
        total_weight = %total_weight,
        band = %band.label,
        rate_per_kg = %band.rate_per_kg,
        minimum_fee = %minimum_fee,
        "Selected weight band"
    );

    audit_steps.push(AuditStep {
        step_number: step_number + 1,
        rule_id: "weight_band".to_string(),
        rule_name: "Weight Band Rate".to_string(),
        input: serde_json::json!({
            "total_weight": total_weight.normalize().to_string()
        }),
        output: serde_json::json!({
            "band": band.label,
            "rate_per_kg": band.rate_per_kg.normalize().to_string(),
            "minimum_fee_exempt": band.minimum_fee_exempt,
            "minimum_fee": minimum_fee.normalize().to_string(),
            "weight_charge": weight_charge.normalize().to_string(),
            "base_shipping": base_shipping.normalize().to_string()
        }),
        reasoning: format!(
            "Band {}: ${} fragile + ${} minimum fee + {} kg x ${} = ${}",
            band.label,
            fragile_surcharge.normalize(),
            minimum_fee.normalize(),
            total_weight.normalize(),
            band.rate_per_kg.normalize(),
            base_shipping.normalize()
        ),
    });

    // Step 5: region multiplier and tier factor
    let region_multiplier = config.region_multiplier(region);
    let tier_factor = config.tier_shipping_factor(tier);
    let shipping = base_shipping
        .checked_mul(region_multiplier)
        .and_then(|regional| regional.checked_mul(tier_factor))
        .ok_or_else(|| CostError::out_of_range("shipping fee"))?;

    debug!(
        region = region.as_str(),
        tier = tier.as_str(),
        shipping = %shipping,
        "Applied region and tier adjustments"
    );

    audit_steps.push(AuditStep {
        step_number: step_number + 2,
        rule_id: "region_tier_adjustment".to_string(),
        rule_name: "Region and Tier Adjustment".to_string(),
        input: serde_json::json!({
            "base_shipping": base_shipping.normalize().to_string(),
            "region": region.as_str(),
            "tier": tier.as_str()
        }),
        output: serde_json::json!({
            "region_multiplier": region_multiplier.normalize().to_string(),
            "tier_factor": tier_factor.normalize().to_string(),
            "shipping": shipping.normalize().to_string()
        }),
        reasoning: format!(
            "${} x {} ({}) x {} ({}) = ${}",
            base_shipping.normalize(),
            region_multiplier.normalize(),
            region.as_str(),
            tier_factor.normalize(),
            tier.as_str(),
            shipping.normalize()
        ),
    });

    Ok(ShippingResult {
        breakdown: ShippingBreakdown {
            total_weight,
            weight_band: Some(band.label.clone()),
            rate_per_kg: band.rate_per_kg,
            minimum_fee,
            fragile_surcharge,
            weight_charge,
            region_multiplier,
            tier_factor,
            shipping,
        },
        audit_steps,
        warnings,
    })
}
