//! The checkout cost calculator.
//!
//! [`CostCalculator`] runs the stages of a checkout cost calculation in order
//! (validation, category discount, order-value discount, shipping, rounding)
//! and assembles the [`CostBreakdown`] with its audit trace.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{ConfigLoader, PricingConfig};
use crate::error::{CostError, CostResult};
use crate::models::{
    AuditStep, AuditTrace, Cart, CostBreakdown, CustomerTier, Region, ShippingBreakdown,
};
use crate::request::CheckoutRequest;

use super::category_discount::calculate_category_subtotals;
use super::rounding::round_currency;
use super::shipping::calculate_shipping;
use super::validation::validate_line_items;
use super::value_discount::apply_value_discount;

/// Computes checkout totals against a pricing table.
///
/// The calculator is stateless apart from its shared, immutable pricing
/// table; clones are cheap and may be used from many threads at once.
///
/// # Example
///
/// ```
/// use checkout_cost::calculation::CostCalculator;
/// use checkout_cost::models::{Cart, CustomerTier, LineItem, Product, ProductCategory, Region};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let calculator = CostCalculator::standard();
/// let product = Product {
///     id: "sku_001".to_string(),
///     name: "Novel".to_string(),
///     category: ProductCategory::Book,
///     unit_price: Decimal::from_str("100.00").unwrap(),
///     weight_kg: Decimal::from_str("1.0").unwrap(),
///     length_cm: Decimal::ZERO,
///     width_cm: Decimal::ZERO,
///     height_cm: Decimal::ZERO,
///     fragile: false,
/// };
/// let cart = Cart::new(vec![LineItem::new(product, 8)]);
///
/// let total = calculator
///     .compute_total(&cart, Region::Southeast, CustomerTier::Bronze)
///     .unwrap();
/// assert_eq!(total.to_string(), "640.00");
/// ```
#[derive(Debug, Clone)]
pub struct CostCalculator {
    config: Arc<PricingConfig>,
}

impl CostCalculator {
    /// Creates a calculator after validating the pricing table.
    pub fn new(config: PricingConfig) -> CostResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Creates a calculator using the built-in standard pricing table.
    pub fn standard() -> Self {
        Self {
            config: Arc::new(PricingConfig::standard()),
        }
    }

    /// Creates a calculator from a loaded configuration.
    pub fn from_loader(loader: ConfigLoader) -> Self {
        Self {
            config: Arc::new(loader.into_config()),
        }
    }

    /// Returns the pricing table in use.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Computes the checkout total, rounded half-up to 2 decimal places.
    ///
    /// An empty cart costs 0.00.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLineItem` if any item has a zero quantity or a
    /// negative unit price, or if its amounts do not fit in a `Decimal`.
    /// Returns `InvalidInput` if a cart-level amount does not fit. No
    /// partial result is produced.
    pub fn compute_total(
        &self,
        cart: &Cart,
        region: Region,
        tier: CustomerTier,
    ) -> CostResult<Decimal> {
        self.calculate(cart, region, tier)
            .map(|breakdown| breakdown.total)
    }

    /// Computes the checkout total for a request whose fields may be absent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the cart, its item list, the region or the
    /// tier is missing, and the errors of [`CostCalculator::compute_total`].
    pub fn compute_total_for_request(&self, request: CheckoutRequest) -> CostResult<Decimal> {
        self.calculate_for_request(request)
            .map(|breakdown| breakdown.total)
    }

    /// Computes the full breakdown for a request whose fields may be absent.
    pub fn calculate_for_request(&self, request: CheckoutRequest) -> CostResult<CostBreakdown> {
        let (cart, region, tier) = request.into_parts().inspect_err(|err| {
            warn!(error = %err, "Rejected checkout request");
        })?;
        self.calculate(&cart, region, tier)
    }

    /// Computes the full cost breakdown with its audit trace.
    ///
    /// # Errors
    ///
    /// Same as [`CostCalculator::compute_total`].
    pub fn calculate(
        &self,
        cart: &Cart,
        region: Region,
        tier: CustomerTier,
    ) -> CostResult<CostBreakdown> {
        let start_time = Instant::now();
        let calculation_id = Uuid::new_v4();
        let config = self.config.as_ref();

        debug!(
            calculation_id = %calculation_id,
            items = cart.items.len(),
            region = region.as_str(),
            tier = tier.as_str(),
            "Starting checkout cost calculation"
        );

        validate_line_items(&cart.items)?;

        let mut audit_steps: Vec<AuditStep> = Vec::new();
        let mut warnings = Vec::new();
        let mut step_number: u32 = 1;

        if cart.is_empty() {
            audit_steps.push(AuditStep {
                step_number,
                rule_id: "empty_cart".to_string(),
                rule_name: "Empty Cart".to_string(),
                input: serde_json::json!({ "line_items": 0 }),
                output: serde_json::json!({ "total": "0.00" }),
                reasoning: "Cart has no items, total is 0.00".to_string(),
            });

            let breakdown = CostBreakdown {
                calculation_id,
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                region,
                tier,
                category_subtotals: Vec::new(),
                items_subtotal: Decimal::ZERO,
                value_discount_rate: Decimal::ZERO,
                discounted_subtotal: Decimal::ZERO,
                shipping: ShippingBreakdown {
                    total_weight: Decimal::ZERO,
                    weight_band: None,
                    rate_per_kg: Decimal::ZERO,
                    minimum_fee: Decimal::ZERO,
                    fragile_surcharge: Decimal::ZERO,
                    weight_charge: Decimal::ZERO,
                    region_multiplier: config.region_multiplier(region),
                    tier_factor: config.tier_shipping_factor(tier),
                    shipping: Decimal::ZERO,
                },
                total: round_currency(Decimal::ZERO),
                audit_trace: AuditTrace {
                    steps: audit_steps,
                    warnings,
                    duration_us: start_time.elapsed().as_micros() as u64,
                },
            };

            info!(
                calculation_id = %calculation_id,
                total = %breakdown.total,
                "Empty cart, checkout total is zero"
            );
            return Ok(breakdown);
        }

        // Category subtotal and discount
        let category_result = calculate_category_subtotals(&cart.items, config, step_number)?;
        audit_steps.push(category_result.audit_step);
        step_number += 1;

        // Order-value discount
        let value_result = apply_value_discount(category_result.items_subtotal, config, step_number);
        audit_steps.push(value_result.audit_step);
        step_number += 1;

        // Shipping
        let shipping_result = calculate_shipping(&cart.items, region, tier, config, step_number)?;
        let steps_count = shipping_result.audit_steps.len();
        audit_steps.extend(shipping_result.audit_steps);
        warnings.extend(shipping_result.warnings);
        step_number += steps_count as u32;

        // Total
        let unrounded = value_result
            .discounted_subtotal
            .checked_add(shipping_result.breakdown.shipping)
            .ok_or_else(|| CostError::out_of_range("checkout total"))?;
        let total = round_currency(unrounded);
        audit_steps.push(AuditStep {
            step_number,
            rule_id: "total".to_string(),
            rule_name: "Checkout Total".to_string(),
            input: serde_json::json!({
                "discounted_subtotal": value_result.discounted_subtotal.normalize().to_string(),
                "shipping": shipping_result.breakdown.shipping.normalize().to_string()
            }),
            output: serde_json::json!({
                "total": total.to_string()
            }),
            reasoning: format!(
                "${} + ${} = ${}, rounded half-up to ${}",
                value_result.discounted_subtotal.normalize(),
                shipping_result.breakdown.shipping.normalize(),
                unrounded.normalize(),
                total
            ),
        });

        let duration = start_time.elapsed();
        info!(
            calculation_id = %calculation_id,
            items = cart.items.len(),
            total = %total,
            warnings = warnings.len(),
            duration_us = duration.as_micros(),
            "Checkout cost calculation completed"
        );

        Ok(CostBreakdown {
            calculation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            region,
            tier,
            category_subtotals: category_result.subtotals,
            items_subtotal: category_result.items_subtotal,
            value_discount_rate: value_result.rate,
            discounted_subtotal: value_result.discounted_subtotal,
            shipping: shipping_result.breakdown,
            total,
            audit_trace: AuditTrace {
                steps: audit_steps,
                warnings,
                duration_us: duration.as_micros() as u64,
            },
        })
    }
}

impl Default for CostCalculator {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DiscountsConfig, ShippingConfig, WeightBand};
    use crate::error::{AMOUNT_OUT_OF_RANGE_MESSAGE, MISSING_CART_MESSAGE};
    use crate::models::{LineItem, Product, ProductCategory};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_item(category: ProductCategory, price: &str, quantity: u32, weight: &str) -> LineItem {
        LineItem::new(
            Product {
                id: format!("sku_{}", category.as_str()),
                name: "Item".to_string(),
                category,
                unit_price: dec(price),
                weight_kg: dec(weight),
                length_cm: Decimal::ZERO,
                width_cm: Decimal::ZERO,
                height_cm: Decimal::ZERO,
                fragile: false,
            },
            quantity,
        )
    }

    #[test]
    fn test_single_item_exempt_band_total() {
        let cart = Cart::new(vec![create_item(ProductCategory::Book, "100.00", 1, "5.00")]);
        let total = CostCalculator::standard()
            .compute_total(&cart, Region::Southeast, CustomerTier::Bronze)
            .unwrap();
        assert_eq!(total, dec("100.00"));
    }

    #[test]
    fn test_eight_units_with_both_discounts_and_minimum_fee() {
        let cart = Cart::new(vec![create_item(ProductCategory::Book, "100.00", 8, "1.0")]);
        let breakdown = CostCalculator::standard()
            .calculate(&cart, Region::Southeast, CustomerTier::Bronze)
            .unwrap();

        assert_eq!(breakdown.items_subtotal, dec("680.00"));
        assert_eq!(breakdown.value_discount_rate, dec("0.10"));
        assert_eq!(breakdown.discounted_subtotal, dec("612.00"));
        assert_eq!(breakdown.shipping.shipping, dec("28.00"));
        assert_eq!(breakdown.total.to_string(), "640.00");
    }

    #[test]
    fn test_empty_cart_costs_zero() {
        let breakdown = CostCalculator::standard()
            .calculate(&Cart::default(), Region::North, CustomerTier::Bronze)
            .unwrap();

        assert_eq!(breakdown.total.to_string(), "0.00");
        assert!(breakdown.category_subtotals.is_empty());
        assert_eq!(breakdown.shipping.weight_band, None);
        assert_eq!(breakdown.audit_trace.steps.len(), 1);
        assert_eq!(breakdown.audit_trace.steps[0].rule_id, "empty_cart");
    }

    #[test]
    fn test_empty_cart_costs_zero_even_without_exempt_band() {
        let standard = PricingConfig::standard();
        let config = PricingConfig::new(
            standard.metadata().clone(),
            DiscountsConfig {
                category_discounts: standard.category_discounts().to_vec(),
                value_discounts: standard.value_discounts().to_vec(),
            },
            ShippingConfig {
                weight_bands: vec![WeightBand {
                    label: "FLAT".to_string(),
                    max_weight: None,
                    rate_per_kg: dec("1.00"),
                    minimum_fee_exempt: false,
                }],
                ..standard.shipping().clone()
            },
            standard.regions().clone(),
        );
        let calculator = CostCalculator::new(config).unwrap();

        let total = calculator
            .compute_total(&Cart::default(), Region::Southeast, CustomerTier::Bronze)
            .unwrap();
        assert_eq!(total, Decimal::ZERO);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let standard = PricingConfig::standard();
        let config = PricingConfig::new(
            standard.metadata().clone(),
            DiscountsConfig {
                category_discounts: vec![],
                value_discounts: vec![],
            },
            ShippingConfig {
                weight_bands: vec![],
                ..standard.shipping().clone()
            },
            standard.regions().clone(),
        );

        assert!(matches!(
            CostCalculator::new(config),
            Err(CostError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_invalid_item_produces_no_result() {
        let cart = Cart::new(vec![
            create_item(ProductCategory::Book, "100.00", 1, "1.0"),
            create_item(ProductCategory::Toy, "-1.00", 1, "1.0"),
        ]);
        let result =
            CostCalculator::standard().compute_total(&cart, Region::Southeast, CustomerTier::Bronze);

        let err = result.unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("sku_toy"));
    }

    #[test]
    fn test_overflowing_line_total_is_rejected() {
        let mut item = create_item(ProductCategory::Electronics, "0", 2, "1.0");
        item.product.unit_price = Decimal::MAX;
        let cart = Cart::new(vec![item]);

        let result =
            CostCalculator::standard().compute_total(&cart, Region::Southeast, CustomerTier::Bronze);
        match result {
            Err(CostError::InvalidLineItem {
                product_id,
                message,
            }) => {
                assert_eq!(product_id, "sku_electronics");
                assert_eq!(message, AMOUNT_OUT_OF_RANGE_MESSAGE);
            }
            other => panic!("Expected InvalidLineItem error, got {:?}", other),
        }
    }

    #[test]
    fn test_oversized_package_is_rejected() {
        let side = Decimal::from(10_000_000_000i64);
        let mut item = create_item(ProductCategory::Furniture, "10.00", 1, "1.0");
        item.product.length_cm = side;
        item.product.width_cm = side;
        item.product.height_cm = side;
        let cart = Cart::new(vec![item]);

        let err = CostCalculator::standard()
            .compute_total(&cart, Region::Southeast, CustomerTier::Bronze)
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains(AMOUNT_OUT_OF_RANGE_MESSAGE));
    }

    #[test]
    fn test_request_without_cart_is_rejected() {
        let request = CheckoutRequest {
            cart: None,
            region: Some(Region::Southeast),
            tier: Some(CustomerTier::Bronze),
        };
        let err = CostCalculator::standard()
            .compute_total_for_request(request)
            .unwrap_err();
        assert_eq!(err.to_string(), MISSING_CART_MESSAGE);
    }

    #[test]
    fn test_request_roundtrip_matches_typed_entry_point() {
        let cart = Cart::new(vec![create_item(ProductCategory::Clothing, "150.00", 4, "1.0")]);
        let calculator = CostCalculator::standard();

        let typed = calculator
            .compute_total(&cart, Region::Southeast, CustomerTier::Bronze)
            .unwrap();
        let via_request = calculator
            .compute_total_for_request(CheckoutRequest::new(
                cart,
                Region::Southeast,
                CustomerTier::Bronze,
            ))
            .unwrap();

        assert_eq!(typed, dec("513.00"));
        assert_eq!(typed, via_request);
    }

    #[test]
    fn test_audit_trace_covers_every_stage() {
        let cart = Cart::new(vec![create_item(ProductCategory::Furniture, "100.00", 1, "7.0")]);
        let breakdown = CostCalculator::standard()
            .calculate(&cart, Region::South, CustomerTier::Silver)
            .unwrap();

        let ids: Vec<&str> = breakdown
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec![
                "category_discount",
                "value_discount",
                "taxable_weight",
                "weight_band",
                "region_tier_adjustment",
                "total"
            ]
        );

        let numbers: Vec<u32> = breakdown
            .audit_trace
            .steps
            .iter()
            .map(|s| s.step_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_breakdown_metadata() {
        let cart = Cart::new(vec![create_item(ProductCategory::Food, "10.00", 1, "1.0")]);
        let breakdown = CostCalculator::standard()
            .calculate(&cart, Region::Northeast, CustomerTier::Gold)
            .unwrap();

        assert_eq!(breakdown.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(breakdown.region, Region::Northeast);
        assert_eq!(breakdown.tier, CustomerTier::Gold);
        assert_eq!(breakdown.shipping.tier_factor, Decimal::ZERO);
        assert_eq!(
            breakdown.shipping.region_multiplier,
            CostCalculator::standard()
                .config()
                .region_multiplier(Region::Northeast)
        );
    }

    #[test]
    fn test_calculator_is_send_sync_and_clone() {
        fn assert_traits<T: Send + Sync + Clone>() {}
        assert_traits::<CostCalculator>();
    }
}
