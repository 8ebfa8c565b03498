//! Cost breakdown models for the checkout cost calculator.
//!
//! This module contains the [`CostBreakdown`] type and its associated structures
//! that capture all outputs from a cost calculation, including per-category
//! subtotals, the value discount, the shipping components, and an audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CustomerTier, ProductCategory, Region};

/// Quantity and money totals for one product category.
///
/// # Example
///
/// ```
/// use checkout_cost::models::{CategorySubtotal, ProductCategory};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let subtotal = CategorySubtotal {
///     category: ProductCategory::Book,
///     quantity: 8,
///     gross_subtotal: Decimal::from_str("800.00").unwrap(),
///     discount_rate: Decimal::from_str("0.15").unwrap(),
///     discounted_subtotal: Decimal::from_str("680.00").unwrap(),
/// };
/// assert_eq!(subtotal.discount_amount(), Decimal::from_str("120.00").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySubtotal {
    /// The category these totals belong to.
    pub category: ProductCategory,
    /// Units of this category across all lines.
    pub quantity: u64,
    /// Sum of line totals before the category discount.
    pub gross_subtotal: Decimal,
    /// The quantity-tier discount rate applied (e.g. 0.10 for 10%).
    pub discount_rate: Decimal,
    /// The subtotal after the category discount.
    pub discounted_subtotal: Decimal,
}

impl CategorySubtotal {
    /// Returns the amount taken off by the category discount.
    pub fn discount_amount(&self) -> Decimal {
        self.gross_subtotal - self.discounted_subtotal
    }
}

/// The components of the shipping fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingBreakdown {
    /// Sum of taxable weight times quantity, in kilograms.
    pub total_weight: Decimal,
    /// Label of the weight band selected for the total weight.
    ///
    /// `None` for an empty cart, which ships nothing.
    pub weight_band: Option<String>,
    /// Per-kilogram rate of the selected band.
    pub rate_per_kg: Decimal,
    /// Minimum fee added (zero when the band is exempt).
    pub minimum_fee: Decimal,
    /// Flat surcharge for fragile units.
    pub fragile_surcharge: Decimal,
    /// Total weight times the band rate.
    pub weight_charge: Decimal,
    /// Multiplier of the customer's region.
    pub region_multiplier: Decimal,
    /// Multiplier of the customer's tier (1 for bronze, 0.5 for silver, 0 for gold).
    pub tier_factor: Decimal,
    /// Final shipping fee, unrounded.
    pub shipping: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag data that was accepted but looks suspicious.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use checkout_cost::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 42,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a checkout cost calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the calculator that produced this breakdown.
    pub engine_version: String,
    /// The customer's region.
    pub region: Region,
    /// The customer's loyalty tier.
    pub tier: CustomerTier,
    /// Category totals, in order of first appearance in the cart.
    pub category_subtotals: Vec<CategorySubtotal>,
    /// Sum of the discounted category subtotals.
    pub items_subtotal: Decimal,
    /// The order-value discount rate applied to `items_subtotal`.
    pub value_discount_rate: Decimal,
    /// Items subtotal after the order-value discount.
    pub discounted_subtotal: Decimal,
    /// Shipping fee components.
    pub shipping: ShippingBreakdown,
    /// Discounted subtotal plus shipping, rounded half-up to 2 decimal places.
    pub total: Decimal,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
