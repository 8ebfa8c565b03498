//! Order-value discount.
//!
//! Applied to the category-discounted items subtotal. Tier thresholds are
//! compared with a strict "greater than": a subtotal of exactly 500.00 gets
//! no discount under the standard table.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PricingConfig;
use crate::models::AuditStep;

/// The result of applying the order-value discount, including the audit step.
#[derive(Debug, Clone)]
pub struct ValueDiscountResult {
    /// The discount rate applied (zero when no tier matched).
    pub rate: Decimal,
    /// The threshold of the matched tier, if any.
    pub threshold: Option<Decimal>,
    /// The subtotal after the discount.
    pub discounted_subtotal: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Applies the order-value discount to an items subtotal.
///
/// # Examples
///
/// ```
/// use checkout_cost::calculation::apply_value_discount;
/// use checkout_cost::config::PricingConfig;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let config = PricingConfig::standard();
/// let result = apply_value_discount(Decimal::from_str("680.00").unwrap(), &config, 2);
/// assert_eq!(result.discounted_subtotal, Decimal::from_str("612.00").unwrap());
/// ```
pub fn apply_value_discount(
    subtotal: Decimal,
    config: &PricingConfig,
    step_number: u32,
) -> ValueDiscountResult {
    let tier = config.value_discount_tier(subtotal);
    let rate = tier.map(|t| t.rate).unwrap_or(Decimal::ZERO);
    let threshold = tier.map(|t| t.threshold);
    let discounted_subtotal = subtotal * (Decimal::ONE - rate);

    debug!(
        subtotal = %subtotal,
        rate = %rate,
        discounted_subtotal = %discounted_subtotal,
        "Applied order-value discount"
    );

    let reasoning = match threshold {
        Some(threshold) => format!(
            "${} > ${}: ${} x (1 - {}) = ${}",
            subtotal.normalize(),
            threshold.normalize(),
            subtotal.normalize(),
            rate.normalize(),
            discounted_subtotal.normalize()
        ),
        None => format!(
            "No order-value discount - ${} does not exceed any threshold",
            subtotal.normalize()
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "value_discount".to_string(),
        rule_name: "Order Value Discount".to_string(),
        input: serde_json::json!({
            "subtotal": subtotal.normalize().to_string()
        }),
        output: serde_json::json!({
            "discount_applied": threshold.is_some(),
            "threshold": threshold.map(|t| t.normalize().to_string()),
            "rate": rate.normalize().to_string(),
            "discounted_subtotal": discounted_subtotal.normalize().to_string()
        }),
        reasoning,
    };

    ValueDiscountResult {
        rate,
        threshold,
        discounted_subtotal,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn apply(subtotal: &str) -> ValueDiscountResult {
        apply_value_discount(dec(subtotal), &PricingConfig::standard(), 1)
    }

    #[test]
    fn test_exactly_500_gets_no_discount() {
        let result = apply("500.00");
        assert_eq!(result.rate, Decimal::ZERO);
        assert_eq!(result.threshold, None);
        assert_eq!(result.discounted_subtotal, dec("500.00"));
    }

    #[test]
    fn test_500_01_gets_10_percent() {
        let result = apply("500.01");
        assert_eq!(result.rate, dec("0.10"));
        assert_eq!(result.threshold, Some(dec("500.00")));
        assert_eq!(result.discounted_subtotal, dec("450.009"));
    }

    #[test]
    fn test_exactly_1000_gets_10_percent() {
        let result = apply("1000.00");
        assert_eq!(result.rate, dec("0.10"));
        assert_eq!(result.discounted_subtotal, dec("900.00"));
    }

    #[test]
    fn test_1000_01_gets_20_percent() {
        let result = apply("1000.01");
        assert_eq!(result.rate, dec("0.20"));
        assert_eq!(result.discounted_subtotal, dec("800.008"));
    }

    #[test]
    fn test_zero_subtotal_is_unchanged() {
        let result = apply("0");
        assert_eq!(result.discounted_subtotal, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step_for_discounted_subtotal() {
        let result = apply_value_discount(dec("680.00"), &PricingConfig::standard(), 3);

        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "value_discount");
        assert_eq!(
            result.audit_step.output["discount_applied"].as_bool().unwrap(),
            true
        );
        assert_eq!(
            result.audit_step.output["threshold"].as_str().unwrap(),
            "500"
        );
        assert!(result.audit_step.reasoning.contains("$680 > $500"));
        assert!(result.audit_step.reasoning.contains("$612"));
    }

    #[test]
    fn test_audit_step_without_discount() {
        let result = apply("499.99");

        assert!(result.audit_step.output["threshold"].is_null());
        assert!(result.audit_step.reasoning.contains("No order-value discount"));
    }
}
