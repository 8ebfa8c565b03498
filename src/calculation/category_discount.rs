//! Per-category quantity discount.
//!
//! Items are grouped by product category. Each group's units select a
//! discount tier that is applied to the group's subtotal, and the discounted
//! group subtotals are summed into the items subtotal.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PricingConfig;
use crate::error::{CostError, CostResult};
use crate::models::{AuditStep, CategorySubtotal, LineItem, ProductCategory};

/// The result of the category discount stage, including the audit step.
#[derive(Debug, Clone)]
pub struct CategoryDiscountResult {
    /// One entry per category, in order of first appearance.
    pub subtotals: Vec<CategorySubtotal>,
    /// Sum of the discounted category subtotals.
    pub items_subtotal: Decimal,
    /// The audit step recording this stage.
    pub audit_step: AuditStep,
}

/// Groups items by category and applies the quantity-tier discount per group.
///
/// With the standard table: 8 or more units take 15% off, 5 or more take
/// 10%, 3 or more take 5%, fewer take nothing.
///
/// # Arguments
///
/// * `items` - The validated line items of the cart
/// * `config` - The pricing table supplying the discount tiers
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns `InvalidLineItem` if a line or category total does not fit in a
/// `Decimal`, and `InvalidInput` if the items subtotal does not.
///
/// # Examples
///
/// ```
/// use checkout_cost::calculation::calculate_category_subtotals;
/// use checkout_cost::config::PricingConfig;
/// use checkout_cost::models::{LineItem, Product, ProductCategory};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
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
///
/// let result = calculate_category_subtotals(
///     &[LineItem::new(product, 3)],
///     &PricingConfig::standard(),
///     1,
/// )
/// .unwrap();
/// assert_eq!(result.items_subtotal, Decimal::from_str("285.00").unwrap());
/// ```
pub fn calculate_category_subtotals(
    items: &[LineItem],
    config: &PricingConfig,
    step_number: u32,
) -> CostResult<CategoryDiscountResult> {
    let mut index: HashMap<ProductCategory, usize> = HashMap::new();
    let mut groups: Vec<(ProductCategory, u64, Decimal)> = Vec::new();

    for item in items {
        let category = item.product.category;
        let position = *index.entry(category).or_insert_with(|| {
            groups.push((category, 0, Decimal::ZERO));
            groups.len() - 1
        });
        let line_total = item.line_total()?;
        let group = &mut groups[position];
        group.1 += u64::from(item.quantity);
        group.2 = group
            .2
            .checked_add(line_total)
            .ok_or_else(|| CostError::line_out_of_range(&item.product.id))?;
    }

    let subtotals = groups
        .into_iter()
        .map(|(category, quantity, gross_subtotal)| -> CostResult<CategorySubtotal> {
            let discount_rate = config.category_discount_rate(quantity);
            let discounted_subtotal = gross_subtotal
                .checked_mul(Decimal::ONE - discount_rate)
                .ok_or_else(|| CostError::out_of_range("category subtotal"))?;
            debug!(
                category = category.as_str(),
                quantity,
                gross_subtotal = %gross_subtotal,
                discount_rate = %discount_rate,
                "Applied category discount"
            );
            Ok(CategorySubtotal {
                category,
                quantity,
                gross_subtotal,
                discount_rate,
                discounted_subtotal,
            })
        })
        .collect::<CostResult<Vec<_>>>()?;

    let items_subtotal = subtotals
        .iter()
        .try_fold(Decimal::ZERO, |sum, s| sum.checked_add(s.discounted_subtotal))
        .ok_or_else(|| CostError::out_of_range("items subtotal"))?;

    let groups_json: Vec<serde_json::Value> = subtotals
        .iter()
        .map(|s| {
            serde_json::json!({
                "category": s.category.as_str(),
                "quantity": s.quantity,
                "gross_subtotal": s.gross_subtotal.normalize().to_string(),
                "discount_rate": s.discount_rate.normalize().to_string(),
                "discounted_subtotal": s.discounted_subtotal.normalize().to_string()
            })
        })
        .collect();

    let reasoning = if subtotals.is_empty() {
        "No items, subtotal is 0".to_string()
    } else {
        subtotals
            .iter()
            .map(|s| {
                format!(
                    "{}: {} units, ${} x (1 - {}) = ${}",
                    s.category.as_str(),
                    s.quantity,
                    s.gross_subtotal.normalize(),
                    s.discount_rate.normalize(),
                    s.discounted_subtotal.normalize()
                )
            })
            .collect::<Vec<_>>()
            .join("; ")
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "category_discount".to_string(),
        rule_name: "Category Quantity Discount".to_string(),
        input: serde_json::json!({
            "line_items": items.len()
        }),
        output: serde_json::json!({
            "categories": groups_json,
            "items_subtotal": items_subtotal.normalize().to_string()
        }),
        reasoning,
    };

    Ok(CategoryDiscountResult {
        subtotals,
        items_subtotal,
        audit_step,
    })
}
