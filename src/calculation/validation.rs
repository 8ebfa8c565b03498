//! Line item validation.
//!
//! Every item is checked before any money is computed, so a bad line never
//! produces a partial result.

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{
    CostError, CostResult, NEGATIVE_PRICE_MESSAGE, NON_POSITIVE_QUANTITY_MESSAGE,
};
use crate::models::LineItem;

/// Checks the quantity and price invariants of every line item.
///
/// Items are checked in cart order; for each item the quantity is checked
/// before the price. The first violation is returned.
///
/// # Errors
///
/// Returns `InvalidLineItem` when a quantity is zero or a unit price is negative.
///
/// # Examples
///
/// ```
/// use checkout_cost::calculation::validate_line_items;
///
/// assert!(validate_line_items(&[]).is_ok());
/// ```
pub fn validate_line_items(items: &[LineItem]) -> CostResult<()> {
    for item in items {
        if item.quantity == 0 {
            warn!(product_id = %item.product.id, "Rejected line item with zero quantity");
            return Err(CostError::InvalidLineItem {
                product_id: item.product.id.clone(),
                message: NON_POSITIVE_QUANTITY_MESSAGE.to_string(),
            });
        }
        if item.product.unit_price < Decimal::ZERO {
            warn!(
                product_id = %item.product.id,
                unit_price = %item.product.unit_price,
                "Rejected line item with negative price"
            );
            return Err(CostError::InvalidLineItem {
                product_id: item.product.id.clone(),
                message: NEGATIVE_PRICE_MESSAGE.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, ProductCategory};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_item(id: &str, price: &str, quantity: u32) -> LineItem {
        LineItem::new(
            Product {
                id: id.to_string(),
                name: "Item".to_string(),
                category: ProductCategory::Book,
                unit_price: dec(price),
                weight_kg: dec("1.0"),
                length_cm: Decimal::ZERO,
                width_cm: Decimal::ZERO,
                height_cm: Decimal::ZERO,
                fragile: false,
            },
            quantity,
        )
    }

    #[test]
    fn test_valid_items_pass() {
        let items = vec![create_item("a", "10.00", 1), create_item("b", "0.00", 3)];
        assert!(validate_line_items(&items).is_ok());
    }

    #[test]
    fn test_zero_quantity_is_rejected() {
        let items = vec![create_item("a", "10.00", 1), create_item("b", "10.00", 0)];

        match validate_line_items(&items) {
            Err(CostError::InvalidLineItem {
                product_id,
                message,
            }) => {
                assert_eq!(product_id, "b");
                assert!(message.contains("quantity must be greater than zero"));
            }
            other => panic!("Expected InvalidLineItem error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let items = vec![create_item("a", "-0.01", 2)];

        match validate_line_items(&items) {
            Err(CostError::InvalidLineItem {
                product_id,
                message,
            }) => {
                assert_eq!(product_id, "a");
                assert!(message.contains("price must not be negative"));
            }
            other => panic!("Expected InvalidLineItem error, got {:?}", other),
        }
    }

    #[test]
    fn test_quantity_checked_before_price_on_same_item() {
        let items = vec![create_item("a", "-5.00", 0)];

        let err = validate_line_items(&items).unwrap_err();
        assert!(err.to_string().contains(NON_POSITIVE_QUANTITY_MESSAGE));
    }
}
