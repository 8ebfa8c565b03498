//! Cart and line item models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Product;
use crate::error::{CostError, CostResult};

/// A single line of a cart: a product and how many units of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product on this line.
    pub product: Product,
    /// Number of units. Must be greater than zero.
    pub quantity: u32,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// Returns unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLineItem` if the product does not fit in a `Decimal`.
    ///
    /// # Example
    ///
    /// ```
    /// use checkout_cost::models::{LineItem, Product, ProductCategory};
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let product = Product {
    ///     id: "sku_001".to_string(),
    ///     name: "Shirt".to_string(),
    ///     category: ProductCategory::Clothing,
    ///     unit_price: Decimal::from_str("25.50").unwrap(),
    ///     weight_kg: Decimal::from_str("0.3").unwrap(),
    ///     length_cm: Decimal::ZERO,
    ///     width_cm: Decimal::ZERO,
    ///     height_cm: Decimal::ZERO,
    ///     fragile: false,
    /// };
    /// let item = LineItem::new(product, 3);
    /// assert_eq!(item.line_total().unwrap(), Decimal::from_str("76.50").unwrap());
    /// ```
    pub fn line_total(&self) -> CostResult<Decimal> {
        self.product
            .unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| CostError::line_out_of_range(&self.product.id))
    }
}

/// An ordered collection of line items. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// The lines of the cart, in the order they were added.
    pub items: Vec<LineItem>,
}

impl Cart {
    /// Creates a cart from its line items.
    pub fn new(items: Vec<LineItem>) -> Self {
        Self { items }
    }

    /// Returns true if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductCategory;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_product(price: &str) -> Product {
        Product {
            id: "sku_001".to_string(),
            name: "Novel".to_string(),
            category: ProductCategory::Book,
            unit_price: dec(price),
            weight_kg: dec("1.0"),
            length_cm: Decimal::ZERO,
            width_cm: Decimal::ZERO,
            height_cm: Decimal::ZERO,
            fragile: false,
        }
    }

    #[test]
    fn test_line_total_multiplies_price_by_quantity() {
        let item = LineItem::new(create_test_product("100.00"), 8);
        assert_eq!(item.line_total().unwrap(), dec("800.00"));
    }

    #[test]
    fn test_line_total_with_zero_price() {
        let item = LineItem::new(create_test_product("0.00"), 4);
        assert_eq!(item.line_total().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_line_total_overflow_is_an_error() {
        let mut product = create_test_product("0");
        product.unit_price = Decimal::MAX;
        let item = LineItem::new(product, 2);

        match item.line_total() {
            Err(CostError::InvalidLineItem {
                product_id,
                message,
            }) => {
                assert_eq!(product_id, "sku_001");
                assert_eq!(message, crate::error::AMOUNT_OUT_OF_RANGE_MESSAGE);
            }
            other => panic!("Expected InvalidLineItem error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::default();
        assert!(cart.is_empty());
        assert!(!Cart::new(vec![LineItem::new(create_test_product("1.00"), 1)]).is_empty());
    }

    #[test]
    fn test_deserialize_cart() {
        let json = r#"{
            "items": [
                {
                    "product": {
                        "id": "sku_001",
                        "name": "Novel",
                        "category": "book",
                        "unit_price": "100.00",
                        "weight_kg": "1.0"
                    },
                    "quantity": 2
                }
            ]
        }"#;

        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.items[0].line_total().unwrap(), dec("200.00"));
    }
}
