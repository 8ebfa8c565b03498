//! Product model and related types.
//!
//! This module defines the Product struct and ProductCategory enum
//! for representing the goods that appear on a cart line.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CostError, CostResult};

/// The category a product belongs to.
///
/// Category discounts are computed per category, so every unit of the same
/// category counts towards the same quantity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCategory {
    /// Books and printed media.
    Book,
    /// Electronic devices and accessories.
    Electronics,
    /// Furniture and other bulky household goods.
    Furniture,
    /// Clothing and footwear.
    Clothing,
    /// Food and groceries.
    Food,
    /// Toys and games.
    Toy,
}

impl ProductCategory {
    /// Returns the snake_case name used in serialized output and audit steps.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Book => "book",
            ProductCategory::Electronics => "electronics",
            ProductCategory::Furniture => "furniture",
            ProductCategory::Clothing => "clothing",
            ProductCategory::Food => "food",
            ProductCategory::Toy => "toy",
        }
    }
}

/// A product as seen by the checkout calculator.
///
/// Weights are in kilograms and dimensions in centimetres. Dimensions
/// default to zero, which makes the volumetric weight zero.
///
/// # Example
///
/// ```
/// use checkout_cost::models::{Product, ProductCategory};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let product = Product {
///     id: "sku_001".to_string(),
///     name: "Paperback".to_string(),
///     category: ProductCategory::Book,
///     unit_price: Decimal::from_str("39.90").unwrap(),
///     weight_kg: Decimal::from_str("0.45").unwrap(),
///     length_cm: Decimal::ZERO,
///     width_cm: Decimal::ZERO,
///     height_cm: Decimal::ZERO,
///     fragile: false,
/// };
/// assert!(!product.has_dimensions());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier for the product.
    pub id: String,
    /// Human-readable product name.
    pub name: String,
    /// The category used for quantity discounts.
    pub category: ProductCategory,
    /// Price of a single unit.
    pub unit_price: Decimal,
    /// Physical weight of a single unit in kilograms.
    pub weight_kg: Decimal,
    /// Package length in centimetres.
    #[serde(default)]
    pub length_cm: Decimal,
    /// Package width in centimetres.
    #[serde(default)]
    pub width_cm: Decimal,
    /// Package height in centimetres.
    #[serde(default)]
    pub height_cm: Decimal,
    /// Whether the product needs fragile handling.
    #[serde(default)]
    pub fragile: bool,
}

impl Product {
    /// Returns the package volume in cubic centimetres.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLineItem` if the volume does not fit in a `Decimal`.
    pub fn volume_cm3(&self) -> CostResult<Decimal> {
        self.length_cm
            .checked_mul(self.width_cm)
            .and_then(|area| area.checked_mul(self.height_cm))
            .ok_or_else(|| CostError::line_out_of_range(&self.id))
    }

    /// Returns true if all three package dimensions are non-zero.
    pub fn has_dimensions(&self) -> bool {
        !self.length_cm.is_zero() && !self.width_cm.is_zero() && !self.height_cm.is_zero()
    }
}
