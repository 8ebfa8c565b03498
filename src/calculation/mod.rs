//! Calculation logic for the checkout cost calculator.
//!
//! This module contains the stages of a checkout cost calculation: line item
//! validation, per-category quantity discounts, the order-value discount,
//! taxable weight, the shipping fee with its region and tier adjustments, and
//! currency rounding. [`CostCalculator`] runs them in order.

mod calculator;
mod category_discount;
mod rounding;
mod shipping;
mod taxable_weight;
mod validation;
mod value_discount;

pub use calculator::CostCalculator;
pub use category_discount::{CategoryDiscountResult, calculate_category_subtotals};
pub use rounding::{CURRENCY_DECIMAL_PLACES, round_currency};
pub use shipping::{NEGATIVE_WEIGHT_WARNING, ShippingResult, calculate_shipping};
pub use taxable_weight::{taxable_weight, volumetric_weight};
pub use validation::validate_line_items;
pub use value_discount::{ValueDiscountResult, apply_value_discount};
