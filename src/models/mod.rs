//! Core data models for the checkout cost calculator.
//!
//! This module contains all the domain models used throughout the calculator.

mod cart;
mod cost_breakdown;
mod customer;
mod product;

pub use cart::{Cart, LineItem};
pub use cost_breakdown::{
    AuditStep, AuditTrace, AuditWarning, CategorySubtotal, CostBreakdown, ShippingBreakdown,
};
pub use customer::{CustomerTier, Region};
pub use product::{Product, ProductCategory};
