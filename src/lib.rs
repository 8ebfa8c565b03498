//! Checkout Cost Calculator
//!
//! This crate computes the final amount a customer pays at checkout: the item
//! subtotal after per-category quantity discounts and an order-value discount,
//! plus a shipping fee driven by taxable weight, fragility, delivery region
//! and loyalty tier. Every calculation produces an auditable breakdown.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod request;
