//! Error types for the checkout cost calculator.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that can stop a cost calculation or a configuration load.

use thiserror::Error;

/// Message reported when the cart or its item list is missing.
pub const MISSING_CART_MESSAGE: &str = "cart or item list must not be null.";

/// Message reported when the customer region or tier is missing.
pub const MISSING_CUSTOMER_MESSAGE: &str = "region and customer tier must not be null.";

/// Message reported for a line item with a zero or negative quantity.
pub const NON_POSITIVE_QUANTITY_MESSAGE: &str = "item quantity must be greater than zero";

/// Message reported for a line item whose unit price is below zero.
pub const NEGATIVE_PRICE_MESSAGE: &str = "item unit price must not be negative";

/// Message reported when an amount or weight does not fit in a `Decimal`.
pub const AMOUNT_OUT_OF_RANGE_MESSAGE: &str = "amount out of range";

/// The main error type for the checkout cost calculator.
///
/// # Example
///
/// ```
/// use checkout_cost::error::CostError;
///
/// let error = CostError::ConfigNotFound {
///     path: "/missing/shipping.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/shipping.yaml");
/// ```
#[derive(Debug, Error)]
pub enum CostError {
    /// A required input (cart, item list, region or tier) was absent or unusable.
    #[error("{message}")]
    InvalidInput {
        /// The violated precondition.
        message: String,
    },

    /// A line item broke one of the item invariants.
    #[error("Invalid line item '{product_id}': {message}")]
    InvalidLineItem {
        /// The ID of the product on the offending line.
        product_id: String,
        /// The violated precondition.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but its values are inconsistent.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration field.
        field: String,
        /// A description of the problem.
        message: String,
    },
}

impl CostError {
    /// Builds an [`CostError::InvalidInput`] from a message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Builds an [`CostError::InvalidLineItem`] for a line whose amounts overflow.
    pub fn line_out_of_range(product_id: impl Into<String>) -> Self {
        Self::InvalidLineItem {
            product_id: product_id.into(),
            message: AMOUNT_OUT_OF_RANGE_MESSAGE.to_string(),
        }
    }

    /// Builds an [`CostError::InvalidInput`] for a cart-level amount that overflows.
    ///
    /// ```
    /// use checkout_cost::error::CostError;
    ///
    /// let error = CostError::out_of_range("items subtotal");
    /// assert_eq!(error.to_string(), "items subtotal amount out of range");
    /// ```
    pub fn out_of_range(what: &str) -> Self {
        Self::InvalidInput {
            message: format!("{what} {AMOUNT_OUT_OF_RANGE_MESSAGE}"),
        }
    }

    /// Returns true for errors the caller fixes by correcting the cart or customer data.
    ///
    /// ```
    /// use checkout_cost::error::{CostError, MISSING_CART_MESSAGE};
    ///
    /// assert!(CostError::invalid_input(MISSING_CART_MESSAGE).is_invalid_input());
    /// ```
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            CostError::InvalidInput { .. } | CostError::InvalidLineItem { .. }
        )
    }
}

/// A type alias for Results that return CostError.
pub type CostResult<T> = Result<T, CostError>;
