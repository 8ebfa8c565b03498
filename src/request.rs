//! Request types for a checkout cost calculation.
//!
//! This module defines the serializable structures a checkout workflow hands
//! to the calculator. Every field is optional so that absent values surface as
//! invalid-input errors with a precise message instead of as parse failures.

use serde::{Deserialize, Serialize};

use crate::error::{
    CostError, CostResult, MISSING_CART_MESSAGE, MISSING_CUSTOMER_MESSAGE,
    NON_POSITIVE_QUANTITY_MESSAGE,
};
use crate::models::{Cart, CustomerTier, LineItem, Product, Region};

/// Request body of a checkout cost calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// The cart being checked out.
    pub cart: Option<CartRequest>,
    /// The customer's delivery region.
    pub region: Option<Region>,
    /// The customer's loyalty tier.
    pub tier: Option<CustomerTier>,
}

/// Cart information in a checkout request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartRequest {
    /// The lines of the cart.
    pub items: Option<Vec<LineItemRequest>>,
}

/// Line item information in a checkout request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemRequest {
    /// The product on this line.
    pub product: Product,
    /// Number of units, signed so that zero and negative values can be reported.
    pub quantity: i64,
}

impl TryFrom<LineItemRequest> for LineItem {
    type Error = CostError;

    fn try_from(req: LineItemRequest) -> CostResult<Self> {
        if req.quantity <= 0 {
            return Err(CostError::InvalidLineItem {
                product_id: req.product.id,
                message: NON_POSITIVE_QUANTITY_MESSAGE.to_string(),
            });
        }
        let quantity = u32::try_from(req.quantity).map_err(|_| CostError::InvalidLineItem {
            product_id: req.product.id.clone(),
            message: format!("item quantity {} exceeds {}", req.quantity, u32::MAX),
        })?;
        Ok(LineItem::new(req.product, quantity))
    }
}

impl CheckoutRequest {
    /// Creates a fully populated request.
    pub fn new(cart: Cart, region: Region, tier: CustomerTier) -> Self {
        let items = cart
            .items
            .into_iter()
            .map(|item| LineItemRequest {
                product: item.product,
                quantity: i64::from(item.quantity),
            })
            .collect();
        Self {
            cart: Some(CartRequest { items: Some(items) }),
            region: Some(region),
            tier: Some(tier),
        }
    }

    /// Checks presence of every field and converts to domain values.
    ///
    /// Checks run in order: cart and item list, then region and tier, then
    /// each item's quantity.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` with "cart or item list must not be null." when the
    ///   cart or its item list is missing
    /// - `InvalidInput` with "region and customer tier must not be null." when
    ///   either is missing
    /// - `InvalidLineItem` for a zero or negative quantity
    ///
    /// # Example
    ///
    /// ```
    /// use checkout_cost::request::CheckoutRequest;
    ///
    /// let err = CheckoutRequest::default().into_parts().unwrap_err();
    /// assert_eq!(err.to_string(), "cart or item list must not be null.");
    /// ```
    pub fn into_parts(self) -> CostResult<(Cart, Region, CustomerTier)> {
        let Some(items) = self.cart.and_then(|cart| cart.items) else {
            return Err(CostError::invalid_input(MISSING_CART_MESSAGE));
        };
        let (Some(region), Some(tier)) = (self.region, self.tier) else {
            return Err(CostError::invalid_input(MISSING_CUSTOMER_MESSAGE));
        };
        let items = items
            .into_iter()
            .map(LineItem::try_from)
            .collect::<CostResult<Vec<_>>>()?;
        Ok((Cart::new(items), region, tier))
    }
}
