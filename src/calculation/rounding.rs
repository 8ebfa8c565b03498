//! Currency rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places of a currency amount.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount to 2 decimal places, half away from zero, with scale fixed at 2.
///
/// For the non-negative amounts a checkout produces this is round-half-up.
///
/// # Examples
///
/// ```
/// use checkout_cost::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("450.009").unwrap()).to_string(), "450.01");
/// assert_eq!(round_currency(Decimal::from_str("16.275").unwrap()).to_string(), "16.28");
/// assert_eq!(round_currency(Decimal::ZERO).to_string(), "0.00");
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(
        CURRENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    );
    rounded.rescale(CURRENCY_DECIMAL_PLACES);
    rounded
}
