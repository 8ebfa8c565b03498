//! Taxable weight of a product.
//!
//! Carriers charge the greater of the physical weight and the volumetric
//! weight, where the volumetric weight is the package volume in cubic
//! centimetres divided by a fixed divisor (6000 in the standard table).

use rust_decimal::Decimal;

use crate::config::PricingConfig;
use crate::error::CostResult;
use crate::models::Product;

/// Returns the volumetric weight of one unit in kilograms.
///
/// Zero when any dimension is zero. A non-positive divisor also yields
/// zero; [`PricingConfig::validate`] rejects such tables.
///
/// # Errors
///
/// Returns `InvalidLineItem` if the package volume does not fit in a `Decimal`.
///
/// # Examples
///
/// ```
/// use checkout_cost::calculation::volumetric_weight;
/// use checkout_cost::config::PricingConfig;
/// use checkout_cost::models::{Product, ProductCategory};
/// use rust_decimal::Decimal;
///
/// let product = Product {
///     id: "sku_001".to_string(),
///     name: "Armchair".to_string(),
///     category: ProductCategory::Furniture,
///     unit_price: Decimal::from(300),
///     weight_kg: Decimal::ONE,
///     length_cm: Decimal::from(60),
///     width_cm: Decimal::from(50),
///     height_cm: Decimal::from(40),
///     fragile: false,
/// };
/// assert_eq!(
///     volumetric_weight(&product, &PricingConfig::standard()).unwrap(),
///     Decimal::from(20)
/// );
/// ```
pub fn volumetric_weight(product: &Product, config: &PricingConfig) -> CostResult<Decimal> {
    let divisor = config.shipping().volumetric_divisor;
    if divisor <= Decimal::ZERO || !product.has_dimensions() {
        return Ok(Decimal::ZERO);
    }
    Ok(product
        .volume_cm3()?
        .checked_div(divisor)
        .unwrap_or(Decimal::ZERO))
}

/// Returns the taxable weight of one unit: the greater of physical and volumetric weight.
pub fn taxable_weight(product: &Product, config: &PricingConfig) -> CostResult<Decimal> {
    Ok(product.weight_kg.max(volumetric_weight(product, config)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductCategory;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_product(weight: &str, length: &str, width: &str, height: &str) -> Product {
        Product {
            id: "sku_001".to_string(),
            name: "Box".to_string(),
            category: ProductCategory::Furniture,
            unit_price: dec("100.00"),
            weight_kg: dec(weight),
            length_cm: dec(length),
            width_cm: dec(width),
            height_cm: dec(height),
            fragile: false,
        }
    }

    #[test]
    fn test_zero_dimensions_give_zero_volumetric_weight() {
        let product = create_product("3.0", "0", "0", "0");
        assert_eq!(
            volumetric_weight(&product, &PricingConfig::standard()).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            taxable_weight(&product, &PricingConfig::standard()).unwrap(),
            dec("3.0")
        );
    }

    #[test]
    fn test_volumetric_weight_wins_for_bulky_light_items() {
        // 40 x 40 x 40 = 64000 cm3 / 6000 = 10.666... kg
        let product = create_product("1.0", "40", "40", "40");
        let weight = taxable_weight(&product, &PricingConfig::standard()).unwrap();

        assert!(weight > dec("10.66"));
        assert!(weight < dec("10.67"));
    }

    #[test]
    fn test_physical_weight_wins_for_dense_items() {
        // 10 x 10 x 10 = 1000 cm3 / 6000 = 0.1666... kg
        let product = create_product("2.5", "10", "10", "10");
        assert_eq!(
            taxable_weight(&product, &PricingConfig::standard()).unwrap(),
            dec("2.5")
        );
    }

    #[test]
    fn test_negative_physical_weight_falls_back_to_volumetric() {
        let product = create_product("-1.0", "0", "0", "0");
        assert_eq!(
            taxable_weight(&product, &PricingConfig::standard()).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_exact_volumetric_division() {
        let product = create_product("0.5", "30", "20", "10");
        assert_eq!(
            volumetric_weight(&product, &PricingConfig::standard()).unwrap(),
            dec("1")
        );
    }

    #[test]
    fn test_partial_dimensions_give_zero_volumetric_weight() {
        let product = create_product("2.0", "40", "40", "0");
        assert_eq!(
            taxable_weight(&product, &PricingConfig::standard()).unwrap(),
            dec("2.0")
        );
    }

    #[test]
    fn test_oversized_package_is_an_error() {
        let side = Decimal::from(10_000_000_000i64);
        let mut product = create_product("1.0", "0", "0", "0");
        product.length_cm = side;
        product.width_cm = side;
        product.height_cm = side;

        let err = taxable_weight(&product, &PricingConfig::standard()).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("sku_001"));
    }
}
