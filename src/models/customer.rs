//! Customer attributes that affect shipping.
//!
//! This module defines the Region and CustomerTier enums. Neither affects
//! the item subtotal; both feed into the shipping fee.

use serde::{Deserialize, Serialize};

/// The delivery region of the customer.
///
/// Each region maps to a fixed shipping multiplier held in the pricing
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Southeast region (multiplier 1.00).
    Southeast,
    /// South region (multiplier 1.05).
    South,
    /// Northeast region (multiplier 1.10).
    Northeast,
    /// Central-West region (multiplier 1.20).
    CentralWest,
    /// North region (multiplier 1.30).
    North,
}

impl Region {
    /// Every region, in ascending multiplier order of the standard configuration.
    pub const ALL: [Region; 5] = [
        Region::Southeast,
        Region::South,
        Region::Northeast,
        Region::CentralWest,
        Region::North,
    ];

    /// Returns the snake_case name used in serialized output and audit steps.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Southeast => "southeast",
            Region::South => "south",
            Region::Northeast => "northeast",
            Region::CentralWest => "central_west",
            Region::North => "north",
        }
    }
}

/// The loyalty tier of the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerTier {
    /// Pays full shipping.
    Bronze,
    /// Pays half shipping.
    Silver,
    /// Ships for free.
    Gold,
}

impl CustomerTier {
    /// Every tier.
    pub const ALL: [CustomerTier; 3] = [CustomerTier::Bronze, CustomerTier::Silver, CustomerTier::Gold];

    /// Returns the snake_case name used in serialized output and audit steps.
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerTier::Bronze => "bronze",
            CustomerTier::Silver => "silver",
            CustomerTier::Gold => "gold",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_serialization() {
        let json = serde_json::to_string(&Region::CentralWest).unwrap();
        assert_eq!(json, "\"central_west\"");

        let region: Region = serde_json::from_str("\"northeast\"").unwrap();
        assert_eq!(region, Region::Northeast);
    }

    #[test]
    fn test_unknown_region_is_rejected() {
        let result: Result<Region, _> = serde_json::from_str("\"midwest\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_tier_serialization() {
        let json = serde_json::to_string(&CustomerTier::Silver).unwrap();
        assert_eq!(json, "\"silver\"");

        let tier: CustomerTier = serde_json::from_str("\"gold\"").unwrap();
        assert_eq!(tier, CustomerTier::Gold);
    }

    #[test]
    fn test_as_str_matches_serde_names() {
        for region in Region::ALL {
            let json = serde_json::to_string(&region).unwrap();
            assert_eq!(json, format!("\"{}\"", region.as_str()));
        }
        for tier in CustomerTier::ALL {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{}\"", tier.as_str()));
        }
    }
}
