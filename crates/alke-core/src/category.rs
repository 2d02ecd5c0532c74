//! # Vehicle Categories
//!
//! Static tariff lookup: every category maps to a fixed base rate, charged
//! flat for the first two hours.

use crate::ParkingError;
use crate::primitives::OVERAGE_RATE_DIVISOR;
use crate::types::Amount;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of vehicle, which decides the tariff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleCategory {
    Car,
    Motorcycle,
    #[serde(alias = "minibus", alias = "mini_bus")]
    MiniBus,
    Bus,
}

impl VehicleCategory {
    /// Every category, in tariff-table order.
    pub const ALL: [VehicleCategory; 4] = [
        VehicleCategory::Car,
        VehicleCategory::Motorcycle,
        VehicleCategory::MiniBus,
        VehicleCategory::Bus,
    ];

    /// Flat fee for a stay inside the base window.
    #[must_use]
    pub const fn base_rate(self) -> Amount {
        match self {
            VehicleCategory::Car => Amount::new(20),
            VehicleCategory::Motorcycle => Amount::new(15),
            VehicleCategory::MiniBus => Amount::new(25),
            VehicleCategory::Bus => Amount::new(30),
        }
    }

    /// Price of one overage block: a quarter of the base rate, truncated.
    #[must_use]
    pub const fn block_rate(self) -> Amount {
        Amount::new(self.base_rate().value() / OVERAGE_RATE_DIVISOR)
    }

    /// Canonical name, as accepted by `FromStr` and used on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            VehicleCategory::Car => "car",
            VehicleCategory::Motorcycle => "motorcycle",
            VehicleCategory::MiniBus => "mini-bus",
            VehicleCategory::Bus => "bus",
        }
    }
}

impl std::fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleCategory {
    type Err = ParkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(VehicleCategory::Car),
            "motorcycle" => Ok(VehicleCategory::Motorcycle),
            "mini-bus" | "minibus" | "mini_bus" => Ok(VehicleCategory::MiniBus),
            "bus" => Ok(VehicleCategory::Bus),
            _ => Err(ParkingError::UnknownCategory(s.to_string())),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_rates_match_tariff() {
        assert_eq!(VehicleCategory::Car.base_rate(), Amount::new(20));
        assert_eq!(VehicleCategory::Motorcycle.base_rate(), Amount::new(15));
        assert_eq!(VehicleCategory::MiniBus.base_rate(), Amount::new(25));
        assert_eq!(VehicleCategory::Bus.base_rate(), Amount::new(30));
    }

    #[test]
    fn block_rate_truncates() {
        assert_eq!(VehicleCategory::Car.block_rate(), Amount::new(5));
        assert_eq!(VehicleCategory::Motorcycle.block_rate(), Amount::new(3));
        assert_eq!(VehicleCategory::MiniBus.block_rate(), Amount::new(6));
        assert_eq!(VehicleCategory::Bus.block_rate(), Amount::new(7));
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("Car".parse(), Ok(VehicleCategory::Car));
        assert_eq!("minibus".parse(), Ok(VehicleCategory::MiniBus));
        assert_eq!("mini_bus".parse(), Ok(VehicleCategory::MiniBus));
        assert_eq!(" bus ".parse(), Ok(VehicleCategory::Bus));
    }

    #[test]
    fn parse_rejects_unknown() {
        let result = "truck".parse::<VehicleCategory>();
        assert_eq!(
            result,
            Err(ParkingError::UnknownCategory("truck".to_string()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for category in VehicleCategory::ALL {
            assert_eq!(category.to_string().parse(), Ok(category));
        }
    }
}
