//! # Core Type Definitions
//!
//! This module contains the value types shared by every part of the lot:
//! - Identity of a parked vehicle (`Plate`)
//! - Money (`Amount`)
//! - Error types (`ParkingError`)
//!
//! ## Money
//!
//! All amounts are whole currency units held in a `u64`. There is no
//! fractional money anywhere in the lot; rounding happens once, inside the
//! fee calculator, and always towards zero.

use crate::primitives::MAX_PLATE_LENGTH;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use thiserror::Error;

// =============================================================================
// PLATE
// =============================================================================

/// License plate of a vehicle.
///
/// The plate is the sole identity of a vehicle inside the lot. Comparison is
/// case-sensitive: `"aa111aa"` and `"AA111AA"` are different vehicles.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plate(String);

impl Plate {
    /// Create a plate from any string.
    ///
    /// No validation happens here; boundaries that accept plates from the
    /// outside world check length and emptiness before constructing one.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Validate a plate received from outside the lot.
    ///
    /// Rejects empty plates, plates longer than `MAX_PLATE_LENGTH` bytes and
    /// plates containing whitespace or control characters. Case is kept.
    pub fn parse(s: &str) -> Result<Self, ParkingError> {
        if s.is_empty() {
            return Err(ParkingError::InvalidPlate("plate is empty".to_string()));
        }
        if s.len() > MAX_PLATE_LENGTH {
            return Err(ParkingError::InvalidPlate(format!(
                "plate length {} exceeds maximum {} bytes",
                s.len(),
                MAX_PLATE_LENGTH
            )));
        }
        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ParkingError::InvalidPlate(format!(
                "plate {:?} contains whitespace or control characters",
                s
            )));
        }
        Ok(Self::new(s))
    }

    /// Get the plate as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Plate {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Plate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Plate {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

// =============================================================================
// AMOUNT
// =============================================================================

/// A sum of money in whole currency units.
/// Uses saturating arithmetic so running totals can never wrap.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Amount(pub u64);

impl Amount {
    /// Zero currency units.
    pub const ZERO: Self = Self(0);

    /// Create a new amount.
    #[must_use]
    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    /// Get the raw number of currency units.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Add two amounts, saturating at `u64::MAX`.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}", self.0)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Alke system.
///
/// - `AdmissionRefused` and `NotFound` are the two outcomes the lot itself
///   produces; both leave the lot untouched and both name the plate.
/// - The remaining variants are raised at the boundaries (HTTP, CLI, config,
///   scenario files) before anything reaches the lot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParkingError {
    /// The lot is full or the plate is already inside.
    ///
    /// The two causes are deliberately not distinguished.
    #[error("Admission refused for plate {0}")]
    AdmissionRefused(Plate),

    /// No admitted vehicle carries this plate.
    #[error("Vehicle not found: {0}")]
    NotFound(Plate),

    /// A plate received from outside is empty or too long.
    #[error("Invalid plate: {0}")]
    InvalidPlate(String),

    /// A discount card received from outside is empty or too long.
    #[error("Invalid discount card: {0}")]
    InvalidDiscountCard(String),

    /// The category name does not match any known vehicle category.
    #[error("Unknown vehicle category: {0}")]
    UnknownCategory(String),

    /// A manual clock was asked to move past the last representable instant.
    #[error("Clock out of range: {0}")]
    ClockOutOfRange(String),

    /// A replay scenario is malformed.
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_saturating_add() {
        let total = Amount::new(u64::MAX).saturating_add(Amount::new(5));
        assert_eq!(total.value(), u64::MAX);
    }

    #[test]
    fn amount_display_has_currency_sign() {
        assert_eq!(Amount::new(21).to_string(), "$21");
    }

    #[test]
    fn plate_is_case_sensitive() {
        assert_ne!(Plate::new("AA111AA"), Plate::new("aa111aa"));
    }

    #[test]
    fn plate_parse_accepts_ordinary_plates() {
        assert_eq!(Plate::parse("DD55DD"), Ok(Plate::new("DD55DD")));
        assert_eq!(Plate::parse("aa-111"), Ok(Plate::new("aa-111")));
    }

    #[test]
    fn plate_parse_rejects_bad_input() {
        assert!(matches!(Plate::parse(""), Err(ParkingError::InvalidPlate(_))));
        assert!(matches!(
            Plate::parse("AA 111"),
            Err(ParkingError::InvalidPlate(_))
        ));
        let long = "X".repeat(MAX_PLATE_LENGTH + 1);
        assert!(matches!(
            Plate::parse(&long),
            Err(ParkingError::InvalidPlate(_))
        ));
    }

    #[test]
    fn plate_borrows_as_str() {
        let plate = Plate::new("B222BBB");
        let borrowed: &str = plate.borrow();
        assert_eq!(borrowed, "B222BBB");
    }

    #[test]
    fn error_messages_name_the_plate() {
        let refused = ParkingError::AdmissionRefused(Plate::new("DD444DD"));
        assert_eq!(refused.to_string(), "Admission refused for plate DD444DD");

        let missing = ParkingError::NotFound(Plate::new("ZZ000ZZ"));
        assert_eq!(missing.to_string(), "Vehicle not found: ZZ000ZZ");
    }
}
