//! # Vehicle
//!
//! A vehicle as the lot sees it: a plate, a category, the instant it checked
//! in, and an optional discount card.
//!
//! Identity is the plate alone. Two `Vehicle` values with the same plate are
//! equal and hash identically regardless of their other fields.

use crate::category::VehicleCategory;
use crate::clock::{Clock, elapsed_minutes};
use crate::primitives::MAX_DISCOUNT_CARD_LENGTH;
use crate::types::{ParkingError, Plate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A vehicle that can be parked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    plate: Plate,
    category: VehicleCategory,
    checked_in_at: DateTime<Utc>,
    discount_card: Option<String>,
}

impl Vehicle {
    /// Create a vehicle that checked in at `checked_in_at`.
    #[must_use]
    pub fn new(
        plate: impl Into<Plate>,
        category: VehicleCategory,
        checked_in_at: DateTime<Utc>,
    ) -> Self {
        Self {
            plate: plate.into(),
            category,
            checked_in_at,
            discount_card: None,
        }
    }

    /// Create a vehicle whose check-in instant is read from `clock`.
    #[must_use]
    pub fn arriving(plate: impl Into<Plate>, category: VehicleCategory, clock: &dyn Clock) -> Self {
        Self::new(plate, category, clock.now())
    }

    /// Attach a discount card (builder style).
    #[must_use]
    pub fn with_discount_card(mut self, card: impl Into<String>) -> Self {
        self.discount_card = Some(card.into());
        self
    }

    /// The plate identifying this vehicle.
    #[must_use]
    pub fn plate(&self) -> &Plate {
        &self.plate
    }

    /// The tariff category.
    #[must_use]
    pub fn category(&self) -> VehicleCategory {
        self.category
    }

    /// When the vehicle checked in.
    #[must_use]
    pub fn checked_in_at(&self) -> DateTime<Utc> {
        self.checked_in_at
    }

    /// The discount card, if any.
    #[must_use]
    pub fn discount_card(&self) -> Option<&str> {
        self.discount_card.as_deref()
    }

    /// Replace (or remove) the discount card.
    pub fn set_discount_card(&mut self, card: Option<String>) {
        self.discount_card = card;
    }

    /// Whether the discounted tariff applies.
    ///
    /// Only presence matters; the card's content is never inspected.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.discount_card.is_some()
    }

    /// Whole minutes parked as of `now`.
    #[must_use]
    pub fn parked_minutes(&self, now: DateTime<Utc>) -> u64 {
        elapsed_minutes(self.checked_in_at, now)
    }

    /// Bound a discount card received from outside the lot.
    ///
    /// Only emptiness and length are checked; the card is never looked up.
    pub fn validate_discount_card(card: &str) -> Result<(), ParkingError> {
        if card.is_empty() {
            return Err(ParkingError::InvalidDiscountCard(
                "discount card is empty".to_string(),
            ));
        }
        if card.len() > MAX_DISCOUNT_CARD_LENGTH {
            return Err(ParkingError::InvalidDiscountCard(format!(
                "discount card length {} exceeds maximum {} bytes",
                card.len(),
                MAX_DISCOUNT_CARD_LENGTH
            )));
        }
        Ok(())
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.plate == other.plate
    }
}

impl Eq for Vehicle {}

impl Hash for Vehicle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.plate.hash(state);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::collections::HashSet;

    #[test]
    fn equality_is_by_plate_only() {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        let car = Vehicle::new("AA111AA", VehicleCategory::Car, epoch);
        let bus = Vehicle::new("AA111AA", VehicleCategory::Bus, epoch + chrono::TimeDelta::hours(1))
            .with_discount_card("DISCOUNT_CARD_001");

        assert_eq!(car, bus);

        let set: HashSet<Vehicle> = [car, bus].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn discount_presence_not_content() {
        let epoch = DateTime::<Utc>::UNIX_EPOCH;
        let mut vehicle = Vehicle::new("B222BBB", VehicleCategory::Motorcycle, epoch);
        assert!(!vehicle.has_discount());

        vehicle.set_discount_card(Some(String::new()));
        assert!(vehicle.has_discount());

        vehicle.set_discount_card(None);
        assert!(!vehicle.has_discount());
    }

    #[test]
    fn discount_card_bounds() {
        assert!(Vehicle::validate_discount_card("DISCOUNT_CARD_001").is_ok());
        assert!(Vehicle::validate_discount_card("").is_err());
        let long = "C".repeat(MAX_DISCOUNT_CARD_LENGTH + 1);
        assert!(Vehicle::validate_discount_card(&long).is_err());
    }

    #[test]
    fn parked_minutes_is_derived_from_now() {
        let clock = ManualClock::at_epoch();
        let vehicle = Vehicle::arriving("CC333CC", VehicleCategory::MiniBus, &clock);

        assert_eq!(vehicle.parked_minutes(clock.now()), 0);
        clock.advance_minutes(45).expect("in range");
        assert_eq!(vehicle.parked_minutes(clock.now()), 45);
        clock.advance_minutes(100).expect("in range");
        assert_eq!(vehicle.parked_minutes(clock.now()), 145);
    }
}
