//! # Lot Scenario Tests (L0-L3)
//!
//! If ANY tier fails, the lot is INVALID.
//!
//! ## Tiers
//! - L0: Tariff
//! - L1: Admission
//! - L2: Discharge
//! - L3: A full day at capacity

use alke_core::{
    Amount, Clock, ManualClock, ParkingError, ParkingLot, Plate, Vehicle, VehicleCategory,
    primitives::DEFAULT_CAPACITY,
};
use chrono::TimeDelta;
use std::sync::Arc;

fn fresh_lot() -> (ParkingLot, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::at_epoch());
    (ParkingLot::with_clock(DEFAULT_CAPACITY, clock.clone()), clock)
}

// =============================================================================
// TIER L0: TARIFF
// =============================================================================

mod l0_tariff {
    use alke_core::FeeCalculator;

    use super::*;

    /// L0.1: Exactly 120 minutes is still the flat rate.
    #[test]
    fn boundary_is_inclusive() {
        for category in VehicleCategory::ALL {
            assert_eq!(
                FeeCalculator::compute_fee(category, 120, false),
                category.base_rate()
            );
        }
    }

    /// L0.2: Car parked 135 minutes pays 25, 21 with a card.
    #[test]
    fn car_two_hours_fifteen() {
        assert_eq!(
            FeeCalculator::compute_fee(VehicleCategory::Car, 135, false),
            Amount::new(25)
        );
        assert_eq!(
            FeeCalculator::compute_fee(VehicleCategory::Car, 135, true),
            Amount::new(21)
        );
    }
}

// =============================================================================
// TIER L1: ADMISSION
// =============================================================================

mod l1_admission {
    use super::*;

    /// L1.1: The 21st distinct vehicle is refused.
    #[test]
    fn twenty_first_vehicle_refused() {
        let (mut lot, clock) = fresh_lot();
        for i in 0..DEFAULT_CAPACITY {
            let plate = format!("PL{i:03}");
            lot.admit(Vehicle::arriving(plate.as_str(), VehicleCategory::Car, clock.as_ref()))
                .expect("room available");
        }

        let result = lot.admit(Vehicle::arriving(
            "PL999",
            VehicleCategory::Car,
            clock.as_ref(),
        ));

        assert!(matches!(result, Err(ParkingError::AdmissionRefused(_))));
        assert_eq!(lot.len(), DEFAULT_CAPACITY);
    }

    /// L1.2: A duplicate plate is refused even with another category.
    #[test]
    fn duplicate_refused() {
        let (mut lot, clock) = fresh_lot();
        lot.admit(Vehicle::arriving("B555QQQ", VehicleCategory::Motorcycle, clock.as_ref()))
            .expect("first admit");

        let result = lot.admit(Vehicle::arriving("B555QQQ", VehicleCategory::Car, clock.as_ref()));

        assert_eq!(
            result,
            Err(ParkingError::AdmissionRefused(Plate::new("B555QQQ")))
        );
        assert_eq!(
            lot.get("B555QQQ").map(Vehicle::category),
            Some(VehicleCategory::Motorcycle)
        );
    }
}

// =============================================================================
// TIER L2: DISCHARGE
// =============================================================================

mod l2_discharge {
    use super::*;

    /// L2.1: Unknown plate is NotFound and leaves statistics alone.
    #[test]
    fn unknown_plate() {
        let (mut lot, _clock) = fresh_lot();
        let before = lot.statistics();

        assert!(matches!(
            lot.discharge("CC444ZZ"),
            Err(ParkingError::NotFound(_))
        ));
        assert_eq!(lot.statistics(), before);
    }

    /// L2.2: A discharged plate cannot be discharged twice.
    #[test]
    fn second_discharge_not_found() {
        let (mut lot, clock) = fresh_lot();
        lot.admit(Vehicle::arriving("AA111AA", VehicleCategory::Car, clock.as_ref()))
            .expect("admit");

        lot.discharge("AA111AA").expect("first discharge");
        assert!(matches!(
            lot.discharge("AA111AA"),
            Err(ParkingError::NotFound(_))
        ));
        assert_eq!(lot.statistics().completed, 1);
    }

    /// L2.3: A discharged plate may be admitted again.
    #[test]
    fn readmission_after_discharge() {
        let (mut lot, clock) = fresh_lot();
        lot.admit(Vehicle::arriving("AA111AA", VehicleCategory::Car, clock.as_ref()))
            .expect("admit");
        lot.discharge("AA111AA").expect("discharge");

        assert!(
            lot.admit(Vehicle::arriving("AA111AA", VehicleCategory::Car, clock.as_ref()))
                .is_ok()
        );
    }

    /// L2.4: Seconds past the last whole minute are not billed.
    #[test]
    fn partial_minute_is_truncated() {
        let (mut lot, clock) = fresh_lot();
        let arrival = clock.now();
        lot.admit(Vehicle::arriving("AA111AA", VehicleCategory::Car, clock.as_ref()))
            .expect("admit");
        lot.admit(Vehicle::arriving("B222BBB", VehicleCategory::Car, clock.as_ref()))
            .expect("admit");

        clock.set(arrival + TimeDelta::seconds(120 * 60 + 59));
        let receipt = lot.discharge_with_receipt("AA111AA").expect("admitted");
        assert_eq!(receipt.parked_minutes, 120);
        assert_eq!(receipt.fee, VehicleCategory::Car.base_rate());

        clock.set(arrival + TimeDelta::minutes(121));
        assert_eq!(lot.discharge("B222BBB"), Ok(Amount::new(25)));
    }
}

// =============================================================================
// TIER L3: FULL DAY
// =============================================================================

mod l3_full_day {
    use super::*;

    /// L3.1: 19 admits, the 20th fills the lot, the 21st bounces, one
    /// discharge frees a space and is recorded, a stranger's plate changes
    /// nothing.
    #[test]
    fn capacity_scenario() {
        let (mut lot, clock) = fresh_lot();

        for i in 0..19 {
            let plate = format!("V{i:02}");
            lot.admit(Vehicle::arriving(plate.as_str(), VehicleCategory::Car, clock.as_ref()))
                .expect("room available");
        }
        assert_eq!(lot.len(), 19);

        lot.admit(Vehicle::arriving("CC444WW", VehicleCategory::MiniBus, clock.as_ref()))
            .expect("20th fits");
        assert_eq!(lot.len(), 20);

        assert!(
            lot.admit(Vehicle::arriving("CC444ZZ", VehicleCategory::MiniBus, clock.as_ref()))
                .is_err()
        );
        assert_eq!(lot.len(), 20);

        clock.advance_minutes(150).expect("in range");
        let fee = lot.discharge("CC444WW").expect("admitted");
        // 25 + ceil(30 / 15) * 6
        assert_eq!(fee, Amount::new(37));
        assert_eq!(lot.len(), 19);
        assert_eq!(lot.statistics().completed, 1);
        assert_eq!(lot.statistics().earnings, fee);

        let before = lot.statistics();
        assert!(lot.discharge("CC444ZZ").is_err());
        assert_eq!(lot.len(), 19);
        assert_eq!(lot.statistics(), before);
    }
}
