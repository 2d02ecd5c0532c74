//! # Parking Lot
//!
//! The stateful aggregate: admitted vehicles, capacity, running statistics.
//!
//! ## Invariants
//!
//! - Never more admitted vehicles than `capacity`.
//! - No two admitted vehicles share a plate.
//! - Statistics only grow, and only on a successful discharge.
//!
//! Every operation takes `&self` or `&mut self` and runs to completion, so a
//! discharge (remove, price, record) is never observable half-done. Sharing a
//! lot between threads requires wrapping the whole lot in one lock.

use crate::category::VehicleCategory;
use crate::clock::{Clock, SystemClock};
use crate::fee::FeeCalculator;
use crate::primitives::DEFAULT_CAPACITY;
use crate::types::{Amount, ParkingError, Plate};
use crate::vehicle::Vehicle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

// =============================================================================
// STATISTICS
// =============================================================================

/// Cumulative volume and revenue of a lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LotStatistics {
    /// Number of completed discharges.
    pub completed: u64,
    /// Sum of every fee charged.
    pub earnings: Amount,
}

impl LotStatistics {
    fn record(&mut self, fee: Amount) {
        self.completed = self.completed.saturating_add(1);
        self.earnings = self.earnings.saturating_add(fee);
    }
}

impl std::fmt::Display for LotStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} vehicles have checked out and have earnings of {}",
            self.completed, self.earnings
        )
    }
}

// =============================================================================
// OCCUPANCY
// =============================================================================

/// Point-in-time fill level of a lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occupancy {
    pub occupied: usize,
    pub capacity: usize,
    pub free: usize,
}

impl Occupancy {
    /// Fill level as a whole percentage (integer only). A zero-capacity lot
    /// reports 100.
    #[must_use]
    pub fn percent_full(&self) -> u8 {
        if self.capacity == 0 {
            return 100;
        }
        let percent = self.occupied.saturating_mul(100) / self.capacity;
        u8::try_from(percent.min(100)).unwrap_or(100)
    }
}

// =============================================================================
// RECEIPT
// =============================================================================

/// Everything known about a stay at the moment it ends.
///
/// Returned by [`ParkingLot::discharge_with_receipt`]; the lot itself keeps
/// nothing about discharged vehicles beyond its statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub plate: Plate,
    pub category: VehicleCategory,
    pub checked_in_at: DateTime<Utc>,
    pub checked_out_at: DateTime<Utc>,
    pub parked_minutes: u64,
    pub discounted: bool,
    pub fee: Amount,
}

// =============================================================================
// PARKING LOT
// =============================================================================

/// A bounded parking lot.
#[derive(Debug)]
pub struct ParkingLot {
    /// Admitted vehicles keyed by plate.
    vehicles: BTreeMap<Plate, Vehicle>,
    capacity: usize,
    statistics: LotStatistics,
    clock: Arc<dyn Clock>,
}

impl Default for ParkingLot {
    fn default() -> Self {
        Self::new()
    }
}

impl ParkingLot {
    /// Create an empty lot with the default capacity and the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty lot with a custom capacity and the system clock.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_clock(capacity, Arc::new(SystemClock))
    }

    /// Create an empty lot that reads "now" from `clock`.
    #[must_use]
    pub fn with_clock(capacity: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            vehicles: BTreeMap::new(),
            capacity,
            statistics: LotStatistics::default(),
            clock,
        }
    }

    /// The clock this lot prices stays against.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    // =========================================================================
    // ADMIT / DISCHARGE
    // =========================================================================

    /// Admit a vehicle.
    ///
    /// Refused, with the lot left untouched, if the lot is full or a vehicle
    /// with the same plate is already inside.
    pub fn admit(&mut self, vehicle: Vehicle) -> Result<(), ParkingError> {
        if self.is_full() || self.vehicles.contains_key(vehicle.plate()) {
            return Err(ParkingError::AdmissionRefused(vehicle.plate().clone()));
        }
        self.vehicles.insert(vehicle.plate().clone(), vehicle);
        Ok(())
    }

    /// Discharge the vehicle with this plate and return the fee charged.
    pub fn discharge(&mut self, plate: &str) -> Result<Amount, ParkingError> {
        self.discharge_with_receipt(plate).map(|receipt| receipt.fee)
    }

    /// Discharge the vehicle with this plate and return the full receipt.
    ///
    /// On success the vehicle is gone, `completed` grew by one and `earnings`
    /// grew by exactly `receipt.fee`. An unknown plate changes nothing.
    pub fn discharge_with_receipt(&mut self, plate: &str) -> Result<Receipt, ParkingError> {
        let vehicle = self
            .vehicles
            .remove(plate)
            .ok_or_else(|| ParkingError::NotFound(Plate::new(plate)))?;

        let checked_out_at = self.clock.now();
        let parked_minutes = vehicle.parked_minutes(checked_out_at);
        let discounted = vehicle.has_discount();
        let fee = FeeCalculator::compute_fee(vehicle.category(), parked_minutes, discounted);

        self.statistics.record(fee);

        Ok(Receipt {
            category: vehicle.category(),
            checked_in_at: vehicle.checked_in_at(),
            plate: vehicle.plate().clone(),
            checked_out_at,
            parked_minutes,
            discounted,
            fee,
        })
    }

    // =========================================================================
    // READERS
    // =========================================================================

    /// Snapshot of the running statistics.
    #[must_use]
    pub fn statistics(&self) -> LotStatistics {
        self.statistics
    }

    /// Plates of every admitted vehicle.
    ///
    /// The order carries no meaning (it happens to be sorted).
    #[must_use]
    pub fn admitted_plates(&self) -> Vec<Plate> {
        self.vehicles.keys().cloned().collect()
    }

    /// Iterate over admitted vehicles.
    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> {
        self.vehicles.values()
    }

    /// Look up an admitted vehicle.
    #[must_use]
    pub fn get(&self, plate: &str) -> Option<&Vehicle> {
        self.vehicles.get(plate)
    }

    /// Check whether a plate is currently admitted.
    #[must_use]
    pub fn contains(&self, plate: &str) -> bool {
        self.vehicles.contains_key(plate)
    }

    /// Number of admitted vehicles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Check whether no vehicle is admitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Check whether another admission would be refused for lack of space.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.vehicles.len() >= self.capacity
    }

    /// Maximum number of admitted vehicles.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current fill level.
    #[must_use]
    pub fn occupancy(&self) -> Occupancy {
        Occupancy {
            occupied: self.vehicles.len(),
            capacity: self.capacity,
            free: self.capacity.saturating_sub(self.vehicles.len()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
