//! # alke-core
//!
//! The parking lot engine for Alke - THE LOT.
//!
//! A bounded lot admits and discharges vehicles, prices every stay from its
//! category and duration (with an optional discount card), and keeps running
//! volume and revenue statistics.
//!
//! ## Components
//!
//! - `category` → static tariff per vehicle category
//! - `vehicle` → plate, category, check-in instant, discount card
//! - `fee` → pure fee calculation
//! - `lot` → capacity, uniqueness, admit/discharge, statistics
//! - `clock` → injectable source of "now"
//!
//! ## Architectural Constraints
//!
//! - Synchronous and single-threaded: every call runs to completion
//! - No async, no network, no logging dependencies (pure Rust)
//! - Integer money only; no floating point anywhere
//! - Expected failures are `Err` values, never panics
//!
//! ## Example
//!
//! ```
//! use alke_core::{ManualClock, ParkingLot, Vehicle, VehicleCategory};
//! use std::sync::Arc;
//!
//! let clock = Arc::new(ManualClock::at_epoch());
//! let mut lot = ParkingLot::with_clock(20, clock.clone());
//!
//! lot.admit(Vehicle::arriving("AA111AA", VehicleCategory::Car, clock.as_ref()))
//!     .expect("room available");
//! clock.advance_minutes(135).expect("in range");
//!
//! let fee = lot.discharge("AA111AA").expect("admitted");
//! assert_eq!(fee.value(), 25);
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod category;
pub mod clock;
pub mod fee;
pub mod lot;
pub mod primitives;
pub mod types;
pub mod vehicle;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Amount, ParkingError, Plate};

// =============================================================================
// RE-EXPORTS: Lot Engine
// =============================================================================

pub use category::VehicleCategory;
pub use clock::{Clock, ManualClock, SystemClock, elapsed_minutes};
pub use fee::{FeeBreakdown, FeeCalculator};
pub use lot::{LotStatistics, Occupancy, ParkingLot, Receipt};
pub use vehicle::Vehicle;
