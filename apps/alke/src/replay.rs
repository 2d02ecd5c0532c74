//! # Scenario Replay
//!
//! Drives a lot through a scripted day using a manual clock.
//!
//! A scenario is a JSON document listing admit and discharge events, each
//! stamped with the minute (from the scenario start) at which it happens.
//! Refused admissions and unknown discharges are reported as outcomes; only a
//! malformed scenario is an error.
//!
//! ```json
//! {
//!   "capacity": 20,
//!   "start": "2026-01-01T08:00:00Z",
//!   "events": [
//!     {"at_minute": 0, "action": "admit", "plate": "AA111AA", "category": "car"},
//!     {"at_minute": 135, "action": "discharge", "plate": "AA111AA"}
//!   ]
//! }
//! ```

use alke_core::{
    LotStatistics, ManualClock, ParkingError, ParkingLot, Plate, Receipt, Vehicle,
    VehicleCategory, primitives::DEFAULT_CAPACITY,
};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Maximum number of events in one scenario.
pub const MAX_SCENARIO_EVENTS: usize = 10_000;

// =============================================================================
// SCENARIO FORMAT
// =============================================================================

/// A scripted sequence of lot events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Instant of minute zero. Defaults to the Unix epoch.
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    pub events: Vec<ScenarioEvent>,
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

/// One timed event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioEvent {
    pub at_minute: u64,
    #[serde(flatten)]
    pub action: ScenarioAction,
}

/// What happens at an event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScenarioAction {
    Admit {
        plate: String,
        category: VehicleCategory,
        #[serde(default)]
        discount_card: Option<String>,
    },
    Discharge {
        plate: String,
    },
}

impl Scenario {
    /// Parse a scenario from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ParkingError> {
        let scenario: Self = serde_json::from_str(text)
            .map_err(|e| ParkingError::InvalidScenario(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check capacity, ordering, size, timestamps and every plate/card
    /// before anything runs.
    pub fn validate(&self) -> Result<(), ParkingError> {
        if self.capacity == 0 {
            return Err(ParkingError::InvalidScenario(
                "capacity must be at least 1".to_string(),
            ));
        }
        if self.events.len() > MAX_SCENARIO_EVENTS {
            return Err(ParkingError::InvalidScenario(format!(
                "{} events exceeds maximum {}",
                self.events.len(),
                MAX_SCENARIO_EVENTS
            )));
        }

        let mut last_minute = 0;
        for (index, event) in self.events.iter().enumerate() {
            if event.at_minute < last_minute {
                return Err(ParkingError::InvalidScenario(format!(
                    "event {} at minute {} goes back in time (previous event at minute {})",
                    index, event.at_minute, last_minute
                )));
            }
            last_minute = event.at_minute;

            if self.instant_at(event.at_minute).is_none() {
                return Err(ParkingError::InvalidScenario(format!(
                    "event {} at minute {} is past the last representable instant",
                    index, event.at_minute
                )));
            }

            match &event.action {
                ScenarioAction::Admit {
                    plate,
                    discount_card,
                    ..
                } => {
                    Plate::parse(plate)?;
                    if let Some(card) = discount_card {
                        Vehicle::validate_discount_card(card)?;
                    }
                }
                ScenarioAction::Discharge { plate } => {
                    Plate::parse(plate)?;
                }
            }
        }
        Ok(())
    }

    /// Instant of `minute`, or `None` if it cannot be represented.
    fn instant_at(&self, minute: u64) -> Option<DateTime<Utc>> {
        let offset = TimeDelta::try_minutes(i64::try_from(minute).ok()?)?;
        self.start.unwrap_or_default().checked_add_signed(offset)
    }
}

// =============================================================================
// REPLAY REPORT
// =============================================================================

/// Result of a single scenario event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReplayOutcome {
    Admitted { at_minute: u64, plate: Plate },
    Refused { at_minute: u64, plate: Plate },
    Discharged { at_minute: u64, receipt: Receipt },
    NotFound { at_minute: u64, plate: String },
}

/// Everything a replay produced.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub outcomes: Vec<ReplayOutcome>,
    pub statistics: LotStatistics,
    /// Plates still inside when the scenario ended.
    pub remaining: Vec<Plate>,
}

// =============================================================================
// REPLAY
// =============================================================================

/// Run a scenario against a fresh lot.
pub fn replay(scenario: &Scenario) -> Result<ReplayReport, ParkingError> {
    scenario.validate()?;

    let clock = Arc::new(ManualClock::new(scenario.start.unwrap_or_default()));
    let mut lot = ParkingLot::with_clock(scenario.capacity, clock.clone());
    let mut outcomes = Vec::with_capacity(scenario.events.len());
    let mut now_minute = 0;

    for event in &scenario.events {
        clock.advance_minutes(event.at_minute - now_minute)?;
        now_minute = event.at_minute;

        let outcome = match &event.action {
            ScenarioAction::Admit {
                plate,
                category,
                discount_card,
            } => {
                let mut vehicle = Vehicle::arriving(plate.as_str(), *category, clock.as_ref());
                vehicle.set_discount_card(discount_card.clone());
                let plate = vehicle.plate().clone();
                match lot.admit(vehicle) {
                    Ok(()) => ReplayOutcome::Admitted {
                        at_minute: now_minute,
                        plate,
                    },
                    Err(_) => ReplayOutcome::Refused {
                        at_minute: now_minute,
                        plate,
                    },
                }
            }
            ScenarioAction::Discharge { plate } => match lot.discharge_with_receipt(plate) {
                Ok(receipt) => ReplayOutcome::Discharged {
                    at_minute: now_minute,
                    receipt,
                },
                Err(_) => ReplayOutcome::NotFound {
                    at_minute: now_minute,
                    plate: plate.clone(),
                },
            },
        };

        tracing::debug!(?outcome, "Replayed event");
        outcomes.push(outcome);
    }

    Ok(ReplayReport {
        outcomes,
        statistics: lot.statistics(),
        remaining: lot.admitted_plates(),
    })
}

// =============================================================================
// TESTS
// =============================================================================
