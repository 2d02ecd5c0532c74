//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API.

use alke_core::{
    FeeBreakdown, LotStatistics, Occupancy, ParkingError, Plate, Receipt, Vehicle,
    VehicleCategory,
    primitives::{BASE_WINDOW_MINUTES, DISCOUNT_PERCENT, OVERAGE_BLOCK_MINUTES},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// RATES RESPONSE
// =============================================================================

/// Tariff for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateJson {
    pub category: VehicleCategory,
    pub base_rate: u64,
    pub block_rate: u64,
}

/// Full tariff table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatesResponse {
    pub base_window_minutes: u64,
    pub block_minutes: u64,
    pub discount_percent: u64,
    pub rates: Vec<RateJson>,
}

impl Default for RatesResponse {
    fn default() -> Self {
        Self {
            base_window_minutes: BASE_WINDOW_MINUTES,
            block_minutes: OVERAGE_BLOCK_MINUTES,
            discount_percent: DISCOUNT_PERCENT,
            rates: VehicleCategory::ALL
                .iter()
                .map(|&category| RateJson {
                    category,
                    base_rate: category.base_rate().value(),
                    block_rate: category.block_rate().value(),
                })
                .collect(),
        }
    }
}

// =============================================================================
// VEHICLES / STATISTICS RESPONSES
// =============================================================================

/// Admitted plates and fill level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehiclesResponse {
    pub plates: Vec<String>,
    pub occupied: usize,
    pub capacity: usize,
    pub free: usize,
    pub percent_full: u8,
}

impl VehiclesResponse {
    pub fn new(plates: Vec<Plate>, occupancy: Occupancy) -> Self {
        Self {
            plates: plates.into_iter().map(|p| p.as_str().to_string()).collect(),
            occupied: occupancy.occupied,
            capacity: occupancy.capacity,
            free: occupancy.free,
            percent_full: occupancy.percent_full(),
        }
    }
}

/// Running totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsResponse {
    pub completed: u64,
    pub earnings: u64,
}

impl From<LotStatistics> for StatisticsResponse {
    fn from(stats: LotStatistics) -> Self {
        Self {
            completed: stats.completed,
            earnings: stats.earnings.value(),
        }
    }
}

// =============================================================================
// ADMIT REQUEST/RESPONSE
// =============================================================================

/// Vehicle admission request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmitRequest {
    pub plate: String,
    pub category: String,
    #[serde(default)]
    pub discount_card: Option<String>,
}

impl AdmitRequest {
    /// Convert to a Vehicle checked in at `now`, validating fields.
    ///
    /// Plate, category and discount card are all checked here, at the API
    /// boundary, before the lot is touched.
    pub fn to_vehicle(&self, now: DateTime<Utc>) -> Result<Vehicle, ParkingError> {
        let plate = Plate::parse(&self.plate)?;
        let category: VehicleCategory = self.category.parse()?;
        if let Some(card) = &self.discount_card {
            Vehicle::validate_discount_card(card)?;
        }

        let mut vehicle = Vehicle::new(plate, category, now);
        vehicle.set_discount_card(self.discount_card.clone());
        Ok(vehicle)
    }
}

/// Vehicle admission response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmitResponse {
    pub success: bool,
    pub plate: Option<String>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl AdmitResponse {
    pub fn success(vehicle: &Vehicle) -> Self {
        Self {
            success: true,
            plate: Some(vehicle.plate().as_str().to_string()),
            checked_in_at: Some(vehicle.checked_in_at()),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            plate: None,
            checked_in_at: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// DISCHARGE RESPONSE
// =============================================================================

/// Vehicle discharge response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DischargeResponse {
    pub success: bool,
    pub fee: Option<u64>,
    pub receipt: Option<Receipt>,
    pub error: Option<String>,
}

impl DischargeResponse {
    pub fn success(receipt: Receipt) -> Self {
        Self {
            success: true,
            fee: Some(receipt.fee.value()),
            receipt: Some(receipt),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            fee: None,
            receipt: None,
            error: Some(msg.into()),
        }
    }
}

// =============================================================================
// QUOTE REQUEST/RESPONSE
// =============================================================================

/// Fee quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub category: String,
    pub minutes: u64,
    #[serde(default)]
    pub discount: bool,
}

/// Fee quote response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    pub success: bool,
    pub breakdown: Option<FeeBreakdown>,
    pub error: Option<String>,
}

impl QuoteResponse {
    pub fn success(breakdown: FeeBreakdown) -> Self {
        Self {
            success: true,
            breakdown: Some(breakdown),
            error: None,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            breakdown: None,
            error: Some(msg.into()),
        }
    }
}
