//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.
//!
//! Admit and discharge hold the write lock for their whole duration, so the
//! lot's own atomicity (remove, price, record) carries over to concurrent
//! clients.

use super::{
    AppState,
    types::{
        AdmitRequest, AdmitResponse, DischargeResponse, HealthResponse, QuoteRequest,
        QuoteResponse, RatesResponse, StatisticsResponse, VehiclesResponse,
    },
};
use alke_core::{FeeCalculator, ParkingError, VehicleCategory};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// RATES HANDLER
// =============================================================================

/// Tariff table.
pub async fn rates_handler() -> impl IntoResponse {
    Json(RatesResponse::default())
}

// =============================================================================
// VEHICLES HANDLER
// =============================================================================

/// List admitted plates.
pub async fn vehicles_handler(State(state): State<AppState>) -> impl IntoResponse {
    let lot = state.lot.read().await;
    let response = VehiclesResponse::new(lot.admitted_plates(), lot.occupancy());

    (StatusCode::OK, Json(response))
}

// =============================================================================
// STATISTICS HANDLER
// =============================================================================

/// Completed discharges and cumulative earnings.
pub async fn statistics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let lot = state.lot.read().await;

    (
        StatusCode::OK,
        Json(StatisticsResponse::from(lot.statistics())),
    )
}

// =============================================================================
// ADMIT HANDLER
// =============================================================================

/// Admit a vehicle.
pub async fn admit_handler(
    State(state): State<AppState>,
    Json(request): Json<AdmitRequest>,
) -> impl IntoResponse {
    let mut lot = state.lot.write().await;

    let vehicle = match request.to_vehicle(lot.clock().now()) {
        Ok(v) => v,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(AdmitResponse::error(format!("Invalid vehicle: {}", e))),
            );
        }
    };

    let response = AdmitResponse::success(&vehicle);
    let category = vehicle.category();

    match lot.admit(vehicle) {
        Ok(()) => {
            tracing::info!(
                event = "admit",
                plate = %request.plate,
                category = %category,
                occupied = lot.len(),
                "Vehicle admitted"
            );
            (StatusCode::CREATED, Json(response))
        }
        Err(e) => {
            tracing::warn!(
                event = "admit_refused",
                plate = %request.plate,
                occupied = lot.len(),
                "Admission refused"
            );
            (StatusCode::CONFLICT, Json(AdmitResponse::error(e.to_string())))
        }
    }
}

// =============================================================================
// DISCHARGE HANDLER
// =============================================================================

/// Discharge a vehicle and return its receipt.
pub async fn discharge_handler(
    State(state): State<AppState>,
    Path(plate): Path<String>,
) -> impl IntoResponse {
    let mut lot = state.lot.write().await;

    match lot.discharge_with_receipt(&plate) {
        Ok(receipt) => {
            tracing::info!(
                event = "discharge",
                plate = %plate,
                minutes = receipt.parked_minutes,
                fee = receipt.fee.value(),
                discounted = receipt.discounted,
                "Vehicle discharged"
            );
            (StatusCode::OK, Json(DischargeResponse::success(receipt)))
        }
        Err(e @ ParkingError::NotFound(_)) => {
            tracing::warn!(event = "discharge_not_found", plate = %plate, "Unknown plate");
            (
                StatusCode::NOT_FOUND,
                Json(DischargeResponse::error(e.to_string())),
            )
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(DischargeResponse::error(format!("Discharge failed: {}", e))),
        ),
    }
}

// =============================================================================
// QUOTE HANDLER
// =============================================================================

/// Price a hypothetical stay without touching the lot.
pub async fn quote_handler(Json(request): Json<QuoteRequest>) -> impl IntoResponse {
    match request.category.parse::<VehicleCategory>() {
        Ok(category) => {
            let breakdown = FeeCalculator::breakdown(category, request.minutes, request.discount);
            (StatusCode::OK, Json(QuoteResponse::success(breakdown)))
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(QuoteResponse::error(format!("Invalid quote: {}", e))),
        ),
    }
}
