//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, RatesResponse};
use crate::config::AppConfig;
use crate::replay::{ReplayOutcome, ReplayReport, Scenario, replay};
use alke_core::{FeeCalculator, ParkingError, VehicleCategory};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE LIMITS
// =============================================================================

/// Maximum file size for scenario replay (16 MB).
const MAX_SCENARIO_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// Resolve a path to an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, ParkingError> {
    let canonical = path.canonicalize().map_err(|e| {
        ParkingError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(ParkingError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Reject files larger than `max_size` before reading them.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), ParkingError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| ParkingError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(ParkingError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

fn render_json(value: &impl serde::Serialize) -> Result<String, ParkingError> {
    serde_json::to_string_pretty(value).map_err(|e| ParkingError::SerializationError(e.to_string()))
}

fn print_json(value: &impl serde::Serialize) -> Result<(), ParkingError> {
    println!("{}", render_json(value)?);
    Ok(())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &AppConfig) -> Result<(), ParkingError> {
    println!("Alke Parking Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", config.server.host);
    println!("  Port:     {}", config.server.port);
    println!("  Capacity: {}", config.lot.capacity);
    println!();
    println!("Endpoints:");
    println!("  GET    /health           - Health check");
    println!("  GET    /rates            - Tariff table");
    println!("  GET    /vehicles         - Admitted plates");
    println!("  POST   /vehicles         - Admit a vehicle");
    println!("  DELETE /vehicles/{{plate}} - Discharge a vehicle");
    println!("  GET    /statistics       - Checkouts and earnings");
    println!("  POST   /quote            - Price a stay");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(config).await
}

// =============================================================================
// RATES COMMAND
// =============================================================================

/// Show the tariff table.
pub fn cmd_rates(json_mode: bool) -> Result<(), ParkingError> {
    let rates = RatesResponse::default();

    if json_mode {
        return print_json(&rates);
    }

    println!("Alke Tariff");
    println!("===========");
    println!(
        "First {} minutes flat, then per started {}-minute block.",
        rates.base_window_minutes, rates.block_minutes
    );
    println!("Discount card: {}% off, rounded down.", rates.discount_percent);
    println!();
    println!("{:<12} {:>6} {:>8}", "Category", "Base", "Block");
    for rate in &rates.rates {
        println!(
            "{:<12} {:>6} {:>8}",
            rate.category.as_str(),
            format!("${}", rate.base_rate),
            format!("${}", rate.block_rate)
        );
    }

    Ok(())
}

// =============================================================================
// QUOTE COMMAND
// =============================================================================

/// Price a stay.
pub fn cmd_quote(
    category: VehicleCategory,
    minutes: u64,
    discount: bool,
    json_mode: bool,
) -> Result<(), ParkingError> {
    let breakdown = FeeCalculator::breakdown(category, minutes, discount);

    if json_mode {
        return print_json(&serde_json::json!({
            "category": category,
            "minutes": minutes,
            "discount": discount,
            "breakdown": breakdown,
        }));
    }

    println!("Quote: {} parked {} minutes", category, minutes);
    println!("  Base rate:      {}", breakdown.base_rate);
    println!(
        "  Overage:        {} x {}",
        breakdown.overage_blocks, breakdown.block_rate
    );
    println!("  Gross:          {}", breakdown.gross);
    if discount {
        println!("  Discount card: -{}", breakdown.discount);
    }
    println!("  Total:          {}", breakdown.total);

    Ok(())
}

// =============================================================================
// REPLAY COMMAND
// =============================================================================

/// Run a scenario file and print every outcome.
pub fn cmd_replay(file: &Path, json_mode: bool) -> Result<(), ParkingError> {
    let report = replay_file(file)?;

    if json_mode {
        return print_json(&report);
    }

    print_report(&report);
    Ok(())
}

fn replay_file(file: &Path) -> Result<ReplayReport, ParkingError> {
    let path = validate_file_path(file)?;
    validate_file_size(&path, MAX_SCENARIO_FILE_SIZE)?;

    let text = std::fs::read_to_string(&path)
        .map_err(|e| ParkingError::IoError(format!("Cannot read scenario: {}", e)))?;
    let scenario = Scenario::from_json(&text)?;

    tracing::info!(
        events = scenario.events.len(),
        capacity = scenario.capacity,
        "Replaying scenario {}",
        path.display()
    );
    replay(&scenario)
}

fn print_report(report: &ReplayReport) {
    for outcome in &report.outcomes {
        match outcome {
            ReplayOutcome::Admitted { at_minute, plate } => {
                println!("[{:>5}] {:<10} Welcome to AlkeParking!", at_minute, plate);
            }
            ReplayOutcome::Refused { at_minute, plate } => {
                println!("[{:>5}] {:<10} Sorry, the check-in failed", at_minute, plate);
            }
            ReplayOutcome::Discharged { at_minute, receipt } => {
                println!(
                    "[{:>5}] {:<10} Your fee is {}. Come back soon",
                    at_minute, receipt.plate, receipt.fee
                );
            }
            ReplayOutcome::NotFound { at_minute, plate } => {
                println!("[{:>5}] {:<10} Sorry, the check-out failed", at_minute, plate);
            }
        }
    }

    println!();
    println!("{}", report.statistics);
    println!("Still parked: {}", report.remaining.len());
}

// =============================================================================
// TESTS
// =============================================================================
