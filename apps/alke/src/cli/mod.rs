//! # Alke CLI Module
//!
//! This module implements the CLI interface for Alke.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `rates` - Show the tariff table
//! - `quote` - Price a stay without parking
//! - `replay` - Run a scenario file through a fresh lot

mod commands;

use crate::config::AppConfig;
use alke_core::{ParkingError, VehicleCategory};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Alke - Parking Lot Server
///
/// A bounded parking lot with tiered, per-category fees.
#[derive(Parser, Debug)]
#[command(name = "alke")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML configuration file (default: ./alke.toml if present)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Lot capacity (overrides config)
        #[arg(long)]
        capacity: Option<usize>,
    },

    /// Show the tariff table
    Rates,

    /// Price a stay
    Quote {
        /// Vehicle category (car, motorcycle, mini-bus, bus)
        #[arg(short, long)]
        category: VehicleCategory,

        /// Minutes parked
        #[arg(short, long)]
        minutes: u64,

        /// Apply the discount card tariff
        #[arg(short, long)]
        discount: bool,
    },

    /// Replay a scenario file against a fresh lot
    Replay {
        /// Path to the scenario JSON file
        #[arg(short, long)]
        file: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), ParkingError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server {
            host,
            port,
            capacity,
        }) => {
            let mut config = AppConfig::load(cli.config.as_deref())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(capacity) = capacity {
                config.lot.capacity = capacity;
            }
            config.validate()?;
            cmd_server(&config).await
        }
        Some(Commands::Rates) | None => cmd_rates(json_mode),
        Some(Commands::Quote {
            category,
            minutes,
            discount,
        }) => cmd_quote(category, minutes, discount, json_mode),
        Some(Commands::Replay { file }) => cmd_replay(&file, json_mode),
    }
}
