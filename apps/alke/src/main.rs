//! # Alke - Parking Lot Server
//!
//! The main binary for the Alke parking lot.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for tariffs, quotes and scenario replay
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                apps/alke (THE BINARY)                │
//! │                                                      │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐   │
//! │  │    CLI      │  │  HTTP API   │  │   Replay    │   │
//! │  │   (clap)    │  │   (axum)    │  │ (scenario)  │   │
//! │  └──────┬──────┘  └──────┬──────┘  └──────┬──────┘   │
//! │         └────────────────┼────────────────┘          │
//! │                          ▼                           │
//! │                  ┌───────────────┐                   │
//! │                  │   alke-core   │                   │
//! │                  │   (THE LOT)   │                   │
//! │                  └───────────────┘                   │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! alke server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! alke rates
//! alke quote -c car -m 135 --discount
//! alke replay -f demos/alke_day.json
//! ```

use alke::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // ALKE_LOG_FORMAT=json enables machine-parseable output. Logs go to
    // stderr; stdout carries command output only.
    let log_format = std::env::var("ALKE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "alke=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Alke startup banner.
fn print_banner() {
    println!(
        r#"
     _    _     _  _______
    / \  | |   | |/ / ____|
   / _ \ | |   | ' /|  _|
  / ___ \| |___| . \| |___
 /_/   \_\_____|_|\_\_____|

  Alke Parking v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
