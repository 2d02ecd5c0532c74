//! # Alke HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /rates` - Tariff table
//! - `GET /vehicles` - Admitted plates and occupancy
//! - `POST /vehicles` - Admit a vehicle
//! - `DELETE /vehicles/{plate}` - Discharge a vehicle
//! - `GET /statistics` - Completed discharges and earnings
//! - `POST /quote` - Price a stay without parking
//!
//! ## Security Configuration
//!
//! - `server.cors_origins`: allowed origins, `["*"]` for all (default: localhost only)
//! - `server.rate_limit`: requests per second (default: 100, 0 to disable)
//! - `server.api_key`: if set, requires Bearer token authentication

mod auth;
mod handlers;
mod middleware;
mod types;

pub use auth::ApiKey;
pub use middleware::create_rate_limiter;
pub use types::{
    AdmitRequest, AdmitResponse, DischargeResponse, HealthResponse, QuoteRequest, QuoteResponse,
    RateJson, RatesResponse, StatisticsResponse, VehiclesResponse,
};

use crate::config::{AppConfig, ServerConfig};
use alke_core::{ParkingError, ParkingLot};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (64 KB). Every request body is a small JSON object.
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the lot.
#[derive(Clone)]
pub struct AppState {
    /// The lot. One lock guards admit, discharge and statistics together.
    pub lot: Arc<RwLock<ParkingLot>>,
}

impl AppState {
    /// Create new app state around a lot.
    #[must_use]
    pub fn new(lot: ParkingLot) -> Self {
        Self {
            lot: Arc::new(RwLock::new(lot)),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build the CORS layer from configured origins.
///
/// - `["*"]`: allows all origins
/// - empty: localhost only
/// - otherwise: the listed origins; invalid entries are skipped
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS: Allowing ALL origins. This is insecure for production!");
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.trim().parse::<HeaderValue>() {
            Ok(hv) => {
                tracing::info!("CORS: Allowing origin: {}", origin);
                Some(hv)
            }
            Err(e) => {
                tracing::warn!("CORS: Invalid origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    let allowed = if allowed.is_empty() {
        tracing::info!("CORS: No origins configured, defaulting to localhost only");
        localhost_origins()
    } else {
        allowed
    };

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

fn localhost_origins() -> Vec<HeaderValue> {
    [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect()
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Rate Limiting - if `rate_limit > 0`
/// 4. Authentication - if an API key is configured
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/rates", get(handlers::rates_handler))
        .route(
            "/vehicles",
            get(handlers::vehicles_handler).post(handlers::admit_handler),
        )
        .route("/vehicles/{plate}", delete(handlers::discharge_handler))
        .route("/statistics", get(handlers::statistics_handler))
        .route("/quote", post(handlers::quote_handler));

    match server.api_key.as_deref() {
        Some(key) => {
            tracing::info!("API key authentication enabled");
            router = router.layer(axum_middleware::from_fn_with_state(
                ApiKey::new(key),
                auth::api_key_auth_middleware,
            ));
        }
        None => tracing::warn!(
            "API key authentication DISABLED - all endpoints are publicly accessible! \
             Set server.api_key or ALKE_API_KEY to enable authentication."
        ),
    }

    if server.rate_limit > 0 {
        tracing::info!(
            "Rate limiting enabled: {} requests/second",
            server.rate_limit
        );
        router = router.layer(axum_middleware::from_fn_with_state(
            create_rate_limiter(server.rate_limit),
            middleware::rate_limit_middleware,
        ));
    } else {
        tracing::info!("Rate limiting disabled");
    }

    router
        .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors_layer(&server.cors_origins)),
        )
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server with a fresh lot and run until Ctrl+C.
pub async fn run_server(config: &AppConfig) -> Result<(), ParkingError> {
    let state = AppState::new(ParkingLot::with_capacity(config.lot.capacity));
    let router = create_router(state, &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ParkingError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!(
        capacity = config.lot.capacity,
        "Alke HTTP server listening on {}",
        addr
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ParkingError::IoError(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler, serve until the process is killed.
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server");
}
