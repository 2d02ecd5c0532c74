//! # Middleware Module
//!
//! One token bucket shared by every client of the lot. `server.rate_limit`
//! (or `ALKE_RATE_LIMIT`) sets the refill in requests per second; `0` keeps
//! the layer off entirely, see `create_router`.
//!
//! A rejected request gets `429` with a `Retry-After` header and the same
//! `{"success": false, "error": ...}` envelope the handlers use.

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    Quota, RateLimiter,
    clock::{Clock, DefaultClock},
    state::{InMemoryState, NotKeyed},
};
use serde_json::json;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Refill used when a zero quota reaches the limiter anyway.
const FALLBACK_RPS: u32 = 100;

pub type LotRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

pub fn create_rate_limiter(requests_per_second: u32) -> LotRateLimiter {
    let rps = NonZeroU32::new(requests_per_second)
        .or_else(|| NonZeroU32::new(FALLBACK_RPS))
        .unwrap_or(NonZeroU32::MIN);
    Arc::new(RateLimiter::direct(Quota::per_second(rps)))
}

/// Whole seconds to wait, rounded up and never below one.
fn retry_after_secs(wait: Duration) -> u64 {
    let secs = wait.as_secs() + u64::from(wait.subsec_nanos() > 0);
    secs.max(1)
}

pub async fn rate_limit_middleware(
    State(limiter): State<LotRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let not_until = match limiter.check() {
        Ok(()) => return next.run(request).await,
        Err(not_until) => not_until,
    };

    let wait = not_until.wait_time_from(DefaultClock::default().now());
    let retry_after = retry_after_secs(wait);
    tracing::warn!(
        event = "rate_limited",
        path = %request.uri().path(),
        retry_after,
        "Rate limit exceeded"
    );

    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(json!({"success": false, "error": "rate limit exceeded"})),
    )
        .into_response();
    response
        .headers_mut()
        .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
    response
}

// =============================================================================
// TESTS
// =============================================================================
