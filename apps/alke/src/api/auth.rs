//! # Authentication Module
//!
//! Optional bearer-token authentication for the Alke HTTP API.
//!
//! When `server.api_key` (or `ALKE_API_KEY`) is set, every request except
//! `GET /health` must carry:
//!
//! ```text
//! Authorization: Bearer <api-key>
//! ```

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use subtle::ConstantTimeEq;

/// The configured API key, shared with the middleware.
#[derive(Clone)]
pub struct ApiKey(Arc<str>);

impl ApiKey {
    pub fn new(key: &str) -> Self {
        Self(Arc::from(key))
    }

    /// Constant-time comparison against a presented token.
    ///
    /// The length check is folded in after the byte comparison so both
    /// sides are always walked in full.
    pub fn matches(&self, presented: &str) -> bool {
        let expected = self.0.as_bytes();
        let presented = presented.as_bytes();
        let len = expected.len().max(presented.len());

        let mut a = vec![0u8; len];
        let mut b = vec![0u8; len];
        a[..expected.len()].copy_from_slice(expected);
        b[..presented.len()].copy_from_slice(presented);

        let same_bytes: bool = a.ct_eq(&b).into();
        same_bytes && expected.len() == presented.len()
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Accepts both `Bearer <key>` and a raw `<key>`.
fn presented_token(header_value: &str) -> &str {
    header_value
        .strip_prefix("Bearer ")
        .unwrap_or(header_value)
}

/// API key authentication middleware.
pub async fn api_key_auth_middleware(
    State(key): State<ApiKey>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    if request.uri().path() == "/health" {
        return Ok(next.run(request).await);
    }

    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(presented_token);

    match presented {
        Some(token) if key.matches(token) => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!(
                event = "auth_failure",
                reason = "invalid_api_key",
                "Authentication failed: invalid API key"
            );
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
        None => {
            tracing::warn!(
                event = "auth_failure",
                reason = "missing_authorization_header",
                "Missing Authorization header"
            );
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
