use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Bucket shared by every caller that arrives without a forwarded address.
pub const FALLBACK_CLIENT_KEY: &str = "unknown";

/// Throttling for the general API surface. Reads draw from the api profile,
/// mutating methods from the tighter strict profile.
pub async fn throttle_api(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config.api.enable_rate_limiting {
        return Ok(next.run(request).await);
    }

    let method = request.method();
    let limiter = if *method == Method::GET || *method == Method::HEAD {
        &state.api_limits
    } else {
        &state.strict_limits
    };

    let key = client_key(request.headers());
    limiter.check(&key).await?;

    Ok(next.run(request).await)
}

/// Throttling for credential-related endpoints: long window, low attempt
/// ceiling. Runs before the token is verified so failed guesses burn quota.
pub async fn throttle_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config.api.enable_rate_limiting {
        return Ok(next.run(request).await);
    }

    let key = client_key(request.headers());
    state.auth_limits.check(&key).await?;

    Ok(next.run(request).await)
}

/// Identifier for rate-limit partitioning, read from proxy headers.
///
/// Takes the first entry of `x-forwarded-for` (the client, with later hops
/// appended after it), then `x-real-ip`, then the shared fallback bucket.
/// Any non-empty string is accepted as-is.
pub fn client_key(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return real_ip.to_string();
        }
    }

    FALLBACK_CLIENT_KEY.to_string()
}
