use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::error::ApiError;
use crate::state::AppState;

/// Bearer-token gate for the admin back-office.
///
/// Admin routes stay dark (503) until an admin token is configured; after
/// that, every request must carry the token. Comparison goes through SHA-256
/// digests so it does not short-circuit on the first differing byte.
pub async fn admin_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.config.security.admin_token.as_deref() else {
        return Err(ApiError::service_unavailable("Admin API is not configured"));
    };

    let token = extract_bearer_token(request.headers())?;
    if !digests_match(&token, expected) {
        tracing::warn!("admin request rejected: invalid token");
        return Err(ApiError::unauthorized("Invalid admin token"));
    }

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::unauthorized("Invalid Authorization header format"))?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err(ApiError::unauthorized("Empty bearer token"));
        }
        Ok(token.to_string())
    } else {
        Err(ApiError::unauthorized(
            "Authorization header must use Bearer token format",
        ))
    }
}

fn digests_match(presented: &str, expected: &str) -> bool {
    Sha256::digest(presented.as_bytes()) == Sha256::digest(expected.as_bytes())
}
