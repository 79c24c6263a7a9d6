use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - Service info and endpoint map
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Aviary API",
            "version": version,
            "description": "Multi-tenant agent management platform API",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "agents": "/api/agents[/:id] (rate limited)",
                "admin": "/api/admin/limits[/:identifier] (admin token required)",
            }
        }
    }))
}

/// GET /health - Liveness probe with throttling-store stats
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
            "rate_limit_buckets": state.store.len().await,
            "agents": state.agents.len(),
        }
    }))
}
