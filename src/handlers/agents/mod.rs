use axum::extract::{Path, State};
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::agent_registry::{Agent, AgentChanges};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAgentRequest {
    pub name: String,
    pub model: String,
    #[serde(default)]
    pub instructions: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateAgentRequest {
    pub name: Option<String>,
    pub model: Option<String>,
    pub instructions: Option<String>,
}

/// GET /api/agents - List all agents
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Agent>> {
    Ok(ApiResponse::success(state.agents.list()))
}

/// POST /api/agents - Create an agent
pub async fn create(
    State(state): State<AppState>,
    axum::Json(payload): axum::Json<CreateAgentRequest>,
) -> ApiResult<Agent> {
    let mut field_errors = HashMap::new();
    if payload.name.trim().is_empty() {
        field_errors.insert("name".to_string(), "This field is required".to_string());
    }
    if payload.model.trim().is_empty() {
        field_errors.insert("model".to_string(), "This field is required".to_string());
    }
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error(
            "Missing required fields",
            Some(field_errors),
        ));
    }

    let agent = state.agents.create(
        payload.name.trim().to_string(),
        payload.model.trim().to_string(),
        payload.instructions,
    );
    tracing::info!(agent_id = %agent.id, name = %agent.name, "agent created");

    Ok(ApiResponse::created(agent))
}

/// GET /api/agents/:id - Get a single agent by ID
pub async fn show(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<Agent> {
    state
        .agents
        .get(id)
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::not_found(format!("agent {} not found", id)))
}

/// PUT /api/agents/:id - Update an agent's fields
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    axum::Json(payload): axum::Json<UpdateAgentRequest>,
) -> ApiResult<Agent> {
    if let Some(name) = &payload.name {
        if name.trim().is_empty() {
            return Err(ApiError::bad_request("name cannot be empty"));
        }
    }
    if let Some(model) = &payload.model {
        if model.trim().is_empty() {
            return Err(ApiError::bad_request("model cannot be empty"));
        }
    }

    let changes = AgentChanges {
        name: payload.name.map(|n| n.trim().to_string()),
        model: payload.model.map(|m| m.trim().to_string()),
        instructions: payload.instructions,
    };

    state
        .agents
        .update(id, changes)
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::not_found(format!("agent {} not found", id)))
}

/// DELETE /api/agents/:id - Remove an agent
pub async fn remove(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<()> {
    if state.agents.remove(id) {
        tracing::info!(agent_id = %id, "agent removed");
        Ok(ApiResponse::<()>::no_content())
    } else {
        Err(ApiError::not_found(format!("agent {} not found", id)))
    }
}
