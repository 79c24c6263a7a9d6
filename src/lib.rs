use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod rate_limit;
pub mod services;
pub mod state;

use crate::state::AppState;

/// Build the full router over the given state.
pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::public::root))
        .route("/health", get(handlers::public::health))
        // Rate-limited API
        .merge(agent_routes(&state))
        // Admin back-office
        .merge(admin_routes(&state));

    // Global middleware
    if state.config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn agent_routes(state: &AppState) -> Router<AppState> {
    use handlers::agents;

    Router::new()
        .route("/api/agents", get(agents::list).post(agents::create))
        .route(
            "/api/agents/:id",
            get(agents::show).put(agents::update).delete(agents::remove),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::throttle_api))
}

fn admin_routes(state: &AppState) -> Router<AppState> {
    use handlers::admin;

    Router::new()
        .route("/api/admin/limits", get(admin::limits_list))
        .route(
            "/api/admin/limits/:identifier",
            get(admin::limits_show).delete(admin::limits_reset),
        )
        // Layers run outermost-last: throttle_auth sees the request before
        // admin_auth, so token guessing burns auth quota
        .route_layer(from_fn_with_state(state.clone(), middleware::admin_auth))
        .route_layer(from_fn_with_state(state.clone(), middleware::throttle_auth))
}
