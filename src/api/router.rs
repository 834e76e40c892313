use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use super::health;
use super::organization;
use super::state::AppState;

/// Create the full router with application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .nest("/api", organization::create_organization_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
