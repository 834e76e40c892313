//! Health check endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::api::types::Json;

use super::state::AppState;

/// Health response with optional component status
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<HealthCheck>>,
}

#[derive(Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Individual component health check
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub latency_ms: u64,
}

/// Liveness: 200 whenever the process serves requests
pub async fn health_check() -> impl IntoResponse {
    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: None,
    };

    (StatusCode::OK, Json(response))
}

/// Readiness: both rule services answer a read
pub async fn ready_check(State(state): State<AppState>) -> impl IntoResponse {
    let start = Instant::now();
    let projects = state.project_service.list().await.map(|_| ());
    let projects = health_check_for("project_service", projects, start);

    let start = Instant::now();
    let teams = state.team_service.count().await.map(|_| ());
    let teams = health_check_for("team_service", teams, start);

    let overall = if projects.status == HealthStatus::Healthy && teams.status == HealthStatus::Healthy
    {
        HealthStatus::Healthy
    } else {
        HealthStatus::Unhealthy
    };

    let status_code = match overall {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    let response = HealthResponse {
        status: overall,
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: Some(vec![projects, teams]),
    };

    (status_code, Json(response))
}

fn health_check_for<E: std::fmt::Display>(
    name: &str,
    result: Result<(), E>,
    start: Instant,
) -> HealthCheck {
    let latency_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok(()) => HealthCheck {
            name: name.to_string(),
            status: HealthStatus::Healthy,
            message: None,
            latency_ms,
        },
        Err(e) => HealthCheck {
            name: name.to_string(),
            status: HealthStatus::Unhealthy,
            message: Some(e.to_string()),
            latency_ms,
        },
    }
}
