//! Health check controller.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Application version.
    pub version: String,
    /// Time the checks ran.
    pub timestamp: DateTime<Utc>,
    /// Result of each dependency check, keyed by check name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub checks: BTreeMap<String, String>,
}

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .route("/health/live", get(liveness_check))
}

/// Runs every registered check and reports whether all passed.
async fn run_checks(state: &AppState) -> (bool, BTreeMap<String, String>) {
    let statuses = join_all(state.health_checks.iter().map(|check| check.check())).await;

    let mut healthy = true;
    let mut checks = BTreeMap::new();
    for (check, status) in state.health_checks.iter().zip(statuses) {
        let value = match status.reason() {
            None => "healthy".to_string(),
            Some(reason) => {
                healthy = false;
                warn!(check = check.name(), reason, "Health check failed");
                format!("unhealthy: {reason}")
            }
        };
        checks.insert(check.name().to_string(), value);
    }
    (healthy, checks)
}

fn response(healthy: bool, checks: BTreeMap<String, String>) -> HealthResponse {
    HealthResponse {
        status: if healthy { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        checks,
    }
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service health with dependency details", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let (healthy, checks) = run_checks(&state).await;
    Json(response(healthy, checks))
}

/// Readiness check endpoint.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = HealthResponse),
        (status = 503, description = "A dependency is unavailable", body = HealthResponse)
    )
)]
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    let (healthy, checks) = run_checks(&state).await;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response(healthy, checks)))
}

/// Liveness check endpoint.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive")
    )
)]
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
