//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

/// Liveness body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Readiness body
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub success: bool,
    pub status: &'static str,
    pub database: bool,
    pub timestamp: DateTime<Utc>,
}

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        status: "ok",
        timestamp: Utc::now(),
    })
}

/// Readiness check, pings the database
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let database = match state.pool().acquire().await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Readiness check failed to acquire a connection");
            false
        }
    };

    let (status, label) = if database {
        (StatusCode::OK, "ready")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
    };

    (
        status,
        Json(ReadinessResponse {
            success: database,
            status: label,
            database,
            timestamp: Utc::now(),
        }),
    )
}
