//! Health check handlers
//!
//! Endpoints for liveness and readiness probes.

use account_service::dto::{HealthResponse, ReadinessResponse};
use axum::{extract::State, http::StatusCode, Json};

use crate::state::AppState;

/// Basic health check (liveness probe)
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// Readiness check with backend reachability
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let ctx = state.service_context();

    let (store, sessions) = tokio::join!(ctx.user_repo().health_check(), ctx.sessions().health_check());

    if let Err(e) = &store {
        tracing::warn!(error = %e, "Record store unreachable");
    }
    if let Err(e) = &sessions {
        tracing::warn!(error = %e, "Session backend unreachable");
    }

    let response = ReadinessResponse::new(store.is_ok(), sessions.is_ok());
    let status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
