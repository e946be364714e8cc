//! Health check endpoints.

use axum::{extract::State, http::StatusCode, Json};
use telemetry::{health, metrics};
use warehouse_client::health::check_connection;

use crate::response::HealthResponse;
use crate::state::AppState;

/// GET /health - Full health check.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        report: health().report(),
        metrics: metrics().snapshot(),
    })
}

/// GET /health/ready - Readiness probe (warehouse answers a ping now).
pub async fn ready_handler(State(state): State<AppState>) -> StatusCode {
    if check_connection(state.executor.as_ref()).await {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health/live - Liveness probe (service is running).
pub async fn live_handler() -> StatusCode {
    if health().is_alive() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
