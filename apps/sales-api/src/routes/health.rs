//! Health check endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use sales_core::SaleStore;
use serde::Serialize;

use crate::routes::sales::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health: 200 when the sale store answers, 503 otherwise.
pub async fn check<S: SaleStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> (StatusCode, Json<HealthResponse>) {
    if state.service.store().health_check().await {
        (StatusCode::OK, Json(HealthResponse { status: "ok" }))
    } else {
        tracing::warn!("health check failed: sale store unreachable");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unavailable",
            }),
        )
    }
}
