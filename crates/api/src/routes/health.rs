//! Health check endpoints.

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use serde_json::{Value, json};

use crate::{AppState, error::ApiError};

/// Health check response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Epoch-millisecond timestamp written by the store probe.
    pub checked_at: String,
}

/// Health check handler. Writes a probe row through the store.
async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let checked_at = tally_db::health::check(state.store.as_ref()).await?;
    Ok(Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        checked_at,
    }))
}

async fn ok() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// Creates health check routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/ok", get(ok))
}
