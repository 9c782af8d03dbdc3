//! API route definitions.

use axum::Router;

use crate::{AppState, error::ApiError};
use tally_shared::AppError;

pub mod budgets;
pub mod conversion;
pub mod health;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/api/project", budgets::routes())
        .merge(conversion::routes())
        .merge(health::routes())
        .fallback(not_found)
}

/// Fallback for unmatched routes.
async fn not_found() -> ApiError {
    AppError::NotFound("route".to_string()).into()
}
