//! Batch currency conversion.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use tally_core::currency::{FieldNaming, attach_converted, converted_field_name};
use tally_shared::AppError;
use tracing::info;

use super::budgets::DataResponse;
use crate::{AppState, error::ApiError};

/// Creates the conversion routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api-conversion", get(convert_batch))
}

/// GET `/api-conversion` - The configured projects with `finalBudgetUsd`
/// converted into the configured currency.
async fn convert_batch(State(state): State<AppState>) -> Result<Response, ApiError> {
    let currency = &state.conversion.currency;
    let rows = state
        .repository
        .find_by_names(&state.conversion.project_names)
        .await?;

    let Some(rate) = state
        .rates
        .rate(currency)
        .await?
        .filter(|rate| !rate.is_zero())
    else {
        return Err(AppError::RateUnavailable(currency.clone()).into());
    };

    let field = converted_field_name(currency, FieldNaming::TitleCase);
    let data = attach_converted(rows, &field, rate)?;
    info!(currency = %currency, %rate, projects = data.len(), "Converted budgets");

    Ok((StatusCode::OK, Json(DataResponse::ok(data))).into_response())
}
