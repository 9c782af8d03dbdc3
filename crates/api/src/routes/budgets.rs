//! Project budget routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Value, json};
use tally_core::budget::{loose_integer, to_columns, validate_create, validate_update};
use tally_core::currency::{Converted, FieldNaming, attach_converted, converted_field_name};
use tally_db::ProjectBudget;
use tally_shared::AppError;
use tracing::{debug, info};

use crate::{
    AppState,
    error::ApiError,
    extractors::{BudgetId, BudgetPayload, JsonBody},
};

/// Creates the budget routes, mounted under `/api/project`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget", post(create_budget))
        .route("/budget/currency", post(find_by_currency))
        .route(
            "/budget/{id}",
            get(get_budget).put(update_budget).delete(delete_budget),
        )
}

/// Request body for a lookup by year and name.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyLookupRequest {
    /// Budget year, as a number or a numeric string.
    #[serde(deserialize_with = "loose_year")]
    pub year: i64,
    /// Exact project name.
    pub project_name: String,
    /// Currency code to convert `finalBudgetUsd` into.
    pub currency: String,
}

fn loose_year<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    loose_integer(&value).ok_or_else(|| de::Error::custom(format!("invalid year: {value}")))
}

/// `{success: true, data}` envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    /// Always true.
    pub success: bool,
    /// Payload.
    pub data: T,
}

impl<T> DataResponse<T> {
    /// Wraps `data` in a successful envelope.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

fn success(status: StatusCode) -> Response {
    (status, Json(json!({ "success": true }))).into_response()
}

/// GET `/budget/{id}` - Fetch one budget.
async fn get_budget(
    State(state): State<AppState>,
    BudgetId(id): BudgetId,
) -> Result<Response, ApiError> {
    match state.repository.find_by_id(id).await? {
        Some(budget) => Ok((StatusCode::OK, Json(budget)).into_response()),
        None => Err(AppError::NotFound(format!("project budget {id}")).into()),
    }
}

/// POST `/budget/currency` - Budgets for a year and name, with
/// `finalBudgetUsd` converted into the requested currency.
async fn find_by_currency(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CurrencyLookupRequest>,
) -> Result<Response, ApiError> {
    let rows = state
        .repository
        .find_by_year_and_name(request.year, &request.project_name)
        .await?;

    if rows.is_empty() {
        return Err(AppError::NotFound(format!(
            "project budget {} for {}",
            request.project_name, request.year
        ))
        .into());
    }

    let data: Vec<Converted<ProjectBudget>> = if request.currency == *state.base_currency {
        rows.into_iter().map(Converted::unchanged).collect()
    } else if let Some(rate) = state
        .rates
        .rate(&request.currency)
        .await?
        .filter(|rate| !rate.is_zero())
    {
        let field = converted_field_name(&request.currency, FieldNaming::AsSupplied);
        attach_converted(rows, &field, rate)?
    } else {
        debug!(currency = %request.currency, "No rate available, returning base amounts");
        rows.into_iter().map(Converted::unchanged).collect()
    };

    Ok((StatusCode::OK, Json(DataResponse::ok(data))).into_response())
}

/// POST `/budget` - Create a budget.
async fn create_budget(
    State(state): State<AppState>,
    BudgetPayload(payload): BudgetPayload,
) -> Result<Response, ApiError> {
    validate_create(&payload)?;
    let columns = to_columns(&payload, true)?;

    state.repository.insert(columns).await?;
    info!(project_id = ?payload.get("projectId"), "Project budget created");

    Ok(success(StatusCode::CREATED))
}

/// PUT `/budget/{id}` - Replace every field of a budget except its id.
async fn update_budget(
    State(state): State<AppState>,
    BudgetId(id): BudgetId,
    BudgetPayload(payload): BudgetPayload,
) -> Result<Response, ApiError> {
    validate_update(&payload)?;
    let columns = to_columns(&payload, false)?;

    let rows_affected = state.repository.update(id, columns).await?;
    info!(project_id = id, rows_affected, "Project budget updated");

    Ok(success(StatusCode::CREATED))
}

/// DELETE `/budget/{id}` - Delete a budget. Missing ids still succeed.
async fn delete_budget(
    State(state): State<AppState>,
    BudgetId(id): BudgetId,
) -> Result<Response, ApiError> {
    state.repository.delete(id).await?;
    info!(project_id = id, "Project budget deleted");

    Ok(success(StatusCode::OK))
}
