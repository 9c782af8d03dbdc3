//! HTTP mapping for application errors.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tally_core::budget::ValidationErrors;
use tally_core::currency::ConversionOverflow;
use tally_core::query::QueryError;
use tally_db::StoreError;
use tally_shared::AppError;
use tracing::error;

use crate::rates::RateError;

/// An [`AppError`] rendered as `{success: false, error, errors?}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, code = self.0.error_code(), "Request failed");
        }

        let mut body = json!({
            "success": false,
            "error": self.0.public_message(),
        });
        if let Some(errors) = self.0.validation_errors() {
            body["errors"] = json!(errors);
        }

        (status, Json(body)).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        Self(AppError::Validation(err.into_messages()))
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(match err {
            StoreError::DuplicateKey(detail) => AppError::DuplicateKey(detail),
            StoreError::Query(e) => AppError::Internal(e.to_string()),
            StoreError::Database(e) => AppError::Database(e.to_string()),
        })
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

impl From<RateError> for ApiError {
    fn from(err: RateError) -> Self {
        Self(AppError::ExternalService(err.to_string()))
    }
}

impl From<ConversionOverflow> for ApiError {
    fn from(err: ConversionOverflow) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AppError::Validation(vec![rejection.body_text()]))
    }
}
