//! Application-wide error types.

use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Payload failed one or more field rules.
    #[error("Validation error: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Identity collision on insert.
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    /// The rate endpoint had no rate for a conversion that requires one.
    #[error("Exchange rate unavailable: {0}")]
    RateUnavailable(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// External service error.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) | Self::DuplicateKey(_) => 400,
            Self::NotFound(_) => 404,
            Self::RateUnavailable(_)
            | Self::Database(_)
            | Self::ExternalService(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for logs and API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::DuplicateKey(_) => "DUPLICATE_KEY",
            Self::RateUnavailable(_) => "RATE_UNAVAILABLE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the message shown to clients.
    ///
    /// Database, external service and internal failures are masked behind a
    /// generic message; the detail only goes to the logs.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::Validation(_) => "Validation Error",
            Self::NotFound(_) => "Not Found",
            Self::DuplicateKey(_) => "Cannot insert Duplicated row",
            Self::RateUnavailable(_) => "No exchange rate available now, try again later",
            Self::Database(_) | Self::ExternalService(_) | Self::Internal(_) => {
                "Internal Server Error"
            }
        }
    }

    /// Returns the itemized validation messages, if any.
    #[must_use]
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
