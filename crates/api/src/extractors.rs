//! Request extractors whose rejections render as JSON error bodies.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header::CONTENT_TYPE, request::Parts},
};
use serde_json::Value;
use tally_core::budget::Payload;
use tally_shared::AppError;

use crate::error::ApiError;

/// Numeric budget id taken from the `{id}` path segment.
///
/// A segment that is not an integer names no budget, so it is rejected as
/// Not Found.
#[derive(Debug, Clone, Copy)]
pub struct BudgetId(pub i64);

impl<S> FromRequestParts<S> for BudgetId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(segment) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::NotFound(rejection.body_text()))?;

        segment
            .parse()
            .map(BudgetId)
            .map_err(|_| AppError::NotFound(format!("project budget {segment}")).into())
    }
}

/// Budget fields from a create or update body.
///
/// Bodies that are not declared as JSON, are empty, or hold a non-object
/// value yield an empty payload so that validation reports every field.
/// Malformed JSON is a validation error.
#[derive(Debug, Clone, Default)]
pub struct BudgetPayload(pub Payload);

impl<S> FromRequest<S> for BudgetPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(&req) {
            return Ok(Self::default());
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(vec![rejection.body_text()]))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice(&bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Ok(Self::default()),
            Err(e) => Err(AppError::Validation(vec![format!("Malformed JSON body: {e}")]).into()),
        }
    }
}

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"))
}

/// [`axum::Json`] with rejections rendered through [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    fn request(content_type: Option<&str>, body: &str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn payload(content_type: Option<&str>, body: &str) -> Result<Payload, ApiError> {
        BudgetPayload::from_request(request(content_type, body), &())
            .await
            .map(|BudgetPayload(map)| map)
    }

    #[tokio::test]
    async fn test_object_body_is_payload() {
        let map = payload(Some("application/json"), r#"{"year": 2005}"#)
            .await
            .unwrap();
        assert_eq!(map.get("year"), Some(&json!(2005)));
    }

    #[tokio::test]
    async fn test_charset_suffix_is_json() {
        let map = payload(Some("application/json; charset=utf-8"), r#"{"year": 1}"#)
            .await
            .unwrap();
        assert_eq!(map.len(), 1);
    }

    #[tokio::test]
    async fn test_undeclared_empty_or_non_object_is_empty() {
        assert!(payload(None, r#"{"year": 2005}"#).await.unwrap().is_empty());
        assert!(payload(Some("text/plain"), "2005").await.unwrap().is_empty());
        assert!(payload(Some("application/json"), "  ").await.unwrap().is_empty());
        assert!(payload(Some("application/json"), "[1, 2]").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let err = payload(Some("application/json"), "{\"year\":").await.unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
