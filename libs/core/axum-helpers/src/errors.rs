//! Application error type mapped onto the shared response envelope.
//!
//! Every failure path answers with the same body shape as successes:
//! `{"meta": {"status": <code>, "message": <text>}, "data": null}`.
//! Validation failures put the per-field details in `data`.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Error as UuidError;
use validator::ValidationErrors;

use crate::response::{error_body, error_body_with_data};

/// Application error type that can be converted to HTTP responses.
///
/// Domain crates define their own error enums and convert them into
/// `AppError` at the handler boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                error_body(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!("JSON extraction error: {:?}", e);
                error_body(e.status(), e.body_text())
            }
            AppError::ValidationError(e) => {
                tracing::info!("Validation error: {:?}", e);
                let details =
                    serde_json::to_value(&e).unwrap_or(serde_json::Value::Null);
                error_body_with_data(StatusCode::BAD_REQUEST, "validation failed", details)
            }
            AppError::UuidError(e) => {
                tracing::warn!("UUID error: {:?}", e);
                error_body(StatusCode::BAD_REQUEST, "invalid identifier")
            }
            AppError::BadRequest(msg) => {
                tracing::info!("Bad request: {}", msg);
                error_body(StatusCode::BAD_REQUEST, msg)
            }
            // Missing or invalid credentials answer 403, matching the
            // contract existing API clients depend on.
            AppError::Unauthorized(msg) => {
                tracing::info!("Unauthorized: {}", msg);
                error_body(StatusCode::FORBIDDEN, msg)
            }
            AppError::Forbidden(msg) => {
                tracing::info!("Forbidden: {}", msg);
                error_body(StatusCode::FORBIDDEN, msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!("Not found: {}", msg);
                error_body(StatusCode::NOT_FOUND, msg)
            }
            AppError::Conflict(msg) => {
                tracing::info!("Conflict: {}", msg);
                error_body(StatusCode::CONFLICT, msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                error_body(StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                error_body(StatusCode::SERVICE_UNAVAILABLE, msg)
            }
        }
    }
}

/// Fallback handler for routes that do not exist.
pub async fn not_found() -> Response {
    error_body(StatusCode::NOT_FOUND, "resource not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_maps_to_404_envelope() {
        let response = AppError::NotFound("order not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["meta"]["status"], 404);
        assert_eq!(body["meta"]["message"], "order not found");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn unauthorized_answers_403() {
        let response = AppError::Unauthorized("Unauthorized".into()).into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = body_json(response).await;
        assert_eq!(body["meta"]["status"], 403);
    }

    #[tokio::test]
    async fn bad_request_keeps_message() {
        let response = AppError::BadRequest("quantity must be positive".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["meta"]["message"], "quantity must be positive");
    }
}
