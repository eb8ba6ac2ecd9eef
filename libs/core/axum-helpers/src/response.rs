//! Response envelope shared by every API endpoint.
//!
//! All handlers, success and failure alike, answer with the same shape:
//!
//! ```json
//! {
//!   "meta": { "status": 200, "message": "ok" },
//!   "data": { ... },
//!   "pagination": { "total": 42, "totalPage": 5, "current": 1 }
//! }
//! ```
//!
//! `meta.status` mirrors the HTTP status code so clients that only look at
//! the body still see the outcome. `pagination` is present only on list
//! endpoints.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome block carried by every response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct Meta {
    /// HTTP status code, repeated in the body
    pub status: u16,
    /// Human-readable outcome message
    pub message: String,
}

/// Pagination block returned by list endpoints.
#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
pub struct PageInfo {
    /// Total number of matching documents
    pub total: u64,
    /// Total number of pages at the requested page size
    #[serde(rename = "totalPage")]
    pub total_page: u64,
    /// The page this response covers (1-based)
    pub current: u64,
}

impl PageInfo {
    /// Compute pagination info from a total count and the requested window.
    ///
    /// `total_page` rounds up, so a partial final page still counts.
    pub fn new(total: u64, limit: u64, current: u64) -> Self {
        let total_page = if limit == 0 { 0 } else { total.div_ceil(limit) };
        Self {
            total,
            total_page,
            current,
        }
    }
}

/// The envelope wrapping every response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T: Serialize> {
    pub meta: Meta,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 response with a payload.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, data, message)
    }

    /// 201 response for newly created resources.
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::CREATED, data, message)
    }

    /// 200 response for list endpoints, with the pagination block attached.
    pub fn paginated(data: T, pagination: PageInfo, message: impl Into<String>) -> Self {
        Self {
            meta: Meta {
                status: StatusCode::OK.as_u16(),
                message: message.into(),
            },
            data,
            pagination: Some(pagination),
            status: StatusCode::OK,
        }
    }

    /// Envelope with an arbitrary status code.
    pub fn with_status(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            meta: Meta {
                status: status.as_u16(),
                message: message.into(),
            },
            data,
            pagination: None,
            status,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

/// Envelope-shaped error body. `data` carries validation details when
/// present, `null` otherwise.
pub fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    error_body_with_data(status, message, serde_json::Value::Null)
}

/// Error body with a `data` payload (e.g. per-field validation errors).
pub fn error_body_with_data(
    status: StatusCode,
    message: impl Into<String>,
    data: serde_json::Value,
) -> Response {
    let envelope = ApiResponse {
        meta: Meta {
            status: status.as_u16(),
            message: message.into(),
        },
        data,
        pagination: None,
        status,
    };
    envelope.into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_info_rounds_up() {
        let info = PageInfo::new(42, 10, 1);
        assert_eq!(info.total, 42);
        assert_eq!(info.total_page, 5);
        assert_eq!(info.current, 1);
    }

    #[test]
    fn page_info_exact_division() {
        let info = PageInfo::new(40, 10, 4);
        assert_eq!(info.total_page, 4);
    }

    #[test]
    fn page_info_empty() {
        let info = PageInfo::new(0, 10, 1);
        assert_eq!(info.total_page, 0);
    }

    #[test]
    fn page_info_zero_limit_does_not_panic() {
        let info = PageInfo::new(10, 0, 1);
        assert_eq!(info.total_page, 0);
    }

    #[test]
    fn envelope_serializes_meta_and_data() {
        let envelope = ApiResponse::ok(serde_json::json!({"id": 1}), "ok");
        let body = serde_json::to_value(&envelope).unwrap();
        assert_eq!(body["meta"]["status"], 200);
        assert_eq!(body["meta"]["message"], "ok");
        assert_eq!(body["data"]["id"], 1);
        assert!(body.get("pagination").is_none());
    }

    #[test]
    fn envelope_serializes_pagination_in_camel_case() {
        let envelope =
            ApiResponse::paginated(serde_json::json!([]), PageInfo::new(21, 10, 2), "found");
        let body = serde_json::to_value(&envelope).unwrap();
        assert_eq!(body["pagination"]["total"], 21);
        assert_eq!(body["pagination"]["totalPage"], 3);
        assert_eq!(body["pagination"]["current"], 2);
    }
}
