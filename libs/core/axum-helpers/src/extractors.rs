//! JSON extractor with automatic validation using the validator crate.

use axum::{
    extract::{FromRequest, Json, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::response::error_body_with_data;

/// JSON extractor that validates the body before the handler runs.
///
/// Deserialization failures answer with the extractor's own status and
/// message; validation failures answer 400 with per-field details in the
/// envelope's `data`.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::ValidatedJson;
/// use serde::Deserialize;
/// use validator::Validate;
///
/// #[derive(Deserialize, Validate)]
/// struct CreateTicket {
///     #[validate(length(min = 1, max = 120))]
///     name: String,
///     #[validate(range(min = 0))]
///     price: i64,
/// }
///
/// async fn create_ticket(ValidatedJson(payload): ValidatedJson<CreateTicket>) {
///     // payload is guaranteed valid here
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| error_body_with_data(e.status(), e.body_text(), serde_json::Value::Null))?;

        data.validate().map_err(|e| {
            let details = e
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let messages: Vec<serde_json::Value> = errors
                        .iter()
                        .map(|err| {
                            serde_json::json!({
                                "code": err.code,
                                "message": err.message,
                            })
                        })
                        .collect();
                    (field.to_string(), serde_json::json!(messages))
                })
                .collect::<serde_json::Map<_, _>>();

            error_body_with_data(
                StatusCode::BAD_REQUEST,
                "validation failed",
                serde_json::Value::Object(details),
            )
        })?;

        Ok(ValidatedJson(data))
    }
}
