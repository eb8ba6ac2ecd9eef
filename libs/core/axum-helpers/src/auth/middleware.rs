use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use super::jwt::{JwtAuth, Role};
use crate::errors::AppError;

/// Authenticated caller, inserted into request extensions by
/// [`jwt_auth_middleware`] and read back by handlers.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))
    }
}

/// Extract a bearer token from the Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

/// JWT authentication middleware.
///
/// Validates the bearer token and inserts an [`Identity`] into request
/// extensions on success. Missing, malformed, or expired tokens answer
/// 403 with the envelope body.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware, routing::get};
/// use axum_helpers::{JwtAuth, jwt_auth_middleware};
///
/// let protected = Router::new()
///     .route("/orders", get(list_orders))
///     .layer(middleware::from_fn_with_state(auth.clone(), jwt_auth_middleware));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_bearer_token(&headers).ok_or_else(|| {
        tracing::debug!("No bearer token in Authorization header");
        AppError::Unauthorized("Unauthorized".to_string())
    })?;

    let claims = auth.verify_token(token).map_err(|e| {
        tracing::debug!("JWT verification failed: {}", e);
        AppError::Unauthorized("Invalid token".to_string())
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
        tracing::warn!("Token subject is not a valid UUID");
        AppError::Unauthorized("Invalid token".to_string())
    })?;

    request.extensions_mut().insert(Identity {
        user_id,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Guard for admin-only routes. Must be layered after
/// [`jwt_auth_middleware`] so the [`Identity`] is already present.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

    if !identity.is_admin() {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_auth(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        let headers = headers_with_auth("Bearer abc.def.ghi");
        assert_eq!(extract_bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_missing_header() {
        assert_eq!(extract_bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn rejects_non_bearer_scheme() {
        let headers = headers_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[test]
    fn rejects_empty_token() {
        let headers = headers_with_auth("Bearer ");
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
