use axum::{Router, extract::State, middleware, routing::get, routing::post};
use axum_helpers::{ApiResponse, Identity, JwtAuth, ValidatedJson, jwt_auth_middleware};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::UserResult;
use crate::models::{LoginUser, RegisterUser, UserResponse};
use crate::repository::UserRepository;
use crate::service::UserService;

/// OpenAPI documentation for the Auth API
#[derive(OpenApi)]
#[openapi(
    paths(register, login, me),
    components(schemas(RegisterUser, LoginUser, UserResponse)),
    tags(
        (name = "Auth", description = "Registration, login, and profile endpoints")
    )
)]
pub struct ApiDoc;

/// Shared state for the auth handlers: the user service plus the token
/// issuer.
pub struct AuthState<R: UserRepository> {
    pub service: Arc<UserService<R>>,
    pub auth: JwtAuth,
}

impl<R: UserRepository> Clone for AuthState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            auth: self.auth.clone(),
        }
    }
}

/// Create the auth router.
///
/// Registration and login are public; the profile endpoint requires a
/// bearer token.
pub fn router<R: UserRepository + 'static>(service: UserService<R>, auth: JwtAuth) -> Router {
    let state = AuthState {
        service: Arc::new(service),
        auth: auth.clone(),
    };

    let public = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .with_state(state.clone());

    let protected = Router::new()
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(auth, jwt_auth_middleware))
        .with_state(state);

    public.merge(protected)
}

/// Register a new member account
#[utoipa::path(
    post,
    path = "/register",
    tag = "Auth",
    request_body = RegisterUser,
    responses(
        (status = 200, description = "Account created"),
        (status = 400, description = "Validation failed or identity taken")
    )
)]
async fn register<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<RegisterUser>,
) -> UserResult<ApiResponse<UserResponse>> {
    let user = state.service.register(input).await?;
    Ok(ApiResponse::ok(user, "Success Registration"))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginUser,
    responses(
        (status = 200, description = "Token issued"),
        (status = 403, description = "Unknown identity or wrong password")
    )
)]
async fn login<R: UserRepository>(
    State(state): State<AuthState<R>>,
    ValidatedJson(input): ValidatedJson<LoginUser>,
) -> UserResult<ApiResponse<String>> {
    let user = state.service.login(input).await?;
    let token = state
        .auth
        .issue_token(user.id, user.role)
        .map_err(|e| crate::error::UserError::Token(e.to_string()))?;

    Ok(ApiResponse::ok(token, "Success Login"))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Profile for the token's subject"),
        (status = 403, description = "Missing or invalid token")
    )
)]
async fn me<R: UserRepository>(
    State(state): State<AuthState<R>>,
    identity: Identity,
) -> UserResult<ApiResponse<UserResponse>> {
    let user = state.service.profile(identity.user_id).await?;
    Ok(ApiResponse::ok(user, "Success Get User Profile"))
}
