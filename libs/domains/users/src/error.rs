use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("Email '{0}' is already registered")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound("User is not found".to_string()),
            UserError::DuplicateUsername(name) => {
                AppError::BadRequest(format!("Username '{}' is already taken", name))
            }
            UserError::DuplicateEmail(email) => {
                AppError::BadRequest(format!("Email '{}' is already registered", email))
            }
            // Credential failures answer 403, matching the login contract
            UserError::InvalidCredentials => AppError::Unauthorized("Invalid Password".to_string()),
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::PasswordHash(msg) => AppError::InternalServerError(msg),
            UserError::Token(msg) => AppError::InternalServerError(msg),
            UserError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}
