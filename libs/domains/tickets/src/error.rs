use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum TicketError {
    #[error("Ticket not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type TicketResult<T> = Result<T, TicketError>;

impl From<TicketError> for AppError {
    fn from(err: TicketError) -> Self {
        match err {
            TicketError::NotFound(_) => {
                AppError::NotFound("Failed to get one ticket. Ticket is not found".to_string())
            }
            TicketError::Validation(msg) => AppError::BadRequest(msg),
            TicketError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TicketError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for TicketError {
    fn from(err: mongodb::error::Error) -> Self {
        TicketError::Database(err.to_string())
    }
}
