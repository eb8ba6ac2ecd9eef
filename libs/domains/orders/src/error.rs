use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Ticket not found: {0}")]
    TicketNotFound(Uuid),

    #[error("Insufficient inventory: {available} available, {requested} requested")]
    InsufficientInventory { available: i64, requested: i64 },

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(_) => AppError::NotFound("Order is not found".to_string()),
            OrderError::TicketNotFound(_) => AppError::NotFound("Ticket is not found".to_string()),
            OrderError::InsufficientInventory { .. } => {
                AppError::BadRequest("Quantity is not enough".to_string())
            }
            OrderError::InvalidTransition(msg) => AppError::BadRequest(msg),
            OrderError::Validation(msg) => AppError::BadRequest(msg),
            OrderError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for OrderError {
    fn from(err: mongodb::error::Error) -> Self {
        OrderError::Database(err.to_string())
    }
}
