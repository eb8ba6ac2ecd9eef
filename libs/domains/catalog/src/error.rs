use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Event not found: {0}")]
    EventNotFound(Uuid),

    #[error("Event not found for slug: {0}")]
    EventSlugNotFound(String),

    #[error("Banner not found: {0}")]
    BannerNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CategoryNotFound(_) => {
                AppError::NotFound("Failed get one category. Category is not found".to_string())
            }
            CatalogError::EventNotFound(_) => {
                AppError::NotFound("Failed to get one event. Event is not found".to_string())
            }
            CatalogError::EventSlugNotFound(_) => AppError::NotFound(
                "Failed to find an event by slug. Event is not found".to_string(),
            ),
            CatalogError::BannerNotFound(_) => {
                AppError::NotFound("Failed to get one banner. Banner is not found".to_string())
            }
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        CatalogError::Database(err.to_string())
    }
}
