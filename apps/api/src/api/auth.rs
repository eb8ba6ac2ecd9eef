//! Auth API routes

use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};
use mongodb::Database;

use crate::state::AppState;

/// Create the auth router
pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(state.db.clone());
    let service = UserService::new(repository);

    handlers::router(service, state.auth.clone())
}

/// Unique indexes on username and email
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoUserRepository::new(db.clone()).ensure_indexes().await?;
    Ok(())
}
