//! Tickets API routes

use axum::Router;
use domain_tickets::{MongoTicketRepository, TicketService, handlers};
use mongodb::Database;

use crate::state::AppState;

/// Create the tickets router
pub fn router(state: &AppState) -> Router {
    let repository = MongoTicketRepository::new(state.db.clone());
    let service = TicketService::new(repository);

    handlers::router(service, state.auth.clone())
}

/// Text index backing ticket search
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoTicketRepository::new(db.clone())
        .ensure_indexes()
        .await?;
    Ok(())
}
