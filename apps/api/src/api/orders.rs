//! Orders API routes

use axum::Router;
use domain_orders::{MongoOrderRepository, OrderService, handlers};

use crate::state::AppState;

/// Create the orders router
pub fn router(state: &AppState) -> Router {
    let repository = MongoOrderRepository::new(state.mongo_client.clone(), state.db.clone());
    let service = OrderService::new(repository);

    handlers::router(service, state.auth.clone())
}

/// Unique order_id index plus the text index backing search
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    MongoOrderRepository::new(state.mongo_client.clone(), state.db.clone())
        .ensure_indexes()
        .await?;
    Ok(())
}
