//! Catalog API routes: categories, events, banners

use axum::Router;
use domain_catalog::{
    BannerService, CategoryService, EventService, MongoBannerRepository, MongoCategoryRepository,
    MongoEventRepository, handlers,
};
use mongodb::Database;

use crate::state::AppState;

/// Create the categories router
pub fn categories_router(state: &AppState) -> Router {
    let repository = MongoCategoryRepository::new(state.db.clone());
    let service = CategoryService::new(repository);

    handlers::categories_router(service, state.auth.clone())
}

/// Create the events router
pub fn events_router(state: &AppState) -> Router {
    let repository = MongoEventRepository::new(state.db.clone());
    let service = EventService::new(repository);

    handlers::events_router(service, state.auth.clone())
}

/// Create the banners router
pub fn banners_router(state: &AppState) -> Router {
    let repository = MongoBannerRepository::new(state.db.clone());
    let service = BannerService::new(repository);

    handlers::banners_router(service, state.auth.clone())
}

/// Unique slug index, event/banner text indexes
pub async fn init_indexes(db: &Database) -> eyre::Result<()> {
    MongoEventRepository::new(db.clone()).ensure_indexes().await?;
    MongoBannerRepository::new(db.clone())
        .ensure_indexes()
        .await?;
    Ok(())
}
