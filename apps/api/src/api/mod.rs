//! API routes module
//!
//! Wires each domain crate to its HTTP prefix. These routes are nested
//! under /api by axum_helpers::create_router.

pub mod auth;
pub mod catalog;
pub mod health;
pub mod orders;
pub mod tickets;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/auth", auth::router(state))
        .nest("/orders", orders::router(state))
        .nest("/tickets", tickets::router(state))
        .nest("/categories", catalog::categories_router(state))
        .nest("/events", catalog::events_router(state))
        .nest("/banners", catalog::banners_router(state))
}

/// Create every index the domains rely on. Idempotent; runs at startup.
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    tickets::init_indexes(&state.db).await?;
    orders::init_indexes(state).await?;
    auth::init_indexes(&state.db).await?;
    catalog::init_indexes(&state.db).await?;
    Ok(())
}
