use axum_helpers::{JwtAuth, server::create_production_app, server::health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());

    // Connect to MongoDB with retry
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    let auth = JwtAuth::new(&config.jwt);

    let state = AppState {
        config,
        mongo_client,
        db,
        auth,
    };

    // Unique and text indexes used by search and the order transaction
    api::init_indexes(&state).await?;

    // Build router with API routes
    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge health endpoints: /health (liveness) and /ready (Mongo ping)
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::health::router(state.clone()));

    info!("Starting Ticketing API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            drop(state.mongo_client);
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Ticketing API shutdown complete");
    Ok(())
}
