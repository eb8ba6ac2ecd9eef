//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by the ticketing HTTP services.
//!
//! ## Modules
//!
//! - **[`auth`]**: Stateless JWT authentication and route guards
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//! - **[`response`]**: The `{meta, data, pagination}` response envelope
//! - **[`errors`]**: Application errors mapped onto the envelope
//! - **[`extractors`]**: Validated JSON extractor
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api_routes = Router::new(); // Add your routes
//!     let router = create_router::<ApiDoc>(api_routes).await?;
//!
//!     let config = ServerConfig::default();
//!     create_app(router, &config).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod response;
pub mod server;

// Re-export auth types
pub use auth::{Claims, Identity, JwtAuth, JwtConfig, Role, jwt_auth_middleware, require_admin};

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_app, create_production_app,
    create_router, health_router, run_health_checks, shutdown_signal,
};

// Re-export envelope and error types
pub use errors::AppError;
pub use response::{ApiResponse, Meta, PageInfo};

// Re-export extractors
pub use extractors::ValidatedJson;
