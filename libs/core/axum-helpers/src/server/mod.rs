//! Server setup: router assembly, health endpoints, graceful shutdown.

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_production_app, create_router};
pub use health::{
    HealthCheckFuture, HealthResponse, health_handler, health_router, run_health_checks,
};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
