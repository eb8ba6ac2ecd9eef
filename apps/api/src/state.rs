//! Shared application state passed to the route builders.

use axum_helpers::JwtAuth;
use mongodb::{Client, Database};

/// Cloned per handler; every field is an inexpensive handle.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares the underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
    /// JWT signer/verifier shared by every guarded route
    pub auth: JwtAuth,
}
