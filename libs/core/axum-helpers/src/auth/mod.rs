//! JWT authentication: token issuing, verification, and route guards.

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{Claims, JwtAuth, Role};
pub use middleware::{Identity, jwt_auth_middleware, require_admin};
