//! Users Domain
//!
//! Account registration, credential verification, and profile lookup.
//! Passwords are hashed with Argon2 and never leave the service layer;
//! login answers with a signed bearer token.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, password hashing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{LoginUser, RegisterUser, User, UserResponse};
pub use mongodb::{MongoUserRepository, USERS_COLLECTION};
pub use repository::UserRepository;
pub use service::UserService;
