//! MongoDB connection management for the ticketing services.
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("ticketing");
//! let collection = db.collection::<Document>("orders");
//! ```

pub mod mongodb;
pub mod retry;

pub use retry::{RetryConfig, retry, retry_with_backoff};
