//! Orders Domain
//!
//! The order lifecycle: placement against ticket inventory, completion
//! with voucher minting and a transactional inventory decrement, explicit
//! pending/cancel transitions, and paginated listing.
//!
//! Completion is the only operation that moves inventory. The repository
//! pairs the guarded status flip with a conditional decrement inside one
//! MongoDB transaction, so a ticket's quantity can never go negative and
//! a double completion can never decrement twice.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{OrderError, OrderResult};
pub use handlers::ApiDoc;
pub use models::{CreateOrder, Order, OrderFilter, OrderStatus, Voucher, mint_token};
pub use mongodb::{MongoOrderRepository, ORDERS_COLLECTION};
pub use repository::OrderRepository;
pub use service::OrderService;
