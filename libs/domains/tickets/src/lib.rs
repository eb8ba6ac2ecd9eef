//! Tickets Domain
//!
//! Ticket catalog: purchasable ticket classes attached to events, with
//! inventory tracked per class.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation
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

pub use error::{TicketError, TicketResult};
pub use handlers::ApiDoc;
pub use models::{CreateTicket, Ticket, TicketFilter, UpdateTicket};
pub use mongodb::{MongoTicketRepository, TICKETS_COLLECTION};
pub use repository::TicketRepository;
pub use service::TicketService;
