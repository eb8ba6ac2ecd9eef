use async_trait::async_trait;
use uuid::Uuid;

use crate::error::TicketResult;
use crate::models::{CreateTicket, Ticket, TicketFilter, UpdateTicket};

/// Repository trait for Ticket persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Create a new ticket
    async fn create(&self, input: CreateTicket) -> TicketResult<Ticket>;

    /// Get a ticket by ID
    async fn get_by_id(&self, id: Uuid) -> TicketResult<Option<Ticket>>;

    /// List tickets for the requested page, newest first
    async fn list(&self, filter: TicketFilter) -> TicketResult<Vec<Ticket>>;

    /// Count tickets matching a filter
    async fn count(&self, filter: TicketFilter) -> TicketResult<u64>;

    /// Update an existing ticket
    async fn update(&self, id: Uuid, input: UpdateTicket) -> TicketResult<Ticket>;

    /// Delete a ticket, returning it
    async fn delete(&self, id: Uuid) -> TicketResult<Ticket>;

    /// List every ticket class for an event
    async fn list_by_event(&self, event: Uuid) -> TicketResult<Vec<Ticket>>;
}
