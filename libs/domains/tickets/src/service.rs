//! Ticket Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{TicketError, TicketResult};
use crate::models::{CreateTicket, Ticket, TicketFilter, UpdateTicket};
use crate::repository::TicketRepository;

/// Ticket service providing business logic operations
pub struct TicketService<R: TicketRepository> {
    repository: Arc<R>,
}

impl<R: TicketRepository> TicketService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new ticket class
    #[instrument(skip(self, input), fields(ticket_name = %input.name))]
    pub async fn create_ticket(&self, input: CreateTicket) -> TicketResult<Ticket> {
        input
            .validate()
            .map_err(|e| TicketError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a ticket by ID
    #[instrument(skip(self))]
    pub async fn get_ticket(&self, id: Uuid) -> TicketResult<Ticket> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(TicketError::NotFound(id))
    }

    /// List one page of tickets and the total match count
    #[instrument(skip(self))]
    pub async fn list_tickets(&self, filter: TicketFilter) -> TicketResult<(Vec<Ticket>, u64)> {
        let total = self.repository.count(filter.clone()).await?;
        let tickets = self.repository.list(filter).await?;
        Ok((tickets, total))
    }

    /// Update an existing ticket
    #[instrument(skip(self, input))]
    pub async fn update_ticket(&self, id: Uuid, input: UpdateTicket) -> TicketResult<Ticket> {
        input
            .validate()
            .map_err(|e| TicketError::Validation(e.to_string()))?;

        self.repository.update(id, input).await
    }

    /// Delete a ticket, returning the removed document
    #[instrument(skip(self))]
    pub async fn delete_ticket(&self, id: Uuid) -> TicketResult<Ticket> {
        self.repository.delete(id).await
    }

    /// List every ticket class for an event
    #[instrument(skip(self))]
    pub async fn tickets_by_event(&self, event: Uuid) -> TicketResult<Vec<Ticket>> {
        self.repository.list_by_event(event).await
    }
}

impl<R: TicketRepository> Clone for TicketService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockTicketRepository;

    fn sample_ticket() -> Ticket {
        Ticket::new(CreateTicket {
            name: "Regular".to_string(),
            description: "Standing area".to_string(),
            price: 75_000,
            quantity: 200,
            event: Uuid::now_v7(),
        })
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_before_hitting_repository() {
        let mut repo = MockTicketRepository::new();
        repo.expect_create().never();

        let service = TicketService::new(repo);
        let result = service
            .create_ticket(CreateTicket {
                name: String::new(),
                description: "x".to_string(),
                price: 100,
                quantity: 1,
                event: Uuid::now_v7(),
            })
            .await;

        assert!(matches!(result, Err(TicketError::Validation(_))));
    }

    #[tokio::test]
    async fn get_missing_ticket_is_not_found() {
        let mut repo = MockTicketRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = TicketService::new(repo);
        let id = Uuid::now_v7();
        let result = service.get_ticket(id).await;

        assert!(matches!(result, Err(TicketError::NotFound(got)) if got == id));
    }

    #[tokio::test]
    async fn list_returns_page_and_total() {
        let mut repo = MockTicketRepository::new();
        repo.expect_count().returning(|_| Ok(23));
        repo.expect_list()
            .returning(|_| Ok(vec![sample_ticket(), sample_ticket()]));

        let service = TicketService::new(repo);
        let (tickets, total) = service.list_tickets(TicketFilter::default()).await.unwrap();

        assert_eq!(tickets.len(), 2);
        assert_eq!(total, 23);
    }

    #[tokio::test]
    async fn update_rejects_negative_quantity() {
        let mut repo = MockTicketRepository::new();
        repo.expect_update().never();

        let service = TicketService::new(repo);
        let result = service
            .update_ticket(
                Uuid::now_v7(),
                UpdateTicket {
                    quantity: Some(-5),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(TicketError::Validation(_))));
    }
}
