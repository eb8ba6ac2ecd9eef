use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Ticket entity - a purchasable ticket class for an event
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Ticket name (covered by the text index)
    pub name: String,
    /// Ticket description
    pub description: String,
    /// Unit price in minor currency units
    pub price: i64,
    /// Remaining inventory
    pub quantity: i64,
    /// The event this ticket belongs to
    pub event: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new ticket
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTicket {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(range(min = 0))]
    pub price: i64,
    #[validate(range(min = 0))]
    pub quantity: i64,
    pub event: Uuid,
}

/// DTO for updating an existing ticket
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateTicket {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[validate(range(min = 0))]
    pub quantity: Option<i64>,
    pub event: Option<Uuid>,
}

/// Query parameters for listing tickets
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct TicketFilter {
    /// Full-text search against the ticket name
    pub search: Option<String>,
    /// Page number (1-based)
    #[serde(default = "default_page")]
    pub page: u64,
    /// Page size
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> i64 {
    10
}

impl Default for TicketFilter {
    fn default() -> Self {
        Self {
            search: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl TicketFilter {
    /// 1-based page, floored at 1: `page=0` reads as the first page.
    pub fn current(&self) -> u64 {
        self.page.max(1)
    }

    /// Effective page size. Zero or negative limits fall back to the
    /// default instead of turning into an unbounded find.
    pub fn page_size(&self) -> i64 {
        if self.limit > 0 {
            self.limit
        } else {
            default_limit()
        }
    }

    /// Number of documents to skip for the requested page.
    pub fn skip(&self) -> u64 {
        (self.current() - 1) * self.page_size() as u64
    }
}

impl Ticket {
    /// Create a new ticket from the CreateTicket DTO
    pub fn new(input: CreateTicket) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            price: input.price,
            quantity: input.quantity,
            event: input.event,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from the UpdateTicket DTO
    pub fn apply_update(&mut self, update: UpdateTicket) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
        if let Some(event) = update.event {
            self.event = event;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_input() -> CreateTicket {
        CreateTicket {
            name: "VIP".to_string(),
            description: "Front row".to_string(),
            price: 150_000,
            quantity: 50,
            event: Uuid::now_v7(),
        }
    }

    #[test]
    fn new_ticket_carries_input_fields() {
        let input = create_input();
        let event = input.event;
        let ticket = Ticket::new(input);

        assert_eq!(ticket.name, "VIP");
        assert_eq!(ticket.price, 150_000);
        assert_eq!(ticket.quantity, 50);
        assert_eq!(ticket.event, event);
        assert_eq!(ticket.created_at, ticket.updated_at);
    }

    #[test]
    fn apply_update_only_touches_provided_fields() {
        let mut ticket = Ticket::new(create_input());
        let before = ticket.clone();

        ticket.apply_update(UpdateTicket {
            price: Some(99_000),
            ..Default::default()
        });

        assert_eq!(ticket.price, 99_000);
        assert_eq!(ticket.name, before.name);
        assert_eq!(ticket.quantity, before.quantity);
        assert!(ticket.updated_at >= before.updated_at);
    }

    #[test]
    fn filter_skip_is_zero_based_on_page_one() {
        let filter = TicketFilter::default();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.skip(), 0);
    }

    #[test]
    fn filter_skip_advances_with_page() {
        let filter = TicketFilter {
            page: 3,
            limit: 10,
            search: None,
        };
        assert_eq!(filter.skip(), 20);
    }

    #[test]
    fn filter_skip_tolerates_page_zero() {
        let filter = TicketFilter {
            page: 0,
            limit: 10,
            search: None,
        };
        assert_eq!(filter.current(), 1);
        assert_eq!(filter.skip(), 0);
    }

    #[test]
    fn filter_limit_zero_falls_back_to_default() {
        let filter = TicketFilter {
            page: 2,
            limit: 0,
            search: None,
        };
        assert_eq!(filter.page_size(), 10);
        assert_eq!(filter.skip(), 10);
    }

    #[test]
    fn create_ticket_rejects_negative_price() {
        use validator::Validate;
        let input = CreateTicket {
            price: -1,
            ..create_input()
        };
        assert!(input.validate().is_err());
    }
}
