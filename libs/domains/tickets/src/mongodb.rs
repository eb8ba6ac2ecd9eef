//! MongoDB implementation of TicketRepository

use async_trait::async_trait;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Bson, doc, to_bson},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{TicketError, TicketResult};
use crate::models::{CreateTicket, Ticket, TicketFilter, UpdateTicket};
use crate::repository::TicketRepository;

/// Collection name shared with the order transaction path.
pub const TICKETS_COLLECTION: &str = "tickets";

/// MongoDB implementation of the TicketRepository
pub struct MongoTicketRepository {
    collection: Collection<Ticket>,
}

impl MongoTicketRepository {
    /// Create a new MongoTicketRepository
    ///
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let db = client.database("ticketing");
    /// let repo = MongoTicketRepository::new(db);
    /// ```
    pub fn new(db: Database) -> Self {
        let collection = db.collection::<Ticket>(TICKETS_COLLECTION);
        Self { collection }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Ticket> {
        &self.collection
    }

    /// Create the text index backing `search`. Idempotent; called at startup.
    pub async fn ensure_indexes(&self) -> TicketResult<()> {
        let text_index = IndexModel::builder()
            .keys(doc! { "name": "text" })
            .build();
        self.collection.create_index(text_index).await?;
        Ok(())
    }

    /// Build a MongoDB filter document from TicketFilter
    fn build_filter(filter: &TicketFilter) -> mongodb::bson::Document {
        let mut doc = doc! {};

        if let Some(ref search) = filter.search {
            doc.insert("$text", doc! { "$search": search });
        }

        doc
    }
}

#[async_trait]
impl TicketRepository for MongoTicketRepository {
    #[instrument(skip(self, input), fields(ticket_name = %input.name))]
    async fn create(&self, input: CreateTicket) -> TicketResult<Ticket> {
        let ticket = Ticket::new(input);

        self.collection.insert_one(&ticket).await?;

        tracing::info!(ticket_id = %ticket.id, "Ticket created successfully");
        Ok(ticket)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> TicketResult<Option<Ticket>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let ticket = self.collection.find_one(filter).await?;
        Ok(ticket)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: TicketFilter) -> TicketResult<Vec<Ticket>> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(&filter);

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.page_size())
            .skip(filter.skip())
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let tickets: Vec<Ticket> = cursor.try_collect().await?;

        Ok(tickets)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: TicketFilter) -> TicketResult<u64> {
        let mongo_filter = Self::build_filter(&filter);
        let count = self.collection.count_documents(mongo_filter).await?;
        Ok(count)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateTicket) -> TicketResult<Ticket> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let existing = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(TicketError::NotFound(id))?;

        let mut updated = existing;
        updated.apply_update(input);

        self.collection.replace_one(filter, &updated).await?;

        tracing::info!(ticket_id = %id, "Ticket updated successfully");
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> TicketResult<Ticket> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let deleted = self
            .collection
            .find_one_and_delete(filter)
            .await?
            .ok_or(TicketError::NotFound(id))?;

        tracing::info!(ticket_id = %id, "Ticket deleted successfully");
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn list_by_event(&self, event: Uuid) -> TicketResult<Vec<Ticket>> {
        use futures_util::TryStreamExt;

        let filter = doc! { "event": to_bson(&event).unwrap_or(Bson::Null) };
        let cursor = self.collection.find(filter).await?;
        let tickets: Vec<Ticket> = cursor.try_collect().await?;

        Ok(tickets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_filter_empty() {
        let filter = TicketFilter::default();
        let doc = MongoTicketRepository::build_filter(&filter);
        assert!(doc.is_empty());
    }

    #[test]
    fn build_filter_uses_text_search() {
        let filter = TicketFilter {
            search: Some("vip".to_string()),
            ..Default::default()
        };
        let doc = MongoTicketRepository::build_filter(&filter);
        let text = doc.get_document("$text").unwrap();
        assert_eq!(text.get_str("$search").unwrap(), "vip");
    }
}
