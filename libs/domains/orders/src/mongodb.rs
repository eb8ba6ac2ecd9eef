//! MongoDB implementation of OrderRepository
//!
//! Holds both the orders collection and the tickets collection: order
//! completion must flip the order status and decrement ticket inventory
//! in the same transaction.

use async_trait::async_trait;
use chrono::Utc;
use domain_tickets::{TICKETS_COLLECTION, Ticket};
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{Bson, doc, to_bson},
    options::{IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{OrderError, OrderResult};
use crate::models::{Order, OrderFilter, OrderStatus, Voucher};
use crate::repository::OrderRepository;

pub const ORDERS_COLLECTION: &str = "orders";

/// MongoDB implementation of the OrderRepository
pub struct MongoOrderRepository {
    client: Client,
    orders: Collection<Order>,
    tickets: Collection<Ticket>,
}

impl MongoOrderRepository {
    /// Create a new MongoOrderRepository.
    ///
    /// Takes the client (for transaction sessions) and the database the
    /// orders and tickets collections live in.
    pub fn new(client: Client, db: Database) -> Self {
        let orders = db.collection::<Order>(ORDERS_COLLECTION);
        let tickets = db.collection::<Ticket>(TICKETS_COLLECTION);
        Self {
            client,
            orders,
            tickets,
        }
    }

    pub fn collection(&self) -> &Collection<Order> {
        &self.orders
    }

    /// Create the indexes the listing and lookup paths rely on.
    /// Idempotent; called at startup.
    pub async fn ensure_indexes(&self) -> OrderResult<()> {
        let unique_token = IndexModel::builder()
            .keys(doc! { "order_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let by_creator = IndexModel::builder().keys(doc! { "created_by": 1 }).build();
        let text = IndexModel::builder().keys(doc! { "order_id": "text" }).build();

        self.orders.create_index(unique_token).await?;
        self.orders.create_index(by_creator).await?;
        self.orders.create_index(text).await?;
        Ok(())
    }

    fn build_filter(filter: &OrderFilter, created_by: Option<Uuid>) -> mongodb::bson::Document {
        let mut doc = doc! {};

        if let Some(user) = created_by {
            doc.insert("created_by", to_bson(&user).unwrap_or(Bson::Null));
        }

        if let Some(ref search) = filter.search {
            doc.insert("$text", doc! { "$search": search });
        }

        doc
    }

    fn now_bson() -> Bson {
        to_bson(&Utc::now()).unwrap_or(Bson::Null)
    }

    /// Filter for the pending/cancel transitions. Completed is terminal
    /// and writing the current status again is rejected, so neither may
    /// match; a completion racing in between leaves nothing to update.
    fn transition_filter(order_id: &str, target: OrderStatus) -> mongodb::bson::Document {
        doc! {
            "order_id": order_id,
            "status": { "$nin": [
                OrderStatus::Completed.to_string(),
                target.to_string(),
            ] },
        }
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    async fn insert(&self, order: Order) -> OrderResult<Order> {
        self.orders.insert_one(&order).await?;
        tracing::info!(order_id = %order.order_id, "Order created successfully");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn get_by_order_id(&self, order_id: &str) -> OrderResult<Option<Order>> {
        let order = self.orders.find_one(doc! { "order_id": order_id }).await?;
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn get_scoped(&self, order_id: &str, created_by: Uuid) -> OrderResult<Option<Order>> {
        let filter = doc! {
            "order_id": order_id,
            "created_by": to_bson(&created_by).unwrap_or(Bson::Null),
        };
        let order = self.orders.find_one(filter).await?;
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: OrderFilter, created_by: Option<Uuid>) -> OrderResult<Vec<Order>> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(&filter, created_by);

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.page_size())
            .skip(filter.skip())
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self.orders.find(mongo_filter).with_options(options).await?;
        let orders: Vec<Order> = cursor.try_collect().await?;

        Ok(orders)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: OrderFilter, created_by: Option<Uuid>) -> OrderResult<u64> {
        let mongo_filter = Self::build_filter(&filter, created_by);
        let count = self.orders.count_documents(mongo_filter).await?;
        Ok(count)
    }

    #[instrument(skip(self, vouchers))]
    async fn complete(
        &self,
        order_id: &str,
        created_by: Uuid,
        vouchers: Vec<Voucher>,
    ) -> OrderResult<Order> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;

        // Guarded status flip: a concurrent completion leaves nothing for
        // this filter to match.
        let order_filter = doc! {
            "order_id": order_id,
            "created_by": to_bson(&created_by).unwrap_or(Bson::Null),
            "status": { "$ne": OrderStatus::Completed.to_string() },
        };
        let order_update = doc! {
            "$set": {
                "status": OrderStatus::Completed.to_string(),
                "vouchers": to_bson(&vouchers).unwrap_or(Bson::Null),
                "updated_at": Self::now_bson(),
            }
        };

        let updated = self
            .orders
            .find_one_and_update(order_filter, order_update)
            .return_document(ReturnDocument::After)
            .session(&mut session)
            .await?;

        let Some(order) = updated else {
            session.abort_transaction().await?;
            return Err(OrderError::InvalidTransition(
                "Order is already completed".to_string(),
            ));
        };

        // Conditional decrement: matches only while the inventory covers
        // the order, so quantity can never go negative.
        let quantity = order.quantity;
        let ticket_filter = doc! {
            "_id": to_bson(&order.ticket).unwrap_or(Bson::Null),
            "quantity": { "$gte": quantity },
        };
        let decrement = doc! {
            "$inc": { "quantity": -quantity },
            "$set": { "updated_at": Self::now_bson() },
        };

        let result = self
            .tickets
            .update_one(ticket_filter, decrement)
            .session(&mut session)
            .await?;

        if result.matched_count == 0 {
            session.abort_transaction().await?;

            let ticket_id = doc! { "_id": to_bson(&order.ticket).unwrap_or(Bson::Null) };
            return match self.tickets.find_one(ticket_id).await? {
                Some(ticket) => Err(OrderError::InsufficientInventory {
                    available: ticket.quantity,
                    requested: quantity,
                }),
                None => Err(OrderError::TicketNotFound(order.ticket)),
            };
        }

        session.commit_transaction().await?;

        tracing::info!(order_id = %order.order_id, quantity, "Order completed, inventory decremented");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn set_status(&self, order_id: &str, status: OrderStatus) -> OrderResult<Order> {
        let update = doc! {
            "$set": {
                "status": status.to_string(),
                "updated_at": Self::now_bson(),
            }
        };

        let updated = self
            .orders
            .find_one_and_update(Self::transition_filter(order_id, status), update)
            .return_document(ReturnDocument::After)
            .await?;

        match updated {
            Some(order) => {
                tracing::info!(order_id, status = %status, "Order status updated");
                Ok(order)
            }
            // The guard matched nothing: tell apart a missing order from
            // one that reached a state this transition rejects.
            None => match self.orders.find_one(doc! { "order_id": order_id }).await? {
                Some(current) => Err(OrderError::InvalidTransition(format!(
                    "Order is already {}",
                    current.status
                ))),
                None => Err(OrderError::NotFound(order_id.to_string())),
            },
        }
    }

    #[instrument(skip(self))]
    async fn delete(&self, order_id: &str) -> OrderResult<Order> {
        let deleted = self
            .orders
            .find_one_and_delete(doc! { "order_id": order_id })
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        tracing::info!(order_id, "Order removed");
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn find_ticket(&self, id: Uuid) -> OrderResult<Option<Ticket>> {
        let filter = doc! { "_id": to_bson(&id).unwrap_or(Bson::Null) };
        let ticket = self.tickets.find_one(filter).await?;
        Ok(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_tickets::CreateTicket;
    use std::sync::Arc;

    #[test]
    fn build_filter_scopes_by_creator() {
        let user = Uuid::now_v7();
        let doc = MongoOrderRepository::build_filter(&OrderFilter::default(), Some(user));
        assert!(doc.contains_key("created_by"));
        assert!(!doc.contains_key("$text"));
    }

    #[test]
    fn build_filter_adds_text_search() {
        let filter = OrderFilter {
            search: Some("abc123".to_string()),
            ..Default::default()
        };
        let doc = MongoOrderRepository::build_filter(&filter, None);
        let text = doc.get_document("$text").unwrap();
        assert_eq!(text.get_str("$search").unwrap(), "abc123");
    }

    #[test]
    fn build_filter_empty_for_admin_scope() {
        let doc = MongoOrderRepository::build_filter(&OrderFilter::default(), None);
        assert!(doc.is_empty());
    }

    #[test]
    fn transition_filter_excludes_completed_and_target() {
        let doc = MongoOrderRepository::transition_filter("sometoken", OrderStatus::Cancelled);

        assert_eq!(doc.get_str("order_id").unwrap(), "sometoken");
        let nin = doc
            .get_document("status")
            .unwrap()
            .get_array("$nin")
            .unwrap();
        let excluded: Vec<&str> = nin.iter().filter_map(|b| b.as_str()).collect();
        assert!(excluded.contains(&"completed"));
        assert!(excluded.contains(&"cancelled"));
        assert!(!excluded.contains(&"pending"));
    }

    #[test]
    fn transition_filter_blocks_rewriting_pending() {
        let doc = MongoOrderRepository::transition_filter("sometoken", OrderStatus::Pending);

        let nin = doc
            .get_document("status")
            .unwrap()
            .get_array("$nin")
            .unwrap();
        let excluded: Vec<&str> = nin.iter().filter_map(|b| b.as_str()).collect();
        assert!(excluded.contains(&"completed"));
        assert!(excluded.contains(&"pending"));
    }

    async fn test_repo(db_name: &str) -> MongoOrderRepository {
        let mongo_url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = Client::with_uri_str(&mongo_url).await.unwrap();
        let db = client.database(db_name);
        db.drop().await.unwrap();
        MongoOrderRepository::new(client, db)
    }

    fn ticket_with_quantity(quantity: i64) -> Ticket {
        Ticket::new(CreateTicket {
            name: "General admission".to_string(),
            description: "Standing area".to_string(),
            price: 1500,
            quantity,
            event: Uuid::now_v7(),
        })
    }

    fn mint_vouchers(n: i64) -> Vec<Voucher> {
        (0..n).map(|_| Voucher::mint()).collect()
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB (replica set, for transactions)
    async fn concurrent_completions_decrement_once_and_never_go_negative() {
        let repo = Arc::new(test_repo("orders_concurrency_test").await);
        let caller = Uuid::now_v7();

        let ticket = ticket_with_quantity(5);
        repo.tickets.insert_one(&ticket).await.unwrap();

        let first = Order::new(ticket.id, 5, 7500, caller);
        let second = Order::new(ticket.id, 5, 7500, caller);
        repo.orders.insert_one(&first).await.unwrap();
        repo.orders.insert_one(&second).await.unwrap();

        let (a, b) = tokio::join!(
            repo.complete(&first.order_id, caller, mint_vouchers(5)),
            repo.complete(&second.order_id, caller, mint_vouchers(5)),
        );

        let successes = a.is_ok() as u8 + b.is_ok() as u8;
        assert_eq!(successes, 1, "exactly one completion may win");

        for result in [a, b] {
            if let Err(err) = result {
                assert!(matches!(err, OrderError::InsufficientInventory { .. }));
            }
        }

        let remaining = repo.find_ticket(ticket.id).await.unwrap().unwrap();
        assert_eq!(remaining.quantity, 0);
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB (replica set, for transactions)
    async fn completing_the_same_order_twice_decrements_once() {
        let repo = test_repo("orders_idempotency_test").await;
        let caller = Uuid::now_v7();

        let ticket = ticket_with_quantity(10);
        repo.tickets.insert_one(&ticket).await.unwrap();

        let order = Order::new(ticket.id, 3, 4500, caller);
        repo.orders.insert_one(&order).await.unwrap();

        repo.complete(&order.order_id, caller, mint_vouchers(3))
            .await
            .unwrap();
        let again = repo
            .complete(&order.order_id, caller, mint_vouchers(3))
            .await;

        assert!(matches!(again, Err(OrderError::InvalidTransition(_))));
        let remaining = repo.find_ticket(ticket.id).await.unwrap().unwrap();
        assert_eq!(remaining.quantity, 7);
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB (replica set, for transactions)
    async fn set_status_cannot_overwrite_a_completed_order() {
        let repo = test_repo("orders_transition_guard_test").await;
        let caller = Uuid::now_v7();

        let ticket = ticket_with_quantity(5);
        repo.tickets.insert_one(&ticket).await.unwrap();

        let order = Order::new(ticket.id, 2, 3000, caller);
        repo.orders.insert_one(&order).await.unwrap();

        repo.complete(&order.order_id, caller, mint_vouchers(2))
            .await
            .unwrap();

        // A cancel whose pre-read raced the completion lands here: the
        // guarded write must reject it instead of clobbering the status.
        let result = repo
            .set_status(&order.order_id, OrderStatus::Cancelled)
            .await;
        assert!(matches!(result, Err(OrderError::InvalidTransition(_))));

        let current = repo
            .get_by_order_id(&order.order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(current.status, OrderStatus::Completed);
        assert_eq!(current.vouchers.len(), 2);
    }
}
