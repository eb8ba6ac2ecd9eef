use async_trait::async_trait;
use domain_tickets::Ticket;
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::{Order, OrderFilter, OrderStatus, Voucher};

/// Repository trait for Order persistence.
///
/// The trait deliberately has no direct inventory mutation: the only way
/// ticket quantity changes is through [`complete`](OrderRepository::complete),
/// which pairs the status flip and the decrement in one transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Insert a freshly minted order
    async fn insert(&self, order: Order) -> OrderResult<Order>;

    /// Fetch an order by its external token
    async fn get_by_order_id(&self, order_id: &str) -> OrderResult<Option<Order>>;

    /// Fetch an order scoped to the user who placed it
    async fn get_scoped(&self, order_id: &str, created_by: Uuid) -> OrderResult<Option<Order>>;

    /// List one page of orders, newest first. `created_by` narrows the
    /// scope to a single user's orders when present.
    async fn list(&self, filter: OrderFilter, created_by: Option<Uuid>) -> OrderResult<Vec<Order>>;

    /// Count orders matching the filter and scope
    async fn count(&self, filter: OrderFilter, created_by: Option<Uuid>) -> OrderResult<u64>;

    /// Atomically complete an order: flip the status, attach the vouchers,
    /// and decrement the ticket inventory by the order quantity, all inside
    /// one transaction. Fails without side effects when the order is
    /// already completed or the inventory cannot cover the quantity.
    async fn complete(
        &self,
        order_id: &str,
        created_by: Uuid,
        vouchers: Vec<Voucher>,
    ) -> OrderResult<Order>;

    /// Flip the status of an order (pending/cancelled transitions only).
    /// The write itself must be guarded: it fails with InvalidTransition
    /// when the stored status is completed or already the target, even if
    /// a pre-read said otherwise.
    async fn set_status(&self, order_id: &str, status: OrderStatus) -> OrderResult<Order>;

    /// Remove an order, returning the removed document
    async fn delete(&self, order_id: &str) -> OrderResult<Order>;

    /// Fetch the ticket snapshot needed for order creation
    async fn find_ticket(&self, id: Uuid) -> OrderResult<Option<Ticket>>;
}
