//! Order Service - the order lifecycle lives here.
//!
//! Creation freezes the total and leaves inventory alone; completion is
//! the single point where inventory moves, delegated to the repository's
//! transactional `complete`.

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{OrderError, OrderResult};
use crate::models::{CreateOrder, Order, OrderFilter, OrderStatus, Voucher};
use crate::repository::OrderRepository;

/// Order service providing the lifecycle operations
pub struct OrderService<R: OrderRepository> {
    repository: Arc<R>,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Place an order: advisory inventory check, total frozen at the
    /// current ticket price, status pending, no decrement.
    #[instrument(skip(self, input), fields(ticket = %input.ticket))]
    pub async fn create_order(&self, caller: Uuid, input: CreateOrder) -> OrderResult<Order> {
        input
            .validate()
            .map_err(|e| OrderError::Validation(e.to_string()))?;

        let ticket = self
            .repository
            .find_ticket(input.ticket)
            .await?
            .ok_or(OrderError::TicketNotFound(input.ticket))?;

        if ticket.quantity < input.quantity {
            return Err(OrderError::InsufficientInventory {
                available: ticket.quantity,
                requested: input.quantity,
            });
        }

        let total = ticket.price * input.quantity;
        let order = Order::new(input.ticket, input.quantity, total, caller);

        self.repository.insert(order).await
    }

    /// Complete an order: mint one voucher per unit, then let the
    /// repository flip the status and decrement inventory atomically.
    #[instrument(skip(self))]
    pub async fn complete_order(&self, order_id: &str, caller: Uuid) -> OrderResult<Order> {
        let order = self
            .repository
            .get_scoped(order_id, caller)
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        if order.status == OrderStatus::Completed {
            return Err(OrderError::InvalidTransition(
                "Order is already completed".to_string(),
            ));
        }

        let vouchers: Vec<Voucher> = (0..order.quantity).map(|_| Voucher::mint()).collect();

        self.repository.complete(order_id, caller, vouchers).await
    }

    /// Mark an order pending. Completed orders are terminal; an order
    /// already pending is rejected rather than rewritten.
    #[instrument(skip(self))]
    pub async fn mark_pending(&self, order_id: &str) -> OrderResult<Order> {
        let order = self
            .repository
            .get_by_order_id(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        match order.status {
            OrderStatus::Completed => Err(OrderError::InvalidTransition(
                "Order is already completed".to_string(),
            )),
            OrderStatus::Pending => Err(OrderError::InvalidTransition(
                "Order is already pending".to_string(),
            )),
            OrderStatus::Cancelled => {
                self.repository
                    .set_status(order_id, OrderStatus::Pending)
                    .await
            }
        }
    }

    /// Cancel an order. Completed orders are terminal; cancellation never
    /// touches inventory because nothing was decremented at creation.
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: &str) -> OrderResult<Order> {
        let order = self
            .repository
            .get_by_order_id(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        match order.status {
            OrderStatus::Completed => Err(OrderError::InvalidTransition(
                "Order is already completed".to_string(),
            )),
            OrderStatus::Cancelled => Err(OrderError::InvalidTransition(
                "Order is already cancelled".to_string(),
            )),
            OrderStatus::Pending => {
                self.repository
                    .set_status(order_id, OrderStatus::Cancelled)
                    .await
            }
        }
    }

    /// Fetch one order by its external token
    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: &str) -> OrderResult<Order> {
        self.repository
            .get_by_order_id(order_id)
            .await?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))
    }

    /// List one page of orders plus the total match count. `created_by`
    /// narrows the scope to a single user's orders.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        filter: OrderFilter,
        created_by: Option<Uuid>,
    ) -> OrderResult<(Vec<Order>, u64)> {
        let total = self.repository.count(filter.clone(), created_by).await?;
        let orders = self.repository.list(filter, created_by).await?;
        Ok((orders, total))
    }

    /// Administrative removal by external token
    #[instrument(skip(self))]
    pub async fn remove_order(&self, order_id: &str) -> OrderResult<Order> {
        self.repository.delete(order_id).await
    }
}

impl<R: OrderRepository> Clone for OrderService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
