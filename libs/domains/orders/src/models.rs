use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Order lifecycle status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStatus {
    /// Awaiting completion; the only state transitions start from
    #[default]
    Pending,
    /// Paid and voucher-backed; terminal
    Completed,
    /// Abandoned; terminal
    Cancelled,
}

/// Mint an opaque external token (order ids, voucher ids).
///
/// The token is time-ordered but carries no other meaning; clients must
/// treat it as opaque.
pub fn mint_token() -> String {
    Uuid::now_v7().simple().to_string()
}

/// A single admission voucher, minted at order completion
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Voucher {
    /// Opaque voucher token
    #[serde(rename = "voucherId")]
    pub voucher_id: String,
    /// Whether the voucher has been printed
    #[serde(rename = "isPrint")]
    pub is_print: bool,
}

impl Voucher {
    pub fn mint() -> Self {
        Self {
            voucher_id: mint_token(),
            is_print: false,
        }
    }
}

/// Order entity - a reservation of ticket inventory by a user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// External opaque order token, used in every order URL
    pub order_id: String,
    /// The ticket class being purchased
    pub ticket: Uuid,
    /// Number of units ordered
    pub quantity: i64,
    /// Total price in minor units, frozen at creation
    pub total: i64,
    /// Lifecycle status
    pub status: OrderStatus,
    /// The user who placed the order
    pub created_by: Uuid,
    /// Vouchers minted at completion; empty until then
    #[serde(default)]
    pub vouchers: Vec<Voucher>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Create a pending order. `total` is the already-computed
    /// price × quantity, frozen here for good.
    pub fn new(ticket: Uuid, quantity: i64, total: i64, created_by: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            order_id: mint_token(),
            ticket,
            quantity,
            total,
            status: OrderStatus::Pending,
            created_by,
            vouchers: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// DTO for placing an order
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateOrder {
    /// Ticket class to purchase
    pub ticket: Uuid,
    /// Units requested
    #[validate(range(min = 1))]
    pub quantity: i64,
}

/// Query parameters for listing orders
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
pub struct OrderFilter {
    /// Full-text keyword search
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

impl Default for OrderFilter {
    fn default() -> Self {
        Self {
            search: None,
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl OrderFilter {
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

    pub fn skip(&self) -> u64 {
        (self.current() - 1) * self.page_size() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn new_order_starts_pending_with_no_vouchers() {
        let order = Order::new(Uuid::now_v7(), 3, 4500, Uuid::now_v7());
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.vouchers.is_empty());
        assert_eq!(order.quantity, 3);
        assert_eq!(order.total, 4500);
    }

    #[test]
    fn minted_tokens_are_distinct() {
        let tokens: HashSet<String> = (0..100).map(|_| mint_token()).collect();
        assert_eq!(tokens.len(), 100);
    }

    #[test]
    fn voucher_mints_unprinted() {
        let voucher = Voucher::mint();
        assert!(!voucher.is_print);
        assert!(!voucher.voucher_id.is_empty());
    }

    #[test]
    fn voucher_serializes_camel_case() {
        let voucher = Voucher::mint();
        let json = serde_json::to_value(&voucher).unwrap();
        assert!(json.get("voucherId").is_some());
        assert!(json.get("isPrint").is_some());
    }

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Completed).unwrap(),
            "\"completed\""
        );
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn create_order_rejects_zero_quantity() {
        let input = CreateOrder {
            ticket: Uuid::now_v7(),
            quantity: 0,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn filter_defaults_match_listing_contract() {
        let filter = OrderFilter::default();
        assert_eq!(filter.page, 1);
        assert_eq!(filter.limit, 10);
        assert_eq!(filter.skip(), 0);
    }

    #[test]
    fn filter_clamps_out_of_range_pagination() {
        let zeroed = OrderFilter {
            page: 0,
            limit: 0,
            search: None,
        };
        assert_eq!(zeroed.current(), 1);
        assert_eq!(zeroed.page_size(), 10);
        assert_eq!(zeroed.skip(), 0);

        let negative = OrderFilter {
            page: 3,
            limit: -5,
            search: None,
        };
        assert_eq!(negative.page_size(), 10);
        assert_eq!(negative.skip(), 20);
    }
}
