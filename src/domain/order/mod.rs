//! Order domain: order lifecycle, list pages, details, status actions.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use crate::error::InvalidStatus;
use crate::shared::{Cents, OrderId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use state::{orders_query_key, patch_order_status, ORDERS_TAG};

// ─── OrderStatus ─────────────────────────────────────────────────────────────

/// Lifecycle state of an order.
///
/// `Pending → Processing → Delivering → Delivered`, with `Canceled` reachable
/// from `Pending` and `Processing` only. `Delivered` and `Canceled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum OrderStatus {
    Pending,
    Processing,
    Delivering,
    Delivered,
    Canceled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Delivering => "delivering",
            Self::Delivered => "delivered",
            Self::Canceled => "canceled",
        }
    }

    /// Dashboard display text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pendente",
            Self::Processing => "Em preparo",
            Self::Delivering => "Em entrega",
            Self::Delivered => "Entregue",
            Self::Canceled => "Cancelado",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Canceled)
    }

    /// Whether the lifecycle allows moving from `self` to `next` in one step.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Processing, Delivering)
                | (Delivering, Delivered)
                | (Pending, Canceled)
                | (Processing, Canceled)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "delivering" => Ok(Self::Delivering),
            "delivered" => Ok(Self::Delivered),
            "canceled" => Ok(Self::Canceled),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = InvalidStatus;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ─── OrderAction ─────────────────────────────────────────────────────────────

/// A state-transition request sent to the backend for one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderAction {
    Approve,
    Dispatch,
    Deliver,
    Cancel,
}

impl OrderAction {
    pub const ALL: [OrderAction; 4] = [
        OrderAction::Approve,
        OrderAction::Dispatch,
        OrderAction::Deliver,
        OrderAction::Cancel,
    ];

    /// Last path segment of `PATCH /orders/{id}/{segment}`.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Dispatch => "dispatch",
            Self::Deliver => "deliver",
            Self::Cancel => "cancel",
        }
    }

    /// Status the order has once the backend accepts this action.
    pub fn target_status(&self) -> OrderStatus {
        match self {
            Self::Approve => OrderStatus::Processing,
            Self::Dispatch => OrderStatus::Delivering,
            Self::Deliver => OrderStatus::Delivered,
            Self::Cancel => OrderStatus::Canceled,
        }
    }

    /// Whether the dashboard should offer this action for an order in `status`.
    ///
    /// The SDK itself never enforces this; the backend has the final word.
    pub fn is_available_from(&self, status: OrderStatus) -> bool {
        status.can_transition_to(self.target_status())
    }

    /// Button text.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Approve => "Aprovar",
            Self::Dispatch => "Em entrega",
            Self::Deliver => "Entregue",
            Self::Cancel => "Cancelar",
        }
    }
}

impl std::fmt::Display for OrderAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path_segment())
    }
}

// ─── Order ───────────────────────────────────────────────────────────────────

/// One row of the orders list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub customer_name: String,
    pub total: Cents,
}

/// Pagination info attached to an orders list result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub page_index: u32,
    pub per_page: u32,
    pub total_count: u32,
}

impl PageMeta {
    pub fn page_count(&self) -> u32 {
        if self.per_page == 0 {
            return 0;
        }
        self.total_count.div_ceil(self.per_page)
    }
}

/// A fetched page of orders, as held in the orders cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdersPage {
    pub orders: Vec<Order>,
    pub meta: PageMeta,
}

impl OrdersPage {
    pub fn get(&self, order_id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.order_id == order_id)
    }

    /// A copy of this page with `order_id` set to `status`, or `None` when
    /// the page has no such order or it already has that status.
    pub fn with_status(&self, order_id: &OrderId, status: OrderStatus) -> Option<OrdersPage> {
        let needs_change = self
            .orders
            .iter()
            .any(|o| &o.order_id == order_id && o.status != status);
        if !needs_change {
            return None;
        }

        Some(OrdersPage {
            orders: self
                .orders
                .iter()
                .map(|o| {
                    if &o.order_id == order_id {
                        Order {
                            status,
                            ..o.clone()
                        }
                    } else {
                        o.clone()
                    }
                })
                .collect(),
            meta: self.meta,
        })
    }
}

// ─── OrdersQuery ─────────────────────────────────────────────────────────────

/// Filters and page for `GET /orders`. Each distinct value is cached separately.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OrdersQuery {
    pub page_index: u32,
    pub order_id: Option<String>,
    pub customer_name: Option<String>,
    /// `None` lists every status.
    pub status: Option<OrderStatus>,
}

impl OrdersQuery {
    pub fn page(page_index: u32) -> Self {
        Self {
            page_index,
            ..Self::default()
        }
    }

    pub fn order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    pub fn customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// URL query string (without the leading `?`). Blank filters are omitted.
    pub fn to_query_string(&self) -> String {
        let mut params = vec![format!("pageIndex={}", self.page_index)];
        if let Some(id) = self.order_id.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(format!("orderId={}", urlencoding::encode(id)));
        }
        if let Some(name) = self
            .customer_name
            .as_deref()
            .filter(|s| !s.trim().is_empty())
        {
            params.push(format!("customerName={}", urlencoding::encode(name)));
        }
        if let Some(status) = self.status {
            params.push(format!("status={}", status.as_str()));
        }
        params.join("&")
    }
}

// ─── OrderDetails ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub product_name: String,
    pub price: Cents,
    pub quantity: u32,
}

impl OrderItem {
    pub fn subtotal(&self) -> Cents {
        self.price.times(self.quantity)
    }
}

/// Full view of a single order (`GET /orders/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub order_id: OrderId,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub total: Cents,
    pub customer: Customer,
    pub items: Vec<OrderItem>,
}
