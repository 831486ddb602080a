//! Order state containers: app-owned cache, SDK-provided update logic.

use super::{OrderStatus, OrdersPage, OrdersQuery};
use crate::cache::{QueryCache, QueryKey};
use crate::shared::OrderId;

/// Leading tag of every orders-list query key.
pub const ORDERS_TAG: &str = "orders";

/// Cache key for one orders-list query: `["orders", page, orderId, customerName, status]`.
///
/// Blank filters are keyed as absent, matching the request they produce.
pub fn orders_query_key(query: &OrdersQuery) -> QueryKey {
    QueryKey::tag(ORDERS_TAG)
        .with(query.page_index)
        .with(non_blank(query.order_id.as_deref()))
        .with(non_blank(query.customer_name.as_deref()))
        .with(query.status.map(|s| s.as_str()))
}

fn non_blank(filter: Option<&str>) -> Option<&str> {
    filter.filter(|s| !s.trim().is_empty())
}

/// Rewrite every cached orders list so `order_id` shows `status`.
///
/// Only the matching entry's status changes; other fields, other orders and
/// their order are kept. Lists without the order, and keys that were never
/// fetched, are left as they are. No I/O. Applying the same patch twice leaves
/// the same state as applying it once.
///
/// Returns how many cached lists were rewritten.
pub fn patch_order_status(
    cache: &mut QueryCache<OrdersPage>,
    order_id: &OrderId,
    status: OrderStatus,
) -> usize {
    if order_id.is_empty() {
        return 0;
    }

    let patched = cache.update_queries_data(&QueryKey::tag(ORDERS_TAG), |page| {
        page.with_status(order_id, status)
    });

    tracing::debug!(
        order_id = %order_id,
        status = %status,
        patched,
        "Patched order status in cached lists"
    );
    patched
}
