//! Conversions: REST wire types → Order domain types.

use super::wire;
use super::{Customer, Order, OrderDetails, OrderItem, OrdersPage, PageMeta};
use crate::error::SdkError;
use crate::shared::{Cents, OrderId};
use chrono::{DateTime, Utc};

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, SdkError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SdkError::Other(format!("Invalid timestamp {raw:?}: {e}")))
}

impl TryFrom<wire::OrderRow> for Order {
    type Error = SdkError;

    fn try_from(row: wire::OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            created_at: parse_timestamp(&row.created_at)?,
            status: row.status.parse()?,
            order_id: OrderId::from(row.order_id),
            customer_name: row.customer_name,
            total: Cents(row.total),
        })
    }
}

impl From<wire::PageMetaResponse> for PageMeta {
    fn from(meta: wire::PageMetaResponse) -> Self {
        PageMeta {
            page_index: meta.page_index,
            per_page: meta.per_page,
            total_count: meta.total_count,
        }
    }
}

impl TryFrom<wire::OrdersResponse> for OrdersPage {
    type Error = SdkError;

    fn try_from(resp: wire::OrdersResponse) -> Result<Self, Self::Error> {
        let orders = resp
            .orders
            .into_iter()
            .map(Order::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OrdersPage {
            orders,
            meta: resp.meta.into(),
        })
    }
}

impl From<wire::OrderItemResponse> for OrderItem {
    fn from(item: wire::OrderItemResponse) -> Self {
        OrderItem {
            id: item.id,
            product_name: item.product.name,
            price: Cents(item.price_in_cents),
            quantity: item.quantity,
        }
    }
}

impl TryFrom<wire::OrderDetailsResponse> for OrderDetails {
    type Error = SdkError;

    fn try_from(resp: wire::OrderDetailsResponse) -> Result<Self, Self::Error> {
        Ok(OrderDetails {
            created_at: parse_timestamp(&resp.created_at)?,
            status: resp.status.parse()?,
            order_id: OrderId::from(resp.id),
            total: Cents(resp.total_in_cents),
            customer: Customer {
                name: resp.customer.name,
                email: resp.customer.email,
                phone: resp.customer.phone,
            },
            items: resp.order_items.into_iter().map(OrderItem::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;

    fn row(status: &str) -> wire::OrderRow {
        wire::OrderRow {
            order_id: "ord_1".to_string(),
            created_at: "2024-03-10T18:30:00.000Z".to_string(),
            status: status.to_string(),
            customer_name: "Ana".to_string(),
            total: 4590,
        }
    }

    #[test]
    fn test_row_converts() {
        let order = Order::try_from(row("processing")).unwrap();
        assert_eq!(order.order_id.as_str(), "ord_1");
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.total, Cents(4590));
        assert_eq!(order.created_at.to_rfc3339(), "2024-03-10T18:30:00+00:00");
    }

    #[test]
    fn test_unknown_status_is_invalid_status_error() {
        let err = Order::try_from(row("refunded")).unwrap_err();
        assert!(matches!(err, SdkError::InvalidStatus(ref s) if s.0 == "refunded"));
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        let mut bad = row("pending");
        bad.created_at = "yesterday".to_string();
        assert!(Order::try_from(bad).is_err());
    }

    #[test]
    fn test_details_convert_with_items() {
        let resp = wire::OrderDetailsResponse {
            id: "ord_9".to_string(),
            created_at: "2024-03-10T18:30:00Z".to_string(),
            status: "delivered".to_string(),
            total_in_cents: 7980,
            customer: wire::CustomerResponse {
                name: "Bruno".to_string(),
                email: "bruno@example.com".to_string(),
                phone: None,
            },
            order_items: vec![wire::OrderItemResponse {
                id: "item_1".to_string(),
                price_in_cents: 3990,
                quantity: 2,
                product: wire::ProductResponse {
                    name: "Pizza Margherita".to_string(),
                },
            }],
        };
        let details = OrderDetails::try_from(resp).unwrap();
        assert_eq!(details.status, OrderStatus::Delivered);
        assert_eq!(details.items.len(), 1);
        assert_eq!(details.items[0].subtotal(), Cents(7980));
        assert!(details.customer.phone.is_none());
    }
}
