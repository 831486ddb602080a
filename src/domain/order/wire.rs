//! Wire types for the orders endpoints (camelCase JSON).

use serde::{Deserialize, Serialize};

/// Row in `GET /orders`. `status` stays a raw string until conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRow {
    pub order_id: String,
    pub created_at: String,
    pub status: String,
    pub customer_name: String,
    /// Total in cents.
    pub total: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetaResponse {
    pub page_index: u32,
    pub per_page: u32,
    pub total_count: u32,
}

/// Response from `GET /orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<OrderRow>,
    pub meta: PageMetaResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub id: String,
    pub price_in_cents: i64,
    pub quantity: u32,
    pub product: ProductResponse,
}

/// Response from `GET /orders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailsResponse {
    pub id: String,
    pub created_at: String,
    pub status: String,
    pub total_in_cents: i64,
    pub customer: CustomerResponse,
    #[serde(default)]
    pub order_items: Vec<OrderItemResponse>,
}
