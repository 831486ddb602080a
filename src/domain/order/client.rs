//! Orders sub-client: list, details, status actions.

use super::wire::{OrderDetailsResponse, OrdersResponse};
use super::{orders_query_key, patch_order_status, OrderAction, OrderDetails, OrdersPage, OrdersQuery};
use crate::cache::QueryCache;
use crate::client::PizzaShopClient;
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::shared::OrderId;

use async_lock::RwLock;
use std::sync::Arc;

pub struct Orders<'a> {
    pub(crate) client: &'a PizzaShopClient,
}

impl<'a> Orders<'a> {
    // ── Queries ──────────────────────────────────────────────────────────

    /// Fetch one page of orders and store it under the query's key.
    ///
    /// A fresh cached page (younger than the client's orders stale time) is
    /// returned without a request.
    pub async fn list(&self, query: &OrdersQuery) -> Result<OrdersPage, SdkError> {
        let key = orders_query_key(query);
        {
            let mut cache = self.client.orders_cache.write().await;
            if !cache.is_stale(&key, self.client.orders_stale_time) {
                if let Some(page) = cache.get_query_data(&key) {
                    return Ok(page.clone());
                }
            }
            cache.ensure(key.clone());
        }

        let url = format!(
            "{}?{}",
            self.client.http.url("/orders"),
            query.to_query_string()
        );
        let resp: OrdersResponse = self.client.http.get(&url, RetryPolicy::Idempotent).await?;
        let page = OrdersPage::try_from(resp)?;

        self.client
            .orders_cache
            .write()
            .await
            .set_query_data(key, page.clone());
        Ok(page)
    }

    /// Fetch a page even if a fresh one is cached.
    pub async fn refetch(&self, query: &OrdersQuery) -> Result<OrdersPage, SdkError> {
        self.client
            .orders_cache
            .write()
            .await
            .invalidate_queries(&orders_query_key(query));
        self.list(query).await
    }

    /// The cached page for `query`, if one has been fetched.
    pub async fn cached(&self, query: &OrdersQuery) -> Option<OrdersPage> {
        self.client
            .orders_cache
            .read()
            .await
            .get_query_data(&orders_query_key(query))
            .cloned()
    }

    pub async fn details(&self, order_id: &OrderId) -> Result<OrderDetails, SdkError> {
        if order_id.is_empty() {
            return Err(SdkError::Validation("order id must not be empty".into()));
        }
        let url = self
            .client
            .http
            .url(&format!("/orders/{}", urlencoding::encode(order_id.as_str())));
        let resp: OrderDetailsResponse =
            self.client.http.get(&url, RetryPolicy::Idempotent).await?;
        OrderDetails::try_from(resp)
    }

    /// Shared handle to the orders-list cache.
    pub fn cache(&self) -> Arc<RwLock<QueryCache<OrdersPage>>> {
        self.client.orders_cache.clone()
    }

    // ── Actions ──────────────────────────────────────────────────────────

    /// Send `action` for `order_id`. One attempt, no retry.
    ///
    /// On success every cached list containing the order shows the action's
    /// target status. On failure the error is returned and the cache is left
    /// as it was. The current status is not checked locally.
    pub async fn perform(&self, action: OrderAction, order_id: &OrderId) -> Result<(), SdkError> {
        if order_id.is_empty() {
            return Err(SdkError::Validation("order id must not be empty".into()));
        }
        let url = self.client.http.url(&format!(
            "/orders/{}/{}",
            urlencoding::encode(order_id.as_str()),
            action.path_segment()
        ));
        self.client
            .http
            .patch::<()>(&url, RetryPolicy::None)
            .await?;

        let mut cache = self.client.orders_cache.write().await;
        patch_order_status(&mut cache, order_id, action.target_status());
        Ok(())
    }

    /// `pending → processing`.
    pub async fn approve(&self, order_id: &OrderId) -> Result<(), SdkError> {
        self.perform(OrderAction::Approve, order_id).await
    }

    /// `processing → delivering`.
    pub async fn dispatch(&self, order_id: &OrderId) -> Result<(), SdkError> {
        self.perform(OrderAction::Dispatch, order_id).await
    }

    /// `delivering → delivered`.
    pub async fn deliver(&self, order_id: &OrderId) -> Result<(), SdkError> {
        self.perform(OrderAction::Deliver, order_id).await
    }

    pub async fn cancel(&self, order_id: &OrderId) -> Result<(), SdkError> {
        self.perform(OrderAction::Cancel, order_id).await
    }
}
