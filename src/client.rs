//! High-level client: `PizzaShopClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::auth::client::Auth;
use crate::auth::Profile;
use crate::cache::QueryCache;
use crate::domain::metrics::client::Metrics;
use crate::domain::order::client::Orders;
use crate::domain::order::OrdersPage;
use crate::domain::restaurant::client::Restaurant;
use crate::domain::restaurant::ManagedRestaurant;
use crate::error::SdkError;
use crate::http::PizzaShopHttp;

use async_lock::RwLock;
use std::sync::Arc;
use std::time::Duration;

// Re-export sub-client types for convenience.
pub use crate::auth::client::Auth as AuthClient;
pub use crate::domain::metrics::client::Metrics as MetricsClient;
pub use crate::domain::order::client::Orders as OrdersClient;
pub use crate::domain::restaurant::client::Restaurant as RestaurantClient;

/// The primary entry point for the pizza.shop SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.orders()`, `client.metrics()`, etc. Clones share the HTTP
/// connection pool, the interceptors and every cache.
pub struct PizzaShopClient {
    pub(crate) http: PizzaShopHttp,
    /// Orders lists keyed by `["orders", page, orderId, customerName, status]`.
    pub(crate) orders_cache: Arc<RwLock<QueryCache<OrdersPage>>>,
    pub(crate) restaurant_cache: Arc<RwLock<QueryCache<ManagedRestaurant>>>,
    pub(crate) profile_cache: Arc<RwLock<QueryCache<Profile>>>,
    /// How long a fetched orders page is served from cache.
    pub(crate) orders_stale_time: Duration,
}

impl PizzaShopClient {
    pub fn builder() -> PizzaShopClientBuilder {
        PizzaShopClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn orders(&self) -> Orders<'_> {
        Orders { client: self }
    }

    pub fn restaurant(&self) -> Restaurant<'_> {
        Restaurant { client: self }
    }

    pub fn metrics(&self) -> Metrics<'_> {
        Metrics { client: self }
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    /// The low-level HTTP client, for custom interceptors.
    pub fn http(&self) -> &PizzaShopHttp {
        &self.http
    }

    /// Clear all HTTP caches.
    pub async fn clear_all_caches(&self) {
        self.orders_cache.write().await.clear();
        self.restaurant_cache.write().await.clear();
        self.profile_cache.write().await.clear();
    }
}

impl Clone for PizzaShopClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            orders_cache: self.orders_cache.clone(),
            restaurant_cache: self.restaurant_cache.clone(),
            profile_cache: self.profile_cache.clone(),
            orders_stale_time: self.orders_stale_time,
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct PizzaShopClientBuilder {
    base_url: String,
    timeout: Duration,
    orders_stale_time: Duration,
}

impl Default for PizzaShopClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(crate::network::DEFAULT_TIMEOUT_SECS),
            orders_stale_time: Duration::ZERO,
        }
    }
}

impl PizzaShopClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    /// Per-request timeout (native only; browsers apply their own).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Serve cached orders pages younger than `stale_time` without a request.
    /// Zero, the default, refetches on every `list` call.
    pub fn orders_stale_time(mut self, stale_time: Duration) -> Self {
        self.orders_stale_time = stale_time;
        self
    }

    pub fn build(self) -> Result<PizzaShopClient, SdkError> {
        if self.base_url.trim().is_empty() {
            return Err(SdkError::Validation("base url must not be empty".into()));
        }
        Ok(PizzaShopClient {
            http: PizzaShopHttp::new(&self.base_url, self.timeout)?,
            orders_cache: Arc::new(RwLock::new(QueryCache::new())),
            restaurant_cache: Arc::new(RwLock::new(QueryCache::new())),
            profile_cache: Arc::new(RwLock::new(QueryCache::new())),
            orders_stale_time: self.orders_stale_time,
        })
    }
}
