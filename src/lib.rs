//! # pizza.shop SDK
//!
//! A Rust client for the pizza.shop restaurant dashboard backend, supporting
//! both native and WASM targets.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: Shared newtypes, domain models, query cache, routes (always available, WASM-safe)
//! 2. **HTTP API**: `PizzaShopHttp` with per-request retry policies and response interceptors
//! 3. **High-Level Client**: `PizzaShopClient` with nested sub-clients and caching
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pizzashop::prelude::*;
//!
//! let client = PizzaShopClient::builder()
//!     .base_url("http://localhost:3333")
//!     .build()?;
//!
//! let page = client.orders().list(&OrdersQuery::page(0)).await?;
//! client.orders().approve(&page.orders[0].order_id).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Keyed query-result cache.
pub mod cache;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// Dashboard routes and the navigation seam.
pub mod routes;

/// Authentication: sign-in, sign-up, profile, session expiry.
pub mod auth;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies and response interceptors.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `PizzaShopClient`, the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{Cents, OrderId};

    // Cache
    pub use crate::cache::{QueryCache, QueryKey};

    // Domain types: order
    pub use crate::domain::order::{
        orders_query_key, patch_order_status, Order, OrderAction, OrderDetails, OrderStatus,
        OrdersPage, OrdersQuery,
    };

    // Domain types: restaurant, metrics
    pub use crate::domain::metrics::{
        DailyReceipt, DayOrdersAmount, MonthCanceledOrdersAmount, MonthOrdersAmount,
        MonthReceipt, PopularProduct, ReceiptPeriod,
    };
    pub use crate::domain::restaurant::{ManagedRestaurant, StoreProfile};

    // Auth + user types
    pub use crate::auth::{Profile, RegisterRestaurant, Role};

    // Errors
    pub use crate::error::{HttpError, InvalidStatus, SdkError};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // Routes
    pub use crate::routes::{Layout, NavigateOptions, Navigator, Route};
    #[cfg(feature = "wasm")]
    pub use crate::routes::BrowserNavigator;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::auth::session::SessionWatch;
    #[cfg(feature = "http")]
    pub use crate::client::{
        AuthClient, MetricsClient, OrdersClient, PizzaShopClient, PizzaShopClientBuilder,
        RestaurantClient,
    };
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
}
