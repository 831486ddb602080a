//! HTTP client layer: `PizzaShopHttp` with per-request retry policies and
//! response interceptors.

pub mod client;
pub mod interceptor;
pub mod retry;

pub use client::PizzaShopHttp;
pub use interceptor::{InterceptorId, Interceptors, ResponseContext, ResponseInterceptor};
pub use retry::{RetryConfig, RetryPolicy};
