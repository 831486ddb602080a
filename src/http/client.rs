//! Low-level HTTP client: `PizzaShopHttp`.
//!
//! Generic verbs with retry, JSON bodies and response interceptors. Endpoint
//! URLs are built by the domain sub-clients; this layer knows nothing about
//! orders or restaurants.

use crate::error::{ApiErrorBody, HttpError};
use crate::http::interceptor::{
    InterceptorId, Interceptors, ResponseContext, ResponseInterceptor,
};
use crate::http::retry::RetryPolicy;

use async_lock::RwLock;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Low-level HTTP client for the pizza.shop REST API.
///
/// Authentication is cookie-based: the browser attaches the session cookie
/// on WASM (requests are sent with credentials included), and on native the
/// `native` feature enables reqwest's cookie jar.
pub struct PizzaShopHttp {
    base_url: String,
    client: Client,
    interceptors: Arc<RwLock<Interceptors>>,
}

impl PizzaShopHttp {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.timeout(timeout).pool_max_idle_per_host(10);
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;
        #[cfg(all(feature = "native", not(target_arch = "wasm32")))]
        {
            builder = builder.cookie_store(true);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            interceptors: Arc::new(RwLock::new(Interceptors::new())),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/orders`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // ── Interceptors ─────────────────────────────────────────────────────

    pub async fn add_response_interceptor(
        &self,
        interceptor: Arc<dyn ResponseInterceptor>,
    ) -> InterceptorId {
        self.interceptors.write().await.add(interceptor)
    }

    pub async fn remove_response_interceptor(&self, id: InterceptorId) -> bool {
        self.interceptors.write().await.remove(id)
    }

    /// Remove without waiting. Returns `false` if the registry is busy or
    /// `id` is not installed.
    pub fn try_remove_response_interceptor(&self, id: InterceptorId) -> bool {
        match self.interceptors.try_write() {
            Some(mut registry) => registry.remove(id),
            None => false,
        }
    }

    /// Number of installed interceptors. Inactive ones are pruned first.
    pub async fn interceptor_count(&self) -> usize {
        let mut registry = self.interceptors.write().await;
        registry.prune();
        registry.len()
    }

    // ── Verbs ────────────────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(Method::GET, url, None::<&()>, retry)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(Method::POST, url, Some(body), retry)
            .await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(Method::PUT, url, Some(body), retry)
            .await
    }

    /// Bodiless PATCH, as used by the order status actions.
    pub(crate) async fn patch<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        self.request_with_retry(Method::PATCH, url, None::<&()>, retry)
            .await
    }

    async fn request_with_retry<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let Some(config) = retry.config() else {
            return self.do_request(&method, url, body).await;
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T, B>(&method, url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    if !config.should_retry(&e) || attempt >= config.max_retries {
                        return Err(e);
                    }

                    let delay = match &e {
                        HttpError::RateLimited {
                            retry_after_ms: Some(ms),
                        } => Duration::from_millis(*ms),
                        _ => config.delay_for_attempt(attempt),
                    };
                    tracing::debug!(
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying {} {}",
                        method,
                        url
                    );
                    futures_timer::Delay::new(delay).await;
                    last_error = Some(e);
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned, B: Serialize>(
        &self,
        method: &Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError> {
        let body_text = self.execute(method, url, body).await?;
        // 204 and other empty bodies decode as JSON `null`, i.e. `()`.
        let raw = if body_text.trim().is_empty() {
            "null"
        } else {
            body_text.as_str()
        };
        Ok(serde_json::from_str(raw)?)
    }

    /// GET whose success body is irrelevant (redirect targets, HTML pages).
    pub(crate) async fn get_ignoring_body(&self, url: &str) -> Result<(), HttpError> {
        self.execute(&Method::GET, url, None::<&()>).await?;
        Ok(())
    }

    /// Send one request, run interceptors, and map non-2xx statuses to errors.
    /// Returns the raw success body.
    async fn execute<B: Serialize>(
        &self,
        method: &Method,
        url: &str,
        body: Option<&B>,
    ) -> Result<String, HttpError> {
        let mut req = self.client.request(method.clone(), url);

        #[cfg(target_arch = "wasm32")]
        {
            req = req.fetch_credentials_include();
        }

        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status().as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await?;

        if (200..300).contains(&status) {
            self.notify(method, url, status, None).await;
            return Ok(body_text);
        }

        let error_body = ApiErrorBody::parse(&body_text);
        self.notify(method, url, status, error_body.code.as_deref())
            .await;

        match status {
            401 => Err(HttpError::Unauthorized {
                message: error_body.message_or("Unauthorized"),
                code: error_body.code,
            }),
            404 => Err(HttpError::NotFound(error_body.message_or(url))),
            408 => Err(HttpError::Timeout),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest {
                message: error_body.message_or("Bad request"),
                code: error_body.code,
            }),
            _ => Err(HttpError::ServerError {
                status,
                body: body_text,
            }),
        }
    }

    async fn notify(&self, method: &Method, url: &str, status: u16, code: Option<&str>) {
        let ctx = ResponseContext {
            method: method.as_str(),
            url,
            status,
            code,
        };
        self.interceptors.read().await.dispatch(&ctx);
    }
}

impl Clone for PizzaShopHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            interceptors: self.interceptors.clone(),
        }
    }
}
