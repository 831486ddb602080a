//! Session-expiry redirect.
//!
//! The authenticated shell installs a [`SessionWatch`] when it mounts and
//! detaches it when it unmounts. While installed, any backend response with
//! status 401 and code `UNAUTHORIZED` sends the user to the sign-in page,
//! replacing the current history entry so "back" cannot return to a page
//! whose session is gone.

use crate::error::UNAUTHORIZED_CODE;
use crate::http::{InterceptorId, PizzaShopHttp, ResponseContext, ResponseInterceptor};
use crate::routes::{NavigateOptions, Navigator, Route};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Whether a response signals an expired session.
pub fn is_session_expired(status: u16, code: Option<&str>) -> bool {
    status == 401 && code == Some(UNAUTHORIZED_CODE)
}

/// Response interceptor that redirects to sign-in on session expiry.
pub struct SessionExpiryInterceptor {
    navigator: Arc<dyn Navigator>,
    active: Arc<AtomicBool>,
}

impl SessionExpiryInterceptor {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            navigator,
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Stop reacting to responses. Already-dispatched calls are unaffected.
    pub fn deactivate(&self) {
        self.active.store(false, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl ResponseInterceptor for SessionExpiryInterceptor {
    fn is_active(&self) -> bool {
        SessionExpiryInterceptor::is_active(self)
    }

    fn on_response(&self, response: &ResponseContext<'_>) {
        if !self.is_active() || !is_session_expired(response.status, response.code) {
            return;
        }
        tracing::warn!(
            method = response.method,
            url = response.url,
            "Session expired, redirecting to sign-in"
        );
        self.navigator
            .navigate(Route::SignIn.path(), NavigateOptions::replace());
    }
}

/// Installed session-expiry interceptor.
///
/// Call [`detach`](SessionWatch::detach) on unmount. Dropping the guard
/// without detaching deactivates the interceptor immediately and removes it
/// from the client if the registry is free; otherwise the registry prunes it
/// on the next install.
pub struct SessionWatch {
    http: PizzaShopHttp,
    id: InterceptorId,
    interceptor: Arc<SessionExpiryInterceptor>,
}

impl SessionWatch {
    pub(crate) async fn install(http: &PizzaShopHttp, navigator: Arc<dyn Navigator>) -> Self {
        let interceptor = Arc::new(SessionExpiryInterceptor::new(navigator));
        let id = http.add_response_interceptor(interceptor.clone()).await;
        tracing::debug!(?id, "Session watch installed");
        Self {
            http: http.clone(),
            id,
            interceptor,
        }
    }

    pub fn id(&self) -> InterceptorId {
        self.id
    }

    /// Remove the interceptor from the client.
    pub async fn detach(self) {
        self.interceptor.deactivate();
        self.http.remove_response_interceptor(self.id).await;
        tracing::debug!(id = ?self.id, "Session watch detached");
    }
}

impl Drop for SessionWatch {
    fn drop(&mut self) {
        self.interceptor.deactivate();
        self.http.try_remove_response_interceptor(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<(String, NavigateOptions)>>);

    impl Navigator for Recorder {
        fn navigate(&self, to: &str, options: NavigateOptions) {
            self.0.lock().unwrap().push((to.to_string(), options));
        }
    }

    fn response(status: u16, code: Option<&'static str>) -> ResponseContext<'static> {
        ResponseContext {
            method: "GET",
            url: "http://localhost:3333/orders",
            status,
            code,
        }
    }

    #[test]
    fn test_classification() {
        assert!(is_session_expired(401, Some("UNAUTHORIZED")));
        assert!(!is_session_expired(401, Some("INVALID_TOKEN")));
        assert!(!is_session_expired(401, None));
        assert!(!is_session_expired(403, Some("UNAUTHORIZED")));
    }

    #[test]
    fn test_redirects_once_with_replace() {
        let recorder = Arc::new(Recorder::default());
        let interceptor = SessionExpiryInterceptor::new(recorder.clone());

        interceptor.on_response(&response(401, Some("UNAUTHORIZED")));

        let calls = recorder.0.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "/sign-in");
        assert!(calls[0].1.replace);
    }

    #[test]
    fn test_other_responses_pass_through() {
        let recorder = Arc::new(Recorder::default());
        let interceptor = SessionExpiryInterceptor::new(recorder.clone());

        interceptor.on_response(&response(401, Some("FORBIDDEN_ACTION")));
        interceptor.on_response(&response(400, Some("UNAUTHORIZED")));
        interceptor.on_response(&response(500, None));
        interceptor.on_response(&response(200, None));

        assert!(recorder.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_deactivated_interceptor_ignores_expiry() {
        let recorder = Arc::new(Recorder::default());
        let interceptor = SessionExpiryInterceptor::new(recorder.clone());
        interceptor.deactivate();

        interceptor.on_response(&response(401, Some("UNAUTHORIZED")));

        assert!(!interceptor.is_active());
        assert!(recorder.0.lock().unwrap().is_empty());
    }
}
