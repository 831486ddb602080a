//! Auth sub-client: sign-in, sign-up, sign-out, profile, session watch.

use std::sync::Arc;
use std::time::Duration;

use crate::auth::session::SessionWatch;
use crate::auth::{validate_email, Profile, RegisterRestaurant, SignInRequest};
use crate::cache::QueryKey;
use crate::client::PizzaShopClient;
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::routes::Navigator;

/// Cache tag of the signed-in user's profile.
pub const PROFILE_TAG: &str = "profile";

/// Sub-client for authentication operations.
pub struct Auth<'a> {
    pub(crate) client: &'a PizzaShopClient,
}

impl<'a> Auth<'a> {
    /// Request a magic sign-in link for `email`.
    ///
    /// Succeeds once the backend has queued the email; the session starts
    /// only when the link is followed.
    pub async fn sign_in(&self, email: &str) -> Result<(), SdkError> {
        validate_email(email)?;
        let url = self.client.http.url("/authenticate");
        let body = SignInRequest {
            email: email.trim().to_string(),
        };
        self.client
            .http
            .post::<(), _>(&url, &body, RetryPolicy::None)
            .await?;
        Ok(())
    }

    /// Register a restaurant and its manager.
    ///
    /// On success the dashboard continues at
    /// [`Route::sign_in_with_email`](crate::routes::Route::sign_in_with_email).
    pub async fn sign_up(&self, body: &RegisterRestaurant) -> Result<(), SdkError> {
        body.validate()?;
        let url = self.client.http.url("/restaurants");
        self.client
            .http
            .post::<(), _>(&url, body, RetryPolicy::None)
            .await?;
        Ok(())
    }

    /// Exchange a magic-link code for a session cookie (native clients).
    ///
    /// The backend answers with a redirect to `redirect`; reqwest follows it.
    pub async fn authenticate_link(&self, code: &str, redirect: &str) -> Result<(), SdkError> {
        if code.trim().is_empty() {
            return Err(SdkError::Validation("auth link code must not be empty".into()));
        }
        let url = format!(
            "{}?code={}&redirect={}",
            self.client.http.url("/auth-links/authenticate"),
            urlencoding::encode(code),
            urlencoding::encode(redirect)
        );
        self.client.http.get_ignoring_body(&url).await?;
        Ok(())
    }

    /// End the session and drop every cached result.
    pub async fn sign_out(&self) -> Result<(), SdkError> {
        let url = self.client.http.url("/sign-out");
        let result = self
            .client
            .http
            .post::<(), _>(&url, &serde_json::json!({}), RetryPolicy::None)
            .await;

        // Cached data belongs to the old session whether or not the call succeeded.
        self.client.clear_all_caches().await;
        result?;
        Ok(())
    }

    /// The signed-in manager. Cached until invalidated (e.g. by a profile update).
    pub async fn profile(&self) -> Result<Profile, SdkError> {
        let key = QueryKey::tag(PROFILE_TAG);
        {
            let cache = self.client.profile_cache.read().await;
            if !cache.is_stale(&key, Duration::MAX) {
                if let Some(profile) = cache.get_query_data(&key) {
                    return Ok(profile.clone());
                }
            }
        }

        let url = self.client.http.url("/me");
        let profile: Profile = self.client.http.get(&url, RetryPolicy::Idempotent).await?;
        self.client
            .profile_cache
            .write()
            .await
            .set_query_data(key, profile.clone());
        Ok(profile)
    }

    /// Install the session-expiry redirect. Keep the guard for as long as the
    /// authenticated shell is mounted.
    pub async fn watch_session(&self, navigator: Arc<dyn Navigator>) -> SessionWatch {
        SessionWatch::install(&self.client.http, navigator).await
    }
}
