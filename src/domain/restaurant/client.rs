//! Restaurant sub-client: managed restaurant, store profile.

use super::{ManagedRestaurant, StoreProfile};
use crate::auth::client::PROFILE_TAG;
use crate::cache::QueryKey;
use crate::client::PizzaShopClient;
use crate::error::SdkError;
use crate::http::RetryPolicy;

use std::time::Duration;

/// Cache tag of the managed restaurant.
pub const MANAGED_RESTAURANT_TAG: &str = "managed-restaurant";

pub struct Restaurant<'a> {
    pub(crate) client: &'a PizzaShopClient,
}

impl<'a> Restaurant<'a> {
    /// The manager's restaurant. Never stale by age; refetched only after
    /// [`update_profile`](Self::update_profile) or a cache clear.
    pub async fn managed_restaurant(&self) -> Result<ManagedRestaurant, SdkError> {
        let key = QueryKey::tag(MANAGED_RESTAURANT_TAG);
        {
            let cache = self.client.restaurant_cache.read().await;
            if !cache.is_stale(&key, Duration::MAX) {
                if let Some(restaurant) = cache.get_query_data(&key) {
                    return Ok(restaurant.clone());
                }
            }
        }

        let url = self.client.http.url("/managed-restaurant");
        let restaurant: ManagedRestaurant =
            self.client.http.get(&url, RetryPolicy::Idempotent).await?;
        self.client
            .restaurant_cache
            .write()
            .await
            .set_query_data(key, restaurant.clone());
        Ok(restaurant)
    }

    /// Update name and description. On success the restaurant and profile
    /// caches are invalidated; on failure nothing changes locally.
    pub async fn update_profile(&self, profile: &StoreProfile) -> Result<(), SdkError> {
        profile.validate()?;
        let url = self.client.http.url("/profile");
        self.client
            .http
            .put::<(), _>(&url, profile, RetryPolicy::None)
            .await?;

        self.client
            .restaurant_cache
            .write()
            .await
            .invalidate_queries(&QueryKey::tag(MANAGED_RESTAURANT_TAG));
        self.client
            .profile_cache
            .write()
            .await
            .invalidate_queries(&QueryKey::tag(PROFILE_TAG));
        tracing::debug!(name = %profile.name, "Store profile updated");
        Ok(())
    }
}
