//! Restaurant domain: the manager's restaurant and its store profile.

#[cfg(feature = "http")]
pub mod client;

use crate::auth::require_non_empty;
use crate::error::SdkError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Restaurant run by the signed-in manager (`GET /managed-restaurant`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedRestaurant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manager_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ManagedRestaurant {
    /// Store-profile form values prefilled from this restaurant.
    pub fn store_profile(&self) -> StoreProfile {
        StoreProfile {
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
        }
    }
}

/// Body of `PUT /profile`. The description may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfile {
    pub name: String,
    pub description: String,
}

impl StoreProfile {
    pub fn validate(&self) -> Result<(), SdkError> {
        require_non_empty("restaurant name", &self.name)
    }
}
