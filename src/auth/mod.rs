//! Authentication: magic-link sign-in, restaurant sign-up, manager profile,
//! session-expiry handling.
//!
//! ## Session Model
//!
//! The backend authenticates with an HTTP-only cookie. `POST /authenticate`
//! only emails a magic link; following that link (`GET /auth-links/authenticate`)
//! sets the cookie. Browsers attach it automatically; native clients keep it in
//! reqwest's cookie jar (`native` feature). The SDK never reads the token.
//!
//! When the cookie expires every request answers 401 with code
//! `UNAUTHORIZED`. [`session::SessionWatch`] turns that into a redirect to the
//! sign-in page.

#[cfg(feature = "http")]
pub mod client;

#[cfg(feature = "http")]
pub mod session;

use crate::error::SdkError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// User profile types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    Customer,
}

/// The signed-in user, from `GET /me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Request bodies
// ============================================================================

/// Body of `POST /authenticate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
}

/// Body of `POST /restaurants`: creates a restaurant and its manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRestaurant {
    pub restaurant_name: String,
    pub manager_name: String,
    pub phone: String,
    pub email: String,
}

impl RegisterRestaurant {
    pub fn validate(&self) -> Result<(), SdkError> {
        require_non_empty("restaurant name", &self.restaurant_name)?;
        require_non_empty("manager name", &self.manager_name)?;
        require_non_empty("phone", &self.phone)?;
        validate_email(&self.email)
    }
}

// ============================================================================
// Form validation
// ============================================================================

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<(), SdkError> {
    if value.trim().is_empty() {
        return Err(SdkError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Shape check only; the backend decides whether the address exists.
pub fn validate_email(email: &str) -> Result<(), SdkError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(SdkError::Validation(format!("invalid email: {email:?}")));
    }
    Ok(())
}
