//! Network URL constants for the pizza.shop SDK.

/// Default REST API base URL (the backend's local development port).
pub const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Default request timeout on native targets. Browsers apply their own.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
