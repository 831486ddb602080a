//! Client-visible routes of the dashboard and the navigation seam.
//!
//! The SDK never renders anything, but the session-expiry redirect has to
//! name a route and ask someone to go there. [`Navigator`] is that someone:
//! the router of the embedding UI on WASM, a recorder in tests.

/// Top-level pages of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Orders,
    SignIn,
    SignUp,
    /// Catch-all for anything else.
    NotFound,
}

/// Shell a route is rendered inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Authenticated shell (header, session watch installed).
    App,
    /// Sign-in / sign-up shell.
    Auth,
    /// No shell.
    Bare,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Dashboard,
        Route::Orders,
        Route::SignIn,
        Route::SignUp,
        Route::NotFound,
    ];

    /// Canonical path. `NotFound` has none of its own and reports `*`.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Orders => "/orders",
            Self::SignIn => "/sign-in",
            Self::SignUp => "/sign-up",
            Self::NotFound => "*",
        }
    }

    /// Match a location (`/orders?page=2#top`) to a route.
    pub fn resolve(location: &str) -> Route {
        let path = location
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        match path {
            "/" => Self::Dashboard,
            "/orders" => Self::Orders,
            "/sign-in" => Self::SignIn,
            "/sign-up" => Self::SignUp,
            _ => Self::NotFound,
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            Self::Dashboard | Self::Orders => Layout::App,
            Self::SignIn | Self::SignUp => Layout::Auth,
            Self::NotFound => Layout::Bare,
        }
    }

    pub fn requires_session(&self) -> bool {
        self.layout() == Layout::App
    }

    /// Sign-in location with the email field prefilled, used after sign-up.
    pub fn sign_in_with_email(email: &str) -> String {
        format!("{}?email={}", Self::SignIn.path(), urlencoding::encode(email))
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

// ─── Navigation ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

/// Moves the embedding UI to another location.
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: &str, options: NavigateOptions);
}

/// Navigator backed by `window.location`.
///
/// A full page navigation; apps with a client-side router should implement
/// [`Navigator`] on top of it instead.
#[cfg(feature = "wasm")]
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

#[cfg(feature = "wasm")]
impl Navigator for BrowserNavigator {
    fn navigate(&self, to: &str, options: NavigateOptions) {
        let Some(window) = web_sys::window() else {
            tracing::warn!(to, "No window available for navigation");
            return;
        };
        let location = window.location();
        let result = if options.replace {
            location.replace(to)
        } else {
            location.assign(to)
        };
        if let Err(err) = result {
            tracing::warn!(to, error = %describe_js_error(&err), "Navigation failed");
        }
    }
}

#[cfg(feature = "wasm")]
fn describe_js_error(err: &wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
