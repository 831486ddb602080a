//! Response interceptors: hooks evaluated for every backend response.
//!
//! Interceptors observe; they cannot alter the response. The HTTP client calls
//! [`Interceptors::dispatch`] once per received response (including every
//! retry attempt) before the body is mapped to a result or an error.

use std::sync::Arc;

/// What an interceptor gets to see of a response.
#[derive(Debug, Clone, Copy)]
pub struct ResponseContext<'a> {
    pub method: &'a str,
    pub url: &'a str,
    pub status: u16,
    /// `code` field of the JSON error body, when the response is an error and has one.
    pub code: Option<&'a str>,
}

impl ResponseContext<'_> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait ResponseInterceptor: Send + Sync {
    fn on_response(&self, response: &ResponseContext<'_>);

    /// `false` once the interceptor will never act again. The registry drops
    /// inactive entries on the next `add` or `prune`.
    fn is_active(&self) -> bool {
        true
    }
}

/// Handle returned by [`Interceptors::add`]; pass it back to remove the hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterceptorId(u64);

/// Ordered registry of response interceptors.
#[derive(Default)]
pub struct Interceptors {
    next_id: u64,
    entries: Vec<(InterceptorId, Arc<dyn ResponseInterceptor>)>,
}

impl Interceptors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, interceptor: Arc<dyn ResponseInterceptor>) -> InterceptorId {
        self.prune();
        let id = InterceptorId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, interceptor));
        id
    }

    /// Returns `false` if `id` was already removed.
    pub fn remove(&mut self, id: InterceptorId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    /// Drop every inactive entry. Returns how many were removed.
    pub fn prune(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(_, interceptor)| interceptor.is_active());
        before - self.entries.len()
    }

    /// Run every active interceptor, in installation order.
    pub fn dispatch(&self, response: &ResponseContext<'_>) {
        for (_, interceptor) in &self.entries {
            if interceptor.is_active() {
                interceptor.on_response(response);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Interceptors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interceptors")
            .field("installed", &self.entries.len())
            .finish()
    }
}
