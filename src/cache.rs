//! Query cache: app-owned result store, SDK-provided update logic.
//!
//! Results are stored under a [`QueryKey`]: a tag (`"orders"`,
//! `"managed-restaurant"`, ...) followed by the parameters the result was
//! fetched with. Operations that take a prefix key act on every entry whose
//! key starts with it, so `QueryKey::tag("orders")` addresses all cached order
//! lists at once regardless of filters or page.
//!
//! The cache itself is plain data with `&mut self` updates. Sharing is the
//! owner's concern; [`PizzaShopClient`](crate::client::PizzaShopClient) wraps
//! each cache in an `Arc<RwLock<_>>`.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

// ─── QueryKey ────────────────────────────────────────────────────────────────

/// One segment of a query key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Str(String),
    Int(i64),
    Null,
}

impl From<&str> for KeyPart {
    fn from(s: &str) -> Self {
        KeyPart::Str(s.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(s: String) -> Self {
        KeyPart::Str(s)
    }
}

impl From<i64> for KeyPart {
    fn from(n: i64) -> Self {
        KeyPart::Int(n)
    }
}

impl From<u32> for KeyPart {
    fn from(n: u32) -> Self {
        KeyPart::Int(i64::from(n))
    }
}

impl<T: Into<KeyPart>> From<Option<T>> for KeyPart {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(KeyPart::Null)
    }
}

/// Identifying tuple under which a fetched result is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<KeyPart>);

impl QueryKey {
    /// A key consisting of the tag alone. Used as a prefix or for singleton queries.
    pub fn tag(tag: &str) -> Self {
        Self(vec![KeyPart::from(tag)])
    }

    /// Append a parameter segment.
    pub fn with(mut self, part: impl Into<KeyPart>) -> Self {
        self.0.push(part.into());
        self
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.0
    }

    /// The leading tag, if the first segment is a string.
    pub fn tag_name(&self) -> Option<&str> {
        match self.0.first() {
            Some(KeyPart::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

// ─── Entries ─────────────────────────────────────────────────────────────────

/// A cached result plus the bookkeeping used for staleness.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    /// `None` while the first fetch is in flight or after it failed.
    pub data: Option<T>,
    /// When `data` was last written by a fetch.
    pub updated_at: Option<DateTime<Utc>>,
    pub invalidated: bool,
}

impl<T> CacheEntry<T> {
    fn empty() -> Self {
        Self {
            data: None,
            updated_at: None,
            invalidated: false,
        }
    }
}

// ─── QueryCache ──────────────────────────────────────────────────────────────

/// Result store for one value type.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryCache<T> {
    entries: HashMap<QueryKey, CacheEntry<T>>,
}

impl<T> QueryCache<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a key without data (a query that has started but not resolved).
    pub fn ensure(&mut self, key: QueryKey) {
        self.entries.entry(key).or_insert_with(CacheEntry::empty);
    }

    /// Store freshly fetched data under `key`.
    pub fn set_query_data(&mut self, key: QueryKey, data: T) {
        self.entries.insert(
            key,
            CacheEntry {
                data: Some(data),
                updated_at: Some(Utc::now()),
                invalidated: false,
            },
        );
    }

    pub fn get_query_data(&self, key: &QueryKey) -> Option<&T> {
        self.entries.get(key).and_then(|e| e.data.as_ref())
    }

    pub fn entry(&self, key: &QueryKey) -> Option<&CacheEntry<T>> {
        self.entries.get(key)
    }

    /// Every entry under `prefix`, including ones that hold no data yet.
    pub fn get_queries_data(&self, prefix: &QueryKey) -> Vec<(&QueryKey, Option<&T>)> {
        self.entries
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, e)| (k, e.data.as_ref()))
            .collect()
    }

    /// Rewrite the data of every entry under `prefix`.
    ///
    /// `rewrite` receives the current data of each entry that has some and
    /// returns the replacement, or `None` to leave that entry untouched.
    /// Entries without data are skipped. The write does not count as a fetch:
    /// `updated_at` and the invalidation flag are preserved.
    /// Returns the number of entries rewritten.
    pub fn update_queries_data<F>(&mut self, prefix: &QueryKey, mut rewrite: F) -> usize
    where
        F: FnMut(&T) -> Option<T>,
    {
        let mut rewritten = 0;
        for (key, entry) in self.entries.iter_mut() {
            if !key.starts_with(prefix) {
                continue;
            }
            let Some(current) = entry.data.as_ref() else {
                continue;
            };
            if let Some(next) = rewrite(current) {
                entry.data = Some(next);
                rewritten += 1;
            }
        }
        rewritten
    }

    /// Mark every entry under `prefix` stale. Data stays readable until refetched.
    pub fn invalidate_queries(&mut self, prefix: &QueryKey) -> usize {
        let mut count = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.invalidated = true;
                count += 1;
            }
        }
        count
    }

    /// Whether `key` needs a refetch: no data, invalidated, or older than `stale_time`.
    ///
    /// `Duration::MAX` never goes stale by age.
    pub fn is_stale(&self, key: &QueryKey, stale_time: Duration) -> bool {
        let Some(entry) = self.entries.get(key) else {
            return true;
        };
        if entry.data.is_none() || entry.invalidated {
            return true;
        }
        let Some(updated_at) = entry.updated_at else {
            return true;
        };
        match chrono::Duration::from_std(stale_time) {
            Ok(ttl) => Utc::now() - updated_at >= ttl,
            // Too large to represent: treat as infinite.
            Err(_) => false,
        }
    }

    /// Evict every entry under `prefix`.
    pub fn remove_queries(&mut self, prefix: &QueryKey) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, _| !k.starts_with(prefix));
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
