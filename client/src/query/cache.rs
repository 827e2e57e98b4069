//! In-memory query cache.
//!
//! Payloads are stored as JSON values so one map can hold every query's
//! result type. Last write wins per key.

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;

use super::keys::QueryKey;

#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub value: Value,
    pub stale: bool,
    pub fetched_at: Instant,
}

impl CacheEntry {
    /// Fresh when not invalidated and younger than `max_age` (if any).
    #[must_use]
    pub fn is_fresh(&self, max_age: Option<Duration>) -> bool {
        !self.stale && max_age.is_none_or(|age| self.fetched_at.elapsed() < age)
    }
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, CacheEntry>>,
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &QueryKey) -> Option<CacheEntry> {
        self.lock().get(key).cloned()
    }

    pub fn insert(&self, key: QueryKey, value: Value) {
        self.lock().insert(key, CacheEntry { value, stale: false, fetched_at: Instant::now() });
    }

    /// Mark every entry under `prefix` stale. Returns how many matched.
    pub fn invalidate(&self, prefix: &QueryKey) -> usize {
        let mut entries = self.lock();
        let mut count = 0;
        for (key, entry) in entries.iter_mut() {
            if key.starts_with(prefix) {
                entry.stale = true;
                count += 1;
            }
        }
        count
    }

    /// `None` when the key was never cached.
    #[must_use]
    pub fn is_stale(&self, key: &QueryKey) -> Option<bool> {
        self.lock().get(key).map(|e| e.stale)
    }

    pub fn remove(&self, key: &QueryKey) -> Option<CacheEntry> {
        self.lock().remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
