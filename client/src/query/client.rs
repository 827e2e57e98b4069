//! Query/mutation orchestration over [`QueryCache`].
//!
//! DESIGN
//! ======
//! - `fetch` returns a fresh cached value or runs the fetcher and stores
//!   the result. Fetch errors leave any existing entry untouched.
//! - `mutate` runs a call, then on success invalidates its key set and
//!   emits the success toast; on failure it emits one error toast and
//!   invalidates nothing.
//!
//! ERROR HANDLING
//! ==============
//! Error toast text resolves as: fixed message, else backend `message`,
//! else the mutation's fallback, else [`GENERIC_ERROR_MESSAGE`].

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::cache::QueryCache;
use super::keys::QueryKey;
use crate::net::error::{ApiError, GENERIC_ERROR_MESSAGE};
use crate::notify::{Notifier, Toast};

type SuccessToast<T> = Box<dyn FnOnce(&T) -> Toast + Send>;
type InvalidateFn<T> = Box<dyn FnOnce(&T) -> Vec<QueryKey> + Send>;

/// Side effects attached to a mutation call.
pub struct Mutation<T> {
    error_title: String,
    error_message: Option<String>,
    error_fallback: Option<String>,
    success: Option<SuccessToast<T>>,
    invalidate: Vec<InvalidateFn<T>>,
}

impl<T> Mutation<T> {
    /// A mutation whose error toast is titled `error_title`.
    #[must_use]
    pub fn new(error_title: impl Into<String>) -> Self {
        Self {
            error_title: error_title.into(),
            error_message: None,
            error_fallback: None,
            success: None,
            invalidate: Vec::new(),
        }
    }

    #[must_use]
    pub fn success_toast(self, title: impl Into<String>, description: impl Into<String>) -> Self {
        let toast = Toast::success(title, description);
        self.success_with(move |_| toast)
    }

    #[must_use]
    pub fn success_with(mut self, build: impl FnOnce(&T) -> Toast + Send + 'static) -> Self {
        self.success = Some(Box::new(build));
        self
    }

    /// Fixed error text; the backend message is never shown.
    #[must_use]
    pub fn error_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Text used when the backend sent no message.
    #[must_use]
    pub fn error_fallback(mut self, message: impl Into<String>) -> Self {
        self.error_fallback = Some(message.into());
        self
    }

    #[must_use]
    pub fn invalidate(self, keys: Vec<QueryKey>) -> Self {
        self.invalidate_with(move |_| keys)
    }

    /// Keys derived from the mutation result.
    #[must_use]
    pub fn invalidate_with(mut self, keys: impl FnOnce(&T) -> Vec<QueryKey> + Send + 'static) -> Self {
        self.invalidate.push(Box::new(keys));
        self
    }

    fn error_text(&self, error: &ApiError) -> String {
        self.error_message
            .as_deref()
            .or_else(|| error.backend_message())
            .or(self.error_fallback.as_deref())
            .unwrap_or(GENERIC_ERROR_MESSAGE)
            .to_owned()
    }
}

#[derive(Clone)]
pub struct QueryClient {
    cache: Arc<QueryCache>,
    notifier: Arc<dyn Notifier>,
}

impl QueryClient {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { cache: Arc::new(QueryCache::new()), notifier }
    }

    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    #[must_use]
    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    /// Cached value if fresh, else run `fetcher` and cache the result.
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        self.fetch_with_interval(key, None, fetcher).await
    }

    /// Like [`Self::fetch`], but entries older than `refetch_interval` are
    /// refetched even when nothing invalidated them.
    pub async fn fetch_with_interval<T, F, Fut>(
        &self,
        key: QueryKey,
        refetch_interval: Option<Duration>,
        fetcher: F,
    ) -> Result<T, ApiError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        if let Some(entry) = self.cache.get(&key).filter(|e| e.is_fresh(refetch_interval))
            && let Ok(value) = serde_json::from_value::<T>(entry.value)
        {
            debug!(%key, "query: cache hit");
            return Ok(value);
        }

        debug!(%key, "query: fetching");
        let value = fetcher().await?;
        match serde_json::to_value(&value) {
            Ok(json) => self.cache.insert(key, json),
            Err(e) => warn!(%key, error = %e, "query: result not cacheable"),
        }
        Ok(value)
    }

    /// Decode a cached value regardless of staleness.
    #[must_use]
    pub fn get_cached<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let entry = self.cache.get(key)?;
        match serde_json::from_value(entry.value) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(%key, error = %e, "query: cached value has a different shape");
                None
            }
        }
    }

    pub fn set_cached<T: Serialize>(&self, key: QueryKey, value: &T) {
        match serde_json::to_value(value) {
            Ok(json) => self.cache.insert(key, json),
            Err(e) => warn!(%key, error = %e, "query: result not cacheable"),
        }
    }

    /// `None` when the key was never cached.
    #[must_use]
    pub fn is_stale(&self, key: &QueryKey) -> Option<bool> {
        self.cache.is_stale(key)
    }

    pub fn invalidate(&self, prefix: &QueryKey) {
        let count = self.cache.invalidate(prefix);
        debug!(%prefix, count, "query: invalidated");
    }

    /// Run a mutation call and apply its side effects.
    pub async fn mutate<T, Fut>(&self, mutation: Mutation<T>, call: Fut) -> Result<T, ApiError>
    where
        Fut: Future<Output = Result<T, ApiError>>,
    {
        match call.await {
            Ok(data) => {
                let Mutation { success, invalidate, .. } = mutation;
                for keys in invalidate {
                    for key in keys(&data) {
                        self.invalidate(&key);
                    }
                }
                if let Some(build) = success {
                    self.notifier.notify(build(&data));
                }
                Ok(data)
            }
            Err(error) => {
                warn!(title = %mutation.error_title, error = %error, "query: mutation failed");
                let text = mutation.error_text(&error);
                self.notifier.notify(Toast::error(mutation.error_title, text));
                Err(error)
            }
        }
    }
}
