use crate::domain::model::SearchResult;
use crate::domain::traits::CacheStore;
use crate::infrastructure::storage::cache::DisabledCache;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default lifetime of a cached bucket, in seconds
pub const DEFAULT_TTL_SECONDS: u64 = 600;

/// Typed, fail-open wrapper around a [`CacheStore`].
///
/// Nothing here returns an error: an unavailable store, a store failure or a
/// malformed payload all read as a miss, and failed writes are dropped.
#[derive(Clone)]
pub struct SearchCache {
    store: Arc<dyn CacheStore>,
    ttl_seconds: u64,
}

impl SearchCache {
    pub fn new(store: Arc<dyn CacheStore>, ttl_seconds: u64) -> Self {
        Self { store, ttl_seconds }
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledCache), DEFAULT_TTL_SECONDS)
    }

    pub fn is_available(&self) -> bool {
        self.store.is_available()
    }

    pub async fn get(&self, key: &str) -> Option<Vec<SearchResult>> {
        if !self.store.is_available() {
            return None;
        }

        let payload = match self.store.get(key).await {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                debug!(key, "search cache miss");
                return None;
            }
            Err(e) => {
                warn!(key, error = %e, "search cache read failed, falling back to scan");
                return None;
            }
        };

        match serde_json::from_str::<Vec<SearchResult>>(&payload) {
            Ok(results) => {
                debug!(key, count = results.len(), "search cache hit");
                Some(results)
            }
            Err(e) => {
                warn!(key, error = %e, "malformed search cache payload, ignoring");
                None
            }
        }
    }

    pub async fn set(&self, key: &str, results: &[SearchResult]) {
        if !self.store.is_available() {
            return;
        }

        let payload = match serde_json::to_string(results) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize search results for cache");
                return;
            }
        };

        if let Err(e) = self
            .store
            .set_with_expiry(key, payload, self.ttl_seconds)
            .await
        {
            warn!(key, error = %e, "search cache write failed");
        }
    }
}
