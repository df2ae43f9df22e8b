//! Fault-tolerant front for a [`CacheStore`].
//!
//! The cache is purely a performance optimization. Every read can come back
//! empty (cold cache, eviction, expiry, timeout, store fault, undecodable value)
//! and callers must carry on as if it had.

use std::time::Duration;

use tokio::time::timeout;
use tracing::{debug, instrument, warn};

use super::config::CacheConfig;
use super::error::StoreError;
use super::keys::CacheKey;
use super::store::{CacheStore, StoreStats};
use super::value::CachedValue;

pub struct CacheLayer<S: CacheStore> {
    store: S,
    config: CacheConfig,
}

impl<S: CacheStore> std::fmt::Debug for CacheLayer<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheLayer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S: CacheStore> CacheLayer<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, CacheConfig::default())
    }

    pub fn with_config(store: S, config: CacheConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    fn timeout_err(&self) -> StoreError {
        StoreError::Timeout {
            millis: self.config.op_timeout.as_millis() as u64,
        }
    }

    /// Reads and decodes `key`. Every fault reads as `None`.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn get(&self, key: &CacheKey) -> Option<CachedValue> {
        let bytes = match timeout(self.config.op_timeout, self.store.get(key.as_str())).await {
            Ok(Ok(Some(bytes))) => bytes,
            Ok(Ok(None)) => {
                debug!("Cache miss");
                return None;
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Cache retrieval error, treating as miss");
                return None;
            }
            Err(_) => {
                warn!(error = %self.timeout_err(), "Cache retrieval timed out, treating as miss");
                return None;
            }
        };

        match CachedValue::decode(&bytes) {
            Ok(value) => {
                debug!(kind = value.kind(), "Cache hit");
                Some(value)
            }
            Err(e) => {
                warn!(error = %e, "Cached value failed to decode, treating as miss");
                None
            }
        }
    }

    /// Encodes and writes `value`, using the default TTL when `ttl` is `None`.
    ///
    /// Returns `false` (and logs) on any failure.
    #[instrument(skip(self, value), fields(key = %key, kind = value.kind()))]
    pub async fn set(&self, key: &CacheKey, value: &CachedValue, ttl: Option<Duration>) -> bool {
        let bytes = match value.encode() {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Cache value failed to encode");
                return false;
            }
        };

        let ttl = ttl.unwrap_or(self.config.default_ttl);
        match timeout(self.config.op_timeout, self.store.set(key.as_str(), bytes, ttl)).await {
            Ok(Ok(())) => {
                debug!(ttl_secs = ttl.as_secs(), "Cache set");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Cache setting error");
                false
            }
            Err(_) => {
                warn!(error = %self.timeout_err(), "Cache setting timed out");
                false
            }
        }
    }

    /// Deletes `key`. A key that was already absent still counts as success.
    #[instrument(skip(self), fields(key = %key))]
    pub async fn invalidate(&self, key: &CacheKey) -> bool {
        match timeout(self.config.op_timeout, self.store.delete(key.as_str())).await {
            Ok(Ok(existed)) => {
                debug!(existed, "Cache invalidated");
                true
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Cache invalidation error");
                false
            }
            Err(_) => {
                warn!(error = %self.timeout_err(), "Cache invalidation timed out");
                false
            }
        }
    }

    /// Backing-store statistics, or all-zero stats if they cannot be fetched.
    pub async fn stats(&self) -> StoreStats {
        match timeout(self.config.op_timeout, self.store.stats()).await {
            Ok(Ok(stats)) => stats,
            Ok(Err(e)) => {
                warn!(error = %e, "Cache stats error");
                StoreStats::default()
            }
            Err(_) => {
                warn!(error = %self.timeout_err(), "Cache stats timed out");
                StoreStats::default()
            }
        }
    }
}
