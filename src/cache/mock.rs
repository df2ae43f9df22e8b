//! Fault-injecting store for exercising degradation paths.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use super::error::{StoreError, StoreResult};
use super::memory::MemoryStore;
use super::store::{CacheStore, StoreStats};
use crate::constants::DEFAULT_CACHE_TTL;

/// [`MemoryStore`] wrapper that can fail, stall, or hold raw bytes on demand.
#[derive(Debug, Default)]
pub struct MockCacheStore {
    inner: MemoryStore,
    failing: AtomicBool,
    delay: Mutex<Option<Duration>>,
    get_calls: AtomicUsize,
    set_calls: AtomicUsize,
}

impl MockCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation return [`StoreError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Delays every subsequent operation by `delay`.
    pub fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock() = delay;
    }

    /// Stores raw bytes, bypassing value encoding.
    pub async fn insert_raw(&self, key: &str, bytes: &[u8]) {
        let _ = self.inner.set(key, bytes.to_vec(), DEFAULT_CACHE_TTL).await;
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.set_calls.load(Ordering::SeqCst)
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    async fn before_op(&self) -> StoreResult<()> {
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

impl CacheStore for MockCacheStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.before_op().await?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> StoreResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.before_op().await?;
        self.inner.set(key, value, ttl).await
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        self.before_op().await?;
        self.inner.delete(key).await
    }

    async fn stats(&self) -> StoreResult<StoreStats> {
        self.before_op().await?;
        self.inner.stats().await
    }
}
