use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::config::CacheConfig;
use super::error::StoreResult;
use super::memory::MemoryStore;
use super::redis_store::RedisStore;

/// Best-effort backing-store introspection.
///
/// [`Default`] (all zero) is what callers see when the store cannot be queried.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StoreStats {
    /// Bytes used by stored values, as reported by the store.
    pub used_memory: u64,
    /// Hits divided by lookups, in `[0, 1]`. Zero when nothing was looked up.
    pub hit_rate: f64,
    pub total_keys: u64,
}

impl StoreStats {
    /// Computes a hit ratio, returning zero when there were no lookups.
    pub fn ratio(hits: u64, misses: u64) -> f64 {
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

/// Key-value storage with per-key expiry, used behind [`CacheLayer`](super::CacheLayer).
///
/// Implementations must be atomic per key; no multi-key transactions are needed.
pub trait CacheStore: Send + Sync {
    /// Returns the raw bytes for `key`, or `None` if absent or expired.
    fn get(&self, key: &str) -> impl std::future::Future<Output = StoreResult<Option<Vec<u8>>>> + Send;

    /// Writes `value` under `key`, expiring after `ttl`.
    fn set(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Duration,
    ) -> impl std::future::Future<Output = StoreResult<()>> + Send;

    /// Deletes `key`, returning whether it existed.
    fn delete(&self, key: &str) -> impl std::future::Future<Output = StoreResult<bool>> + Send;

    /// Reports memory, hit rate and key count.
    fn stats(&self) -> impl std::future::Future<Output = StoreResult<StoreStats>> + Send;
}

/// Store selected at runtime from configuration.
#[derive(Debug)]
pub enum BackingStore {
    Memory(MemoryStore),
    Redis(RedisStore),
}

impl BackingStore {
    pub fn name(&self) -> &'static str {
        match self {
            BackingStore::Memory(_) => "memory",
            BackingStore::Redis(_) => "redis",
        }
    }

    /// Redis at `redis_url` when it answers within `config.op_timeout`, else an
    /// in-process store bounded by `config.capacity`.
    pub async fn connect(redis_url: Option<&str>, config: &CacheConfig) -> Self {
        match redis_url {
            Some(url) => Self::redis_or_memory(RedisStore::connect(url), config).await,
            None => Self::Memory(MemoryStore::with_capacity(config.capacity)),
        }
    }

    pub(crate) async fn redis_or_memory<F>(connect: F, config: &CacheConfig) -> Self
    where
        F: Future<Output = StoreResult<RedisStore>>,
    {
        match tokio::time::timeout(config.op_timeout, connect).await {
            Ok(Ok(store)) => return Self::Redis(store),
            Ok(Err(e)) => {
                warn!(error = %e, "Redis unavailable, falling back to in-memory cache");
            }
            Err(_) => {
                warn!(
                    timeout_ms = config.op_timeout.as_millis() as u64,
                    "Redis connect timed out, falling back to in-memory cache"
                );
            }
        }
        Self::Memory(MemoryStore::with_capacity(config.capacity))
    }
}

impl CacheStore for BackingStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        match self {
            BackingStore::Memory(s) => s.get(key).await,
            BackingStore::Redis(s) => s.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> StoreResult<()> {
        match self {
            BackingStore::Memory(s) => s.set(key, value, ttl).await,
            BackingStore::Redis(s) => s.set(key, value, ttl).await,
        }
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        match self {
            BackingStore::Memory(s) => s.delete(key).await,
            BackingStore::Redis(s) => s.delete(key).await,
        }
    }

    async fn stats(&self) -> StoreResult<StoreStats> {
        match self {
            BackingStore::Memory(s) => s.stats().await,
            BackingStore::Redis(s) => s.stats().await,
        }
    }
}
