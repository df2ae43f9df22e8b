use std::time::Duration;

use crate::constants::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TIMEOUT_MS, DEFAULT_CACHE_TTL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL applied when `set` is called without one.
    pub default_ttl: Duration,
    /// Upper bound on each backing-store call.
    pub op_timeout: Duration,
    /// Entry capacity for the in-memory store.
    pub capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_CACHE_TTL,
            op_timeout: Duration::from_millis(DEFAULT_CACHE_TIMEOUT_MS),
            capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl CacheConfig {
    pub fn default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn op_timeout(mut self, timeout: Duration) -> Self {
        self.op_timeout = timeout;
        self
    }

    pub fn capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }
}
