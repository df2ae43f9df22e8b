use thiserror::Error;

/// Faults raised by a cache or profile backing store.
///
/// [`CacheLayer`](super::CacheLayer) swallows all of these and degrades to a
/// miss, `false` or empty stats. Callers see them from profile stores and from
/// writes that have nowhere else to go.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Redis command or connection failure.
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// The operation did not finish within the configured timeout.
    #[error("cache operation timed out after {millis}ms")]
    Timeout {
        /// Timeout that elapsed.
        millis: u64,
    },

    /// Value could not be encoded or decoded.
    #[error("cache value serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store is reachable but refused or failed the operation.
    #[error("backing store unavailable: {reason}")]
    Unavailable {
        /// Error message.
        reason: String,
    },

    /// A write that has no other destination did not land.
    #[error("write rejected for key '{key}'")]
    WriteRejected {
        /// Key that could not be written.
        key: String,
    },

    /// Filesystem failure in a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
