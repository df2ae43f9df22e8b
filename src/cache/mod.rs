//! TTL cache with pluggable backing stores.

pub mod config;
pub mod error;
pub mod keys;
pub mod layer;
pub mod memory;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod redis_store;
pub mod store;
pub mod value;


pub use config::CacheConfig;
pub use error::{StoreError, StoreResult};
pub use keys::{
    CURRENT_RECIPE_SUFFIX, CacheKey, INGREDIENT_DELIMITER, RATING_PREFIX, RECIPE_SEARCH_PREFIX,
    USER_INTERACTIONS_PREFIX, USER_PROFILE_PREFIX,
};
pub use layer::CacheLayer;
pub use memory::MemoryStore;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockCacheStore;
pub use redis_store::{RedisStore, parse_info};
pub use store::{BackingStore, CacheStore, StoreStats};
pub use value::CachedValue;
