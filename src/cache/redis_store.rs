//! Redis backing store.
//!
//! Values are written with `SETEX`, so expiry is enforced by Redis itself.
//! `INFO` supplies memory, keyspace hit/miss and key-count figures.

use std::time::Duration;

use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::info;

use super::error::StoreResult;
use super::store::{CacheStore, StoreStats};

#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl RedisStore {
    /// Connects to `url` (e.g. `redis://localhost:6379/0`).
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;
        info!(url = %url, "Connected to Redis cache");
        Ok(Self { manager })
    }

    pub fn from_manager(manager: ConnectionManager) -> Self {
        Self { manager }
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

impl CacheStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut conn = self.manager.clone();
        Ok(conn.get::<_, Option<Vec<u8>>>(key).await?)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> StoreResult<()> {
        let mut conn = self.manager.clone();
        // SETEX rejects a zero expiry.
        let seconds = ttl.as_secs().max(1);
        conn.set_ex::<_, _, ()>(key, value, seconds).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut conn = self.manager.clone();
        let removed: u64 = conn.del(key).await?;
        Ok(removed > 0)
    }

    async fn stats(&self) -> StoreResult<StoreStats> {
        let mut conn = self.manager.clone();
        let info: String = redis::cmd("INFO").query_async(&mut conn).await?;
        Ok(parse_info(&info))
    }
}

/// Extracts [`StoreStats`] from the text of a Redis `INFO` reply.
///
/// Unknown or unparsable lines are ignored; missing figures stay zero.
pub fn parse_info(info: &str) -> StoreStats {
    let mut used_memory = 0;
    let mut hits = 0;
    let mut misses = 0;
    let mut total_keys = 0;

    for line in info.lines() {
        let Some((field, value)) = line.trim().split_once(':') else {
            continue;
        };

        match field {
            "used_memory" => used_memory = value.parse().unwrap_or(0),
            "keyspace_hits" => hits = value.parse().unwrap_or(0),
            "keyspace_misses" => misses = value.parse().unwrap_or(0),
            db if db.len() > 2 && db.starts_with("db") && db[2..].chars().all(|c| c.is_ascii_digit()) => {
                total_keys += value
                    .split(',')
                    .find_map(|kv| kv.strip_prefix("keys="))
                    .and_then(|n| n.parse::<u64>().ok())
                    .unwrap_or(0);
            }
            _ => {}
        }
    }

    StoreStats {
        used_memory,
        hit_rate: StoreStats::ratio(hits, misses),
        total_keys,
    }
}
