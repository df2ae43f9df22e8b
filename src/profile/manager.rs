use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use super::model::{Interaction, ProfileSnapshot, RatingRecord, UserPreference, UserStats};
use super::store::ProfileStore;
use crate::cache::{CacheKey, CacheLayer, CacheStore, CachedValue, StoreError, StoreResult};
use crate::constants::{FAVORITE_RECIPES_TOP_K, MAX_RATING, MIN_RATING};
use crate::error::{PantryResult, ValidationError};

/// User preferences, rating history and the current-recipe rating.
///
/// The authoritative state lives in memory behind a lock and is written
/// through to the cache and to the [`ProfileStore`]. Reads consult that
/// state before the cache. The state lock is never held across an `.await`;
/// saves are serialized by `persist_lock` so the newest snapshot lands last.
///
/// User ids are trimmed on every path, reads included.
pub struct UserProfileManager<P: ProfileStore, S: CacheStore> {
    store: P,
    cache: Arc<CacheLayer<S>>,
    state: RwLock<ProfileSnapshot>,
    persist_lock: Mutex<()>,
}

impl<P: ProfileStore, S: CacheStore> std::fmt::Debug for UserProfileManager<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("UserProfileManager")
            .field("profiles", &state.profiles.len())
            .field("interactions", &state.interactions.len())
            .finish_non_exhaustive()
    }
}

fn normalize_user(user_id: &str) -> Option<&str> {
    let trimmed = user_id.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn require_user(user_id: &str) -> Result<&str, ValidationError> {
    normalize_user(user_id).ok_or_else(|| ValidationError::UnknownUser {
        user_id: user_id.to_string(),
    })
}

fn check_rating(rating: f64) -> Result<(), ValidationError> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange {
            rating,
            min: MIN_RATING,
            max: MAX_RATING,
        });
    }
    Ok(())
}

impl<P: ProfileStore, S: CacheStore> UserProfileManager<P, S> {
    /// Loads the persisted snapshot from `store`.
    pub async fn load(store: P, cache: Arc<CacheLayer<S>>) -> StoreResult<Self> {
        let snapshot = store.load().await?;
        Ok(Self::with_snapshot(store, cache, snapshot))
    }

    pub fn with_snapshot(store: P, cache: Arc<CacheLayer<S>>, snapshot: ProfileSnapshot) -> Self {
        Self {
            store,
            cache,
            state: RwLock::new(snapshot),
            persist_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    async fn persist(&self) {
        // Clone under the save lock: a snapshot taken earlier must not land
        // after a newer one.
        let _guard = self.persist_lock.lock().await;
        let snapshot = self.state.read().clone();
        if let Err(e) = self.store.save(&snapshot).await {
            warn!(error = %e, "Failed to persist user profiles; in-memory state kept");
        }
    }

    /// Writes `value` under `key`, dropping the key when the write is rejected
    /// so an older entry is not served.
    async fn write_through(&self, key: &CacheKey, value: &CachedValue) {
        if !self.cache.set(key, value, None).await {
            self.cache.invalidate(key).await;
        }
    }

    /// Replaces the user's preferences, stamping the update time.
    #[instrument(skip(self, preference), fields(user_id = %user_id))]
    pub async fn update_profile(
        &self,
        user_id: &str,
        mut preference: UserPreference,
    ) -> PantryResult<UserPreference> {
        let user_id = require_user(user_id)?;
        preference.last_updated = Some(Utc::now());

        self.state
            .write()
            .profiles
            .insert(user_id.to_string(), preference.clone());

        self.write_through(
            &CacheKey::user_profile(user_id),
            &CachedValue::Profile(preference.clone()),
        )
        .await;
        self.persist().await;

        info!("Updated user profile");
        Ok(preference)
    }

    /// Held preferences, else a cached entry written by another process.
    ///
    /// Held preferences are written back to the cache.
    pub async fn get_user_preferences(&self, user_id: &str) -> Option<UserPreference> {
        let user_id = normalize_user(user_id)?;
        let key = CacheKey::user_profile(user_id);

        let stored = self.state.read().profiles.get(user_id).cloned();
        match stored {
            Some(profile) => {
                self.write_through(&key, &CachedValue::Profile(profile.clone()))
                    .await;
                Some(profile)
            }
            None => self.cache.get(&key).await.and_then(CachedValue::into_profile),
        }
    }

    /// Appends a rating to the user's history.
    #[instrument(skip(self, feedback), fields(user_id = %user_id, recipe_id = %recipe_id))]
    pub async fn record_interaction(
        &self,
        user_id: &str,
        recipe_id: &str,
        rating: f64,
        feedback: &str,
    ) -> PantryResult<Interaction> {
        let user_id = require_user(user_id)?;
        check_rating(rating)?;

        let interaction = Interaction {
            user_id: user_id.to_string(),
            recipe_id: recipe_id.to_string(),
            rating,
            feedback: feedback.to_string(),
            timestamp: Utc::now(),
        };

        let history = {
            let mut state = self.state.write();
            let history = state.interactions.entry(user_id.to_string()).or_default();
            history.push(interaction.clone());
            history.clone()
        };

        self.write_through(
            &CacheKey::user_interactions(user_id),
            &CachedValue::Interactions(history),
        )
        .await;
        self.persist().await;

        debug!(rating, "Recorded interaction");
        Ok(interaction)
    }

    /// Rating history in insertion order; empty for unknown users.
    pub async fn get_user_ratings(&self, user_id: &str) -> Vec<Interaction> {
        let Some(user_id) = normalize_user(user_id) else {
            return Vec::new();
        };
        let key = CacheKey::user_interactions(user_id);

        let stored = self.state.read().interactions.get(user_id).cloned();
        match stored {
            Some(history) => {
                self.write_through(&key, &CachedValue::Interactions(history.clone()))
                    .await;
                history
            }
            None => self
                .cache
                .get(&key)
                .await
                .and_then(CachedValue::into_interactions)
                .unwrap_or_default(),
        }
    }

    /// `None` when the user has not rated anything.
    pub async fn get_user_stats(&self, user_id: &str) -> Option<UserStats> {
        let ratings = self.get_user_ratings(user_id).await;
        let last = ratings.last()?;

        let total = ratings.len();
        let average = ratings.iter().map(|r| r.rating).sum::<f64>() / total as f64;

        Some(UserStats {
            total_ratings: total,
            average_rating: average,
            last_interaction: Some(last.timestamp),
            favorite_recipes: top_rated(&ratings, FAVORITE_RECIPES_TOP_K),
        })
    }

    /// Up to `top_k` recipe ids, highest rated first; ties keep rating order.
    pub async fn favorite_recipes(&self, user_id: &str, top_k: usize) -> Vec<String> {
        top_rated(&self.get_user_ratings(user_id).await, top_k)
    }

    /// Records the user's rating of the recipe currently on screen.
    ///
    /// The cache is the only place this lives, so a failed write is an error.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn submit_rating(&self, user_id: &str, rating: f64) -> PantryResult<RatingRecord> {
        let user_id = require_user(user_id)?;
        check_rating(rating)?;

        let record = RatingRecord {
            rating,
            timestamp: Utc::now(),
        };
        let key = CacheKey::current_rating(user_id);
        if !self
            .cache
            .set(&key, &CachedValue::Rating(record.clone()), None)
            .await
        {
            return Err(StoreError::WriteRejected {
                key: key.into_string(),
            }
            .into());
        }
        Ok(record)
    }

    pub async fn current_rating(&self, user_id: &str) -> Option<RatingRecord> {
        let user_id = normalize_user(user_id)?;
        self.cache
            .get(&CacheKey::current_rating(user_id))
            .await
            .and_then(CachedValue::into_rating)
    }
}

fn top_rated(ratings: &[Interaction], top_k: usize) -> Vec<String> {
    let mut sorted: Vec<&Interaction> = ratings.iter().collect();
    sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    sorted
        .into_iter()
        .take(top_k)
        .map(|r| r.recipe_id.clone())
        .collect()
}
