//! The closed set of value shapes the cache holds.
//!
//! Values are encoded as tagged JSON. Decoding only ever produces one of these
//! variants; anything else is a decode error and reads as a cache miss.

use serde::{Deserialize, Serialize};

use crate::profile::{Interaction, RatingRecord, UserPreference};
use crate::recommend::RecipeSummary;

use super::error::StoreResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CachedValue {
    RecipeSummaries(Vec<RecipeSummary>),
    Profile(UserPreference),
    Interactions(Vec<Interaction>),
    Rating(RatingRecord),
}

impl CachedValue {
    pub fn encode(&self) -> StoreResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn decode(bytes: &[u8]) -> StoreResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Short variant name for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            CachedValue::RecipeSummaries(_) => "recipe_summaries",
            CachedValue::Profile(_) => "profile",
            CachedValue::Interactions(_) => "interactions",
            CachedValue::Rating(_) => "rating",
        }
    }

    pub fn into_recipe_summaries(self) -> Option<Vec<RecipeSummary>> {
        match self {
            CachedValue::RecipeSummaries(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_profile(self) -> Option<UserPreference> {
        match self {
            CachedValue::Profile(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_interactions(self) -> Option<Vec<Interaction>> {
        match self {
            CachedValue::Interactions(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_rating(self) -> Option<RatingRecord> {
        match self {
            CachedValue::Rating(v) => Some(v),
            _ => None,
        }
    }
}
