use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_COOKING_SKILL, DEFAULT_COOKING_TIME, DEFAULT_PORTION_SIZE};

/// Cooking preferences a user has saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreference {
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    pub cooking_skill: u8,
    #[serde(default)]
    pub preferred_cuisine: Vec<String>,
    #[serde(default)]
    pub available_equipment: Vec<String>,
    #[serde(default)]
    pub health_goals: Vec<String>,
    pub portion_size: u32,
    /// Upper bound on cook time, in minutes.
    pub max_cooking_time: u32,
    /// Stamped by the manager on every update.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl Default for UserPreference {
    fn default() -> Self {
        Self {
            dietary_restrictions: Vec::new(),
            cooking_skill: DEFAULT_COOKING_SKILL,
            preferred_cuisine: Vec::new(),
            available_equipment: Vec::new(),
            health_goals: Vec::new(),
            portion_size: DEFAULT_PORTION_SIZE,
            max_cooking_time: DEFAULT_COOKING_TIME,
            last_updated: None,
        }
    }
}

/// One rating a user gave a recipe. Never edited once recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: String,
    pub recipe_id: String,
    pub rating: f64,
    #[serde(default)]
    pub feedback: String,
    pub timestamp: DateTime<Utc>,
}

/// The rating a user last gave to the recipe currently on screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    pub rating: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_ratings: usize,
    pub average_rating: f64,
    pub last_interaction: Option<DateTime<Utc>>,
    /// Recipe ids, highest rated first.
    pub favorite_recipes: Vec<String>,
}

/// Everything the persistent profile store holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub profiles: BTreeMap<String, UserPreference>,
    pub interactions: BTreeMap<String, Vec<Interaction>>,
}
