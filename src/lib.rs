//! Pantry library crate (used by the CLI and integration tests).
//!
//! # Public API Surface
//!
//! ## Search
//! - [`RecommendationEngine`] - Cache-first ingredient search over a [`RecipeCorpus`]
//! - [`IngredientScorer`], [`RecipeScorer`] - Coverage scoring and the scorer seam
//! - [`CollaborativeFilter`] - Predictions from pre-trained latent factors
//!
//! ## Cache
//! - [`CacheLayer`] - Timeout-bounded, fault-swallowing front for a [`CacheStore`]
//! - [`MemoryStore`], [`RedisStore`], [`BackingStore`] - Backing stores
//! - [`CacheKey`], [`CachedValue`] - Namespaced keys and the closed set of cached shapes
//!
//! ## Users
//! - [`UserProfileManager`] - Preferences, rating history and current rating
//! - [`JsonFileStore`], [`MemoryProfileStore`] - Profile persistence
//!
//! ## Utilities
//! - [`Config`], [`ConfigError`] - Environment configuration
//! - [`GenerationContext`] - Text-generator input, rendered as Tauq
//! - [`FactorDims`], [`validate_factor_dim`] - Latent dimension validation
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod context;
pub mod corpus;
pub mod error;
pub mod filter;
pub mod profile;
pub mod recommend;
pub mod scoring;

#[cfg(any(test, feature = "mock"))]
pub use cache::MockCacheStore;
pub use cache::{
    BackingStore, CacheConfig, CacheKey, CacheLayer, CacheStore, CachedValue, MemoryStore,
    RedisStore, StoreError, StoreResult, StoreStats,
};
pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, FactorDims, validate_factor_dim};
pub use context::GenerationContext;
pub use corpus::{CorpusError, LoadStats, Nutrition, Recipe, RecipeCorpus, RecipeRecord};
pub use error::{PantryError, PantryResult, ValidationError};
pub use filter::{CollaborativeFilter, FactorModel, FactorSnapshot, FilterError};
pub use profile::{
    Interaction, JsonFileStore, MemoryProfileStore, ProfileStore, RatingRecord, UserPreference,
    UserProfileManager, UserStats,
};
pub use recommend::{RecipeSummary, RecommendationEngine, parse_detected_ingredients};
pub use scoring::{IngredientScorer, NormalizedQuery, RecipeScorer, ScoredRecipe, ScoringError};
