//! Search orchestration: normalize, consult the cache, score, rank, cache.

pub mod engine;
pub mod types;


pub use engine::{RecommendationEngine, align_scores, parse_detected_ingredients};
pub use types::RecipeSummary;
