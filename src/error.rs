//! Crate-level error taxonomy.
//!
//! Each component keeps its own error enum; [`PantryError`] groups them by how a
//! caller should react:
//!
//! - [`PantryError::Validation`]: the caller sent bad input; report it.
//! - [`PantryError::BackingStore`]: a cache or persistent store fault; usually
//!   already degraded to a default before reaching the caller.
//! - [`PantryError::DataFault`]: the recipe source could not be read at all.
//! - [`PantryError::InvariantViolation`]: inconsistent model state, e.g.
//!   latent vectors of different lengths.

use thiserror::Error;

use crate::cache::StoreError;
use crate::corpus::CorpusError;
use crate::filter::FilterError;
use crate::scoring::ScoringError;

/// Input rejected before any work is done.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("ingredient list is empty")]
    EmptyIngredients,

    #[error("rating {rating} is outside [{min}, {max}]")]
    RatingOutOfRange { rating: f64, min: f64, max: f64 },

    #[error("unknown user id '{user_id}'")]
    UnknownUser { user_id: String },
}

#[derive(Debug, Error)]
pub enum PantryError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("backing store error: {0}")]
    BackingStore(#[from] StoreError),

    #[error("data fault: {0}")]
    DataFault(#[from] CorpusError),

    #[error("invariant violation: {0}")]
    InvariantViolation(#[from] FilterError),

    #[error("scoring failed: {0}")]
    Scoring(ScoringError),
}

impl From<ScoringError> for PantryError {
    fn from(err: ScoringError) -> Self {
        match err {
            ScoringError::InvalidInput(v) => PantryError::Validation(v),
            other => PantryError::Scoring(other),
        }
    }
}

impl PantryError {
    /// Returns `true` for faults a caller may log and degrade from.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PantryError::BackingStore(_) | PantryError::Scoring(_))
    }
}

pub type PantryResult<T> = Result<T, PantryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoring_validation_flattens() {
        let err: PantryError = ScoringError::InvalidInput(ValidationError::EmptyIngredients).into();
        assert!(matches!(
            err,
            PantryError::Validation(ValidationError::EmptyIngredients)
        ));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_backing_store_is_recoverable() {
        let err: PantryError = StoreError::Timeout { millis: 5 }.into();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = ValidationError::RatingOutOfRange {
            rating: 7.0,
            min: 1.0,
            max: 5.0,
        };
        assert_eq!(err.to_string(), "rating 7 is outside [1, 5]");
    }
}
