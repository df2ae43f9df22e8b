//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.
//!
//! # Latent Dimension Invariants
//!
//! The collaborative filter compares user and item vectors by dot product, so the
//! factor count is treated as an invariant of a loaded model:
//!
//! 1. Use [`FactorDims`] to pass the configured factor count through initialization
//! 2. Use [`validate_factor_dim`] at module boundaries to catch mismatches early
//! 3. [`DEFAULT_FACTORS`] remains the default when nothing is configured

use std::time::Duration;

pub const DEFAULT_FACTORS: usize = 50;

/// Length of the zero vector returned for users without trained factors.
pub const DEFAULT_PREDICTION_LEN: usize = 100;

pub const NORMALIZATION_EPSILON: f32 = 1e-8;

pub const DEFAULT_TOP_K: usize = 5;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(DEFAULT_CACHE_TTL_SECS);

pub const DEFAULT_CACHE_TIMEOUT_MS: u64 = 250;

pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

pub const FAVORITE_RECIPES_TOP_K: usize = 5;

pub const DEFAULT_COOKING_SKILL: u8 = 3;
pub const DEFAULT_PORTION_SIZE: u32 = 2;
pub const DEFAULT_COOKING_TIME: u32 = 60;

pub const EQUIPMENT_KEYWORDS: [&str; 7] =
    ["oven", "microwave", "blender", "mixer", "grill", "pan", "pot"];

/// Cook times above this many hours stop adding to difficulty.
pub const MAX_TIME_FACTOR_HOURS: f64 = 2.0;

pub const DIFFICULTY_STEP_WEIGHT: f64 = 0.4;
pub const DIFFICULTY_TIME_WEIGHT: f64 = 0.3;
pub const DIFFICULTY_EQUIPMENT_WEIGHT: f64 = 0.3;

pub const CALORIES_SCALE: f64 = 1000.0;
pub const DAILY_VALUE_SCALE: f64 = 100.0;

/// Number of raw figures in a nutrition row.
pub const NUTRITION_FIELDS: usize = 7;

/// Runtime factor configuration shared by the filter and its snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FactorDims {
    /// Latent vector length.
    pub n_factors: usize,
    /// Length of the fallback prediction vector.
    pub fallback_len: usize,
}

impl Default for FactorDims {
    fn default() -> Self {
        Self {
            n_factors: DEFAULT_FACTORS,
            fallback_len: DEFAULT_PREDICTION_LEN,
        }
    }
}

impl FactorDims {
    pub fn new(n_factors: usize, fallback_len: usize) -> Self {
        Self {
            n_factors,
            fallback_len,
        }
    }

    /// Returns an error if `n_factors` is zero.
    pub fn validate(&self) -> Result<(), DimValidationError> {
        if self.n_factors == 0 {
            return Err(DimValidationError::ZeroDimension);
        }
        Ok(())
    }
}

/// Error returned when dimension validation fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DimValidationError {
    #[error("latent dimension cannot be zero")]
    ZeroDimension,

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Validates that a latent vector length matches the expected factor count.
///
/// # Example
///
/// ```
/// use pantry::constants::{validate_factor_dim, DEFAULT_FACTORS};
///
/// validate_factor_dim(50, DEFAULT_FACTORS).unwrap();
/// assert!(validate_factor_dim(8, DEFAULT_FACTORS).is_err());
/// ```
pub fn validate_factor_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_dims_default() {
        let dims = FactorDims::default();
        assert_eq!(dims.n_factors, DEFAULT_FACTORS);
        assert_eq!(dims.fallback_len, DEFAULT_PREDICTION_LEN);
    }

    #[test]
    fn test_factor_dims_validate_zero() {
        let dims = FactorDims::new(0, 10);
        assert_eq!(dims.validate(), Err(DimValidationError::ZeroDimension));
    }

    #[test]
    fn test_validate_factor_dim_mismatch() {
        assert_eq!(
            validate_factor_dim(8, 50),
            Err(DimValidationError::DimensionMismatch {
                expected: 50,
                actual: 8
            })
        );
    }

    #[test]
    fn test_default_ttl_matches_secs() {
        assert_eq!(DEFAULT_CACHE_TTL.as_secs(), DEFAULT_CACHE_TTL_SECS);
    }

    #[test]
    fn test_error_display() {
        let err = DimValidationError::DimensionMismatch {
            expected: 50,
            actual: 3,
        };
        assert!(err.to_string().contains("50"));
        assert!(err.to_string().contains('3'));
    }
}
