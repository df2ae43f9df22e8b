use thiserror::Error;

use crate::error::ValidationError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("scoring computation failed: {reason}")]
    ComputationFailed { reason: String },
}
