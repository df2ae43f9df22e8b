use std::path::PathBuf;

use thiserror::Error;

use crate::constants::DimValidationError;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("latent dimension error: {0}")]
    Dimension(#[from] DimValidationError),

    #[error("latent vector for {kind} '{id}' has length {actual}, expected {expected}")]
    VectorLength {
        kind: &'static str,
        id: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate item id '{id}' in factor snapshot")]
    DuplicateItem { id: String },

    #[error("non-finite value in factor snapshot for '{id}'")]
    NonFinite { id: String },

    #[error("failed to read factor snapshot {path}: {source}")]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed factor snapshot: {0}")]
    SnapshotFormat(#[from] serde_json::Error),
}

pub type FilterResult<T> = Result<T, FilterError>;
