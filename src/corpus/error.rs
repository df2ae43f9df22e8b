use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a corpus load.
///
/// Faults in individual rows never surface here; they are logged and the row is
/// dropped or defaulted.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read recipe source {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read recipe rows: {0}")]
    Read(#[from] std::io::Error),
}

pub type CorpusResult<T> = Result<T, CorpusError>;
