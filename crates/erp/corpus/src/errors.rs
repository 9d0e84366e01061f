use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors from serializing or writing fixture batches.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The batch could not be converted to or from JSON.
    #[error("batch json: {0}")]
    Json(#[from] serde_json::Error),

    /// The batch file could not be written.
    #[error("write batch to {}: {source}", .path.display())]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Wrapper result type.
pub type CorpusResult<T> = Result<T, CorpusError>;
