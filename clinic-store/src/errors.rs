//! Unified error types for the crate.

use thiserror::Error;

/// Top-level error for clinic-store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Dataset missing, unreadable, or empty. Fatal during indexing.
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Malformed CSV content.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Embedding provider failure for a single input.
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Mismatch in vector dimensionality across entries.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Every dataset row failed embedding; nothing to index.
    #[error("no valid documents to index")]
    NoValidDocuments,

    /// Qdrant client errors (wrapped).
    #[error("qdrant error: {0}")]
    Qdrant(String),
}
