//! Unified error types for the crate.

use ai_llm_service::AiLlmError;
use thiserror::Error;

/// Top-level error for page-store operations.
///
/// Every variant except [`PageStoreError::Embedding`] describes a data source
/// that could not be loaded or is internally inconsistent.
#[derive(Debug, Error)]
pub enum PageStoreError {
    /// I/O or filesystem errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV syntax errors, ragged rows, or cells that do not deserialize.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("{table} table is missing column `{column}`")]
    MissingColumn { table: &'static str, column: String },

    /// Header row contains a column we cannot interpret.
    #[error("{table} table has invalid header: {reason}")]
    InvalidHeader { table: &'static str, reason: String },

    /// A data row failed to parse.
    #[error("{table} table line {line}: {reason}")]
    InvalidRow {
        table: &'static str,
        line: u64,
        reason: String,
    },

    /// The same page identifier appears twice.
    #[error("duplicate page identifier: {0}")]
    DuplicateTitle(String),

    /// A page in the page table has no embedding.
    #[error("page `{0}` has no embedding")]
    MissingEmbedding(String),

    /// Mismatch in vector dimensionality.
    #[error("vector size mismatch: got {got}, want {want}")]
    VectorSizeMismatch { got: usize, want: usize },

    /// Embedding provider failed.
    #[error("embedding provider error: {0}")]
    Embedding(#[from] AiLlmError),

    /// A blocking loader task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Join(String),
}
