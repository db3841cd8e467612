//! Typed error for the contextor crate.

use page_store::PageStoreError;
use qa_cache::QaCacheError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextorError {
    /// The question was rejected before any processing.
    #[error("invalid question: {0}")]
    Validation(String),

    /// Page table or embedding table could not be loaded.
    #[error("failed to load page data: {0}")]
    Load(#[source] PageStoreError),

    /// Query and page vectors have different lengths.
    #[error("embedding dimension mismatch: query has {query}, page has {page}")]
    DimensionMismatch { query: usize, page: usize },

    /// The embedding provider failed for the question.
    #[error("embedding failed: {0}")]
    Embedding(#[source] PageStoreError),

    /// The completion provider failed or returned nothing usable.
    #[error("completion failed: {0}")]
    Completion(String),

    #[error("cache error: {0}")]
    Cache(#[from] QaCacheError),
}

impl ContextorError {
    /// `true` for failures of an external model provider.
    ///
    /// These abort the query without a cache write and are reported to
    /// callers as "no answer" rather than as an internal error.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, Self::Embedding(_) | Self::Completion(_))
    }

    /// Maps an error from the query embedder.
    ///
    /// A provider vector of the wrong width is a dimension problem, not an
    /// outage.
    pub(crate) fn from_embedding(err: PageStoreError) -> Self {
        match err {
            PageStoreError::VectorSizeMismatch { got, want } => Self::DimensionMismatch {
                query: got,
                page: want,
            },
            other => Self::Embedding(other),
        }
    }
}
