//! Shared pieces of the `book-qa` and `book-indexer` binaries.

pub mod settings;
pub mod telemetry;
