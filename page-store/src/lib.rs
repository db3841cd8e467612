//! Page storage for book question answering.
//!
//! This crate provides:
//! - [`PageTable`] / [`EmbeddingStore`]: the document's pages and page embeddings
//! - CSV readers/writers for both tables ([`io_csv`])
//! - [`PageRepository`]: how the answer pipeline obtains them per query
//! - [`EmbeddingsProvider`]: the embedding seam, with an OpenAI implementation
//! - [`ingest`]: offline splitting of a book export into pages and embeddings

pub mod embed;
pub mod embedding_store;
pub mod errors;
pub mod ingest;
pub mod io_csv;
pub mod progress;
pub mod record;
pub mod repository;
pub mod tokens;

pub use embed::EmbeddingsProvider;
pub use embedding_store::EmbeddingStore;
pub use errors::PageStoreError;
pub use record::{PageRecord, PageTable};
pub use repository::{CsvPageRepository, InMemoryPageRepository, PageData, PageRepository};
