//! Access to a document's pages and embeddings.
//!
//! [`PageRepository`] is the seam between the answer pipeline and storage.
//! [`CsvPageRepository`] re-reads both tables on every call, which keeps the
//! server in sync with files rewritten by the indexer. [`InMemoryPageRepository`]
//! serves data loaded once.

use std::{
    future::Future,
    path::PathBuf,
    pin::Pin,
    sync::Arc,
};

use tracing::{debug, info};

use crate::{
    embedding_store::EmbeddingStore,
    errors::PageStoreError,
    io_csv::{read_embeddings_file, read_page_table_file},
    record::PageTable,
};

/// Pages and their embeddings, validated against each other.
#[derive(Clone, Debug, Default)]
pub struct PageData {
    pub pages: PageTable,
    pub embeddings: EmbeddingStore,
}

impl PageData {
    /// Pairs a page table with its embeddings.
    ///
    /// # Errors
    /// Returns [`PageStoreError::MissingEmbedding`] if a page has no embedding.
    pub fn new(pages: PageTable, embeddings: EmbeddingStore) -> Result<Self, PageStoreError> {
        embeddings.validate_against(&pages)?;
        Ok(Self { pages, embeddings })
    }
}

/// Source of [`PageData`] for one query.
pub trait PageRepository: Send + Sync {
    fn load<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Arc<PageData>, PageStoreError>> + Send + 'a>>;
}

/// Reads `pages.csv` and `embeddings.csv` from disk on every [`load`](PageRepository::load).
#[derive(Clone, Debug)]
pub struct CsvPageRepository {
    pages_path: PathBuf,
    embeddings_path: PathBuf,
}

impl CsvPageRepository {
    pub fn new(pages_path: impl Into<PathBuf>, embeddings_path: impl Into<PathBuf>) -> Self {
        Self {
            pages_path: pages_path.into(),
            embeddings_path: embeddings_path.into(),
        }
    }

    /// Loads both tables on a blocking thread.
    pub async fn load_now(&self) -> Result<PageData, PageStoreError> {
        let pages_path = self.pages_path.clone();
        let embeddings_path = self.embeddings_path.clone();

        let data = tokio::task::spawn_blocking(move || {
            let pages = read_page_table_file(&pages_path)?;
            let embeddings = read_embeddings_file(&embeddings_path)?;
            PageData::new(pages, embeddings)
        })
        .await
        .map_err(|e| PageStoreError::Join(e.to_string()))??;

        debug!(
            pages = data.pages.len(),
            dim = data.embeddings.dimension(),
            "page data loaded"
        );
        Ok(data)
    }
}

impl PageRepository for CsvPageRepository {
    fn load<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Arc<PageData>, PageStoreError>> + Send + 'a>> {
        Box::pin(async move { self.load_now().await.map(Arc::new) })
    }
}

/// Serves the same preloaded [`PageData`] to every query.
#[derive(Clone, Debug)]
pub struct InMemoryPageRepository {
    data: Arc<PageData>,
}

impl InMemoryPageRepository {
    pub fn new(data: PageData) -> Self {
        Self {
            data: Arc::new(data),
        }
    }

    /// Loads the CSV tables once and keeps them in memory.
    pub async fn preload(csv: &CsvPageRepository) -> Result<Self, PageStoreError> {
        let data = csv.load_now().await?;
        info!(
            pages = data.pages.len(),
            dim = data.embeddings.dimension(),
            "page data preloaded"
        );
        Ok(Self::new(data))
    }
}

impl PageRepository for InMemoryPageRepository {
    fn load<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Arc<PageData>, PageStoreError>> + Send + 'a>> {
        let data = Arc::clone(&self.data);
        Box::pin(async move { Ok(data) })
    }
}
