//! Fakes shared by handler tests.

use std::{
    future::Future,
    pin::Pin,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::response::Response;
use contextor::{AnswerGenerator, AskDeps, AskPipeline, ContextorError, cfg::ContextorConfig};
use page_store::{
    CsvPageRepository, EmbeddingStore, EmbeddingsProvider, InMemoryPageRepository, PageData,
    PageRecord, PageRepository, PageStoreError, PageTable,
};
use qa_cache::{InMemoryQaCache, QaCache};

use crate::core::app_state::AppState;

struct FixedEmbedder;

impl EmbeddingsProvider for FixedEmbedder {
    fn embed<'a>(
        &'a self,
        _text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, PageStoreError>> + Send + 'a>> {
        Box::pin(async { Ok(vec![1.0, 0.0]) })
    }
}

struct CountingGenerator {
    calls: AtomicUsize,
    answer: Option<&'static str>,
}

impl AnswerGenerator for CountingGenerator {
    fn complete<'a>(
        &'a self,
        _prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ContextorError>> + Send + 'a>> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer
                .map(str::to_string)
                .ok_or_else(|| ContextorError::Completion("provider down".into()))
        })
    }
}

pub(crate) struct Fakes {
    generator: Arc<CountingGenerator>,
    cache: Arc<InMemoryQaCache>,
    state: Arc<AppState>,
}

impl Fakes {
    /// Two-page book; `answer = None` makes every completion fail.
    pub(crate) fn new(answer: Option<&'static str>) -> Self {
        let pages = PageTable::new(vec![
            PageRecord::new("Page 1", "Money buys time.", 4),
            PageRecord::new("Page 2", "Time is all we have.", 6),
        ])
        .unwrap();
        let embeddings =
            EmbeddingStore::from_entries([("Page 1", vec![1.0, 0.0]), ("Page 2", vec![0.0, 1.0])])
                .unwrap();
        let repo = InMemoryPageRepository::new(PageData::new(pages, embeddings).unwrap());
        Self::build(Arc::new(repo), answer)
    }

    /// Page repository pointing at files that do not exist.
    pub(crate) fn with_broken_pages(answer: Option<&'static str>) -> Self {
        let repo = CsvPageRepository::new("/nonexistent/pages.csv", "/nonexistent/embeddings.csv");
        Self::build(Arc::new(repo), answer)
    }

    fn build(pages: Arc<dyn PageRepository>, answer: Option<&'static str>) -> Self {
        let generator = Arc::new(CountingGenerator {
            calls: AtomicUsize::new(0),
            answer,
        });
        let cache = Arc::new(InMemoryQaCache::new());
        let deps = AskDeps {
            pages,
            embedder: Arc::new(FixedEmbedder),
            generator: generator.clone(),
            cache: cache.clone(),
        };
        let pipeline = AskPipeline::new(&ContextorConfig::default(), deps);
        Self {
            generator,
            cache,
            state: Arc::new(AppState::new(Arc::new(pipeline))),
        }
    }

    pub(crate) fn state(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub(crate) fn completions(&self) -> usize {
        self.generator.calls.load(Ordering::SeqCst)
    }

    /// Zero when the question is not cached.
    pub(crate) async fn ask_count(&self, question: &str) -> u64 {
        self.cache
            .get(question)
            .await
            .unwrap()
            .map_or(0, |e| e.ask_count)
    }
}

pub(crate) async fn body_json(resp: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
