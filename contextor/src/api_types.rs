//! Public result types re-used by external crates (e.g., the HTTP API layer).

use std::sync::Arc;

use page_store::{EmbeddingsProvider, PageRepository};
use qa_cache::{QaCache, QaCacheEntry};

use crate::llm::AnswerGenerator;

/// Result of one [`AskPipeline::ask`](crate::AskPipeline::ask) call.
///
/// `entry.question` is the normalized question and `entry.answer` the answer
/// that was returned, either fresh or from the cache.
#[derive(Clone, Debug)]
pub struct AskOutcome {
    pub entry: QaCacheEntry,
    /// `true` if no model call was made.
    pub cache_hit: bool,
    /// Sections packed into the prompt; zero on a cache hit.
    pub sections: usize,
}

/// External collaborators of the pipeline.
///
/// # Example
/// ```no_run
/// # use std::sync::Arc;
/// # use contextor::{AskDeps, OpenAiCompletion};
/// # use page_store::{CsvPageRepository, embed::openai::{OpenAiEmbedder, OpenAiEmbedderConfig}};
/// # use qa_cache::InMemoryQaCache;
/// # use ai_llm_service::LlmServiceProfiles;
/// # fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let svc = Arc::new(LlmServiceProfiles::from_env()?);
/// let deps = AskDeps {
///     pages: Arc::new(CsvPageRepository::new("data/pages.csv", "data/embeddings.csv")),
///     embedder: Arc::new(OpenAiEmbedder::new(OpenAiEmbedderConfig { svc: svc.clone(), dim: 1536 })),
///     generator: Arc::new(OpenAiCompletion::new(svc)),
///     cache: Arc::new(InMemoryQaCache::new()),
/// };
/// # let _ = deps; Ok(()) }
/// ```
#[derive(Clone)]
pub struct AskDeps {
    pub pages: Arc<dyn PageRepository>,
    pub embedder: Arc<dyn EmbeddingsProvider>,
    pub generator: Arc<dyn AnswerGenerator>,
    pub cache: Arc<dyn QaCache>,
}
