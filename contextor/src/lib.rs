//! Retrieval-augmented question answering over one book.
//!
//! Public API: [`AskPipeline::ask`]. It normalizes the question, answers
//! repeats from the exact-match cache, and otherwise embeds the question,
//! ranks pages by dot product, packs the best pages into a token budget,
//! builds the prompt, calls the completion model and caches the answer.
//!
//! The building blocks are public for reuse and testing:
//! [`rank`], [`pack`], [`prompt`] and [`question`].

pub mod cfg;
pub mod llm;
pub mod pack;
pub mod prompt;
pub mod question;
pub mod rank;

mod api_types;
mod error;

use std::{sync::Arc, time::Instant};

use page_store::{EmbeddingsProvider, PageRepository};
use qa_cache::{NewQaEntry, QaCache};
use tracing::{debug, info, warn};

pub use api_types::{AskDeps, AskOutcome};
pub use error::ContextorError;
pub use llm::{AnswerGenerator, OpenAiCompletion};

use cfg::ContextorConfig;
use pack::PackConfig;
use prompt::{BuiltPrompt, PromptTemplate};

/// The question-answering use case with its collaborators.
///
/// Cheap to share behind an `Arc`; every call to [`ask`](Self::ask) is an
/// independent sequential chain.
pub struct AskPipeline {
    pages: Arc<dyn PageRepository>,
    embedder: Arc<dyn EmbeddingsProvider>,
    generator: Arc<dyn AnswerGenerator>,
    cache: Arc<dyn QaCache>,
    template: PromptTemplate,
    pack: PackConfig,
    max_question_chars: usize,
}

impl AskPipeline {
    pub fn new(cfg: &ContextorConfig, deps: AskDeps) -> Self {
        Self {
            pages: deps.pages,
            embedder: deps.embedder,
            generator: deps.generator,
            cache: deps.cache,
            template: cfg.prompt_template(),
            pack: cfg.pack.clone(),
            max_question_chars: cfg.max_question_chars,
        }
    }

    /// The page source, for health checks.
    pub fn pages(&self) -> &Arc<dyn PageRepository> {
        &self.pages
    }

    /// The cache key for `raw`: trimmed, ending in `?`, within the length limit.
    pub fn normalize(&self, raw: &str) -> Result<String, ContextorError> {
        question::normalize_question(raw, self.max_question_chars)
    }

    /// Answers `question`, from the cache when it was asked before.
    ///
    /// # Errors
    /// - [`ContextorError::Validation`] for blank or overlong questions
    /// - [`ContextorError::Embedding`] / [`ContextorError::Completion`] when a
    ///   provider fails; nothing is cached in that case
    /// - [`ContextorError::Load`], [`ContextorError::DimensionMismatch`],
    ///   [`ContextorError::Cache`] for data and storage problems
    pub async fn ask(&self, question: &str) -> Result<AskOutcome, ContextorError> {
        let started = Instant::now();
        let question = self.normalize(question)?;

        if let Some(entry) = self.cache.find_and_increment(&question).await? {
            info!(
                id = entry.id,
                ask_count = entry.ask_count,
                latency_ms = started.elapsed().as_millis() as u64,
                "ask: cache hit"
            );
            return Ok(AskOutcome {
                entry,
                cache_hit: true,
                sections: 0,
            });
        }

        let (built, sections) = self.build_prompt(&question).await?;

        debug!(prompt_len = built.prompt.len(), "ask: requesting completion");
        let answer = self.generator.complete(&built.prompt).await?;
        let answer = answer.trim();
        if answer.is_empty() {
            warn!("ask: completion returned an empty answer");
            return Err(ContextorError::Completion("empty answer".into()));
        }

        let entry = self
            .cache
            .insert_or_increment(NewQaEntry {
                question: &question,
                answer,
                context: &built.context,
            })
            .await?;

        info!(
            id = entry.id,
            sections,
            latency_ms = started.elapsed().as_millis() as u64,
            "ask: answered"
        );
        Ok(AskOutcome {
            entry,
            cache_hit: false,
            sections,
        })
    }

    /// Retrieval half of [`ask`](Self::ask): load, embed, rank, pack, render.
    ///
    /// Returns the prompt and the number of packed sections. Never touches the
    /// cache or the completion model.
    pub async fn build_prompt(&self, question: &str) -> Result<(BuiltPrompt, usize), ContextorError> {
        let data = self.pages.load().await.map_err(ContextorError::Load)?;
        debug!(
            pages = data.pages.len(),
            dim = data.embeddings.dimension(),
            "ask: page data loaded"
        );

        let query = self
            .embedder
            .embed(question)
            .await
            .map_err(ContextorError::from_embedding)?;
        debug!(dim = query.len(), "ask: question embedded");

        let ranked = rank::rank(&query, &data.embeddings)?;
        if let Some(top) = ranked.first() {
            debug!(top = %top.identifier, similarity = top.similarity, "ask: ranked");
        }

        let sections = pack::pack(&ranked, &data.pages, &self.pack);
        let built = self.template.build(question, &sections);
        Ok((built, sections.len()))
    }
}

#[cfg(test)]
mod tests {
    use std::{
        future::Future,
        pin::Pin,
        sync::{
            Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use page_store::{
        EmbeddingStore, InMemoryPageRepository, PageData, PageRecord, PageStoreError, PageTable,
    };
    use qa_cache::InMemoryQaCache;

    use super::*;

    struct FakeEmbedder {
        calls: AtomicUsize,
        vector: Vec<f32>,
        fail: bool,
    }

    impl EmbeddingsProvider for FakeEmbedder {
        fn embed<'a>(
            &'a self,
            _text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, PageStoreError>> + Send + 'a>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if self.fail {
                    return Err(PageStoreError::Join("provider down".into()));
                }
                Ok(self.vector.clone())
            })
        }
    }

    struct FakeGenerator {
        calls: AtomicUsize,
        answer: Option<&'static str>,
        last_prompt: Mutex<String>,
    }

    impl AnswerGenerator for FakeGenerator {
        fn complete<'a>(
            &'a self,
            prompt: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String, ContextorError>> + Send + 'a>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                *self.last_prompt.lock().unwrap() = prompt.to_string();
                self.answer
                    .map(str::to_string)
                    .ok_or_else(|| ContextorError::Completion("provider down".into()))
            })
        }
    }

    struct Harness {
        pipeline: AskPipeline,
        embedder: Arc<FakeEmbedder>,
        generator: Arc<FakeGenerator>,
        cache: Arc<InMemoryQaCache>,
    }

    fn book() -> PageData {
        let pages = PageTable::new(vec![
            PageRecord::new("Page 1", "Money buys freedom.", 5),
            PageRecord::new("Page 2", "Happiness is a choice.", 6),
        ])
        .unwrap();
        let embeddings =
            EmbeddingStore::from_entries([("Page 1", vec![1.0, 0.0]), ("Page 2", vec![0.0, 1.0])])
                .unwrap();
        PageData::new(pages, embeddings).unwrap()
    }

    fn harness(
        data: PageData,
        vector: Vec<f32>,
        embed_fails: bool,
        answer: Option<&'static str>,
    ) -> Harness {
        let embedder = Arc::new(FakeEmbedder {
            calls: AtomicUsize::new(0),
            vector,
            fail: embed_fails,
        });
        let generator = Arc::new(FakeGenerator {
            calls: AtomicUsize::new(0),
            answer,
            last_prompt: Mutex::new(String::new()),
        });
        let cache = Arc::new(InMemoryQaCache::new());
        let deps = AskDeps {
            pages: Arc::new(InMemoryPageRepository::new(data)),
            embedder: embedder.clone(),
            generator: generator.clone(),
            cache: cache.clone(),
        };
        Harness {
            pipeline: AskPipeline::new(&ContextorConfig::default(), deps),
            embedder,
            generator,
            cache,
        }
    }

    #[tokio::test]
    async fn repeat_question_is_served_from_cache() {
        let h = harness(book(), vec![1.0, 0.0], false, Some(" Yes, within reason. "));

        let first = h.pipeline.ask("Is money important?").await.unwrap();
        assert!(!first.cache_hit);
        assert_eq!(first.entry.ask_count, 1);
        assert_eq!(first.entry.answer, "Yes, within reason.");
        assert_eq!(first.sections, 2);

        let second = h.pipeline.ask("Is money important?").await.unwrap();
        assert!(second.cache_hit);
        assert_eq!(second.entry.ask_count, 2);
        assert_eq!(second.entry.id, first.entry.id);
        assert_eq!(second.entry.answer, first.entry.answer);

        assert_eq!(h.embedder.calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn normalized_question_is_the_cache_key() {
        let h = harness(book(), vec![1.0, 0.0], false, Some("Yes."));
        let first = h.pipeline.ask("  Is money important ").await.unwrap();
        assert_eq!(first.entry.question, "Is money important?");

        let second = h.pipeline.ask("Is money important?").await.unwrap();
        assert!(second.cache_hit);
        assert_eq!(h.generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn prompt_carries_ranked_context() {
        let h = harness(book(), vec![0.0, 1.0], false, Some("A choice."));
        let out = h.pipeline.ask("What is happiness?").await.unwrap();

        assert_eq!(
            out.entry.context,
            "\n* Happiness is a choice.\n* Money buys freedom."
        );
        let prompt = h.generator.last_prompt.lock().unwrap().clone();
        assert!(prompt.contains(&out.entry.context));
        assert!(prompt.ends_with("\n\n\nQ: What is happiness?\n\nA:"));
    }

    #[tokio::test]
    async fn embedding_failure_leaves_cache_untouched() {
        let h = harness(book(), vec![1.0, 0.0], true, Some("never"));
        let err = h.pipeline.ask("Is money important?").await.unwrap_err();

        assert!(matches!(err, ContextorError::Embedding(_)));
        assert!(err.is_provider_failure());
        assert_eq!(h.generator.calls.load(Ordering::SeqCst), 0);
        assert!(h.cache.is_empty().await);
    }

    #[tokio::test]
    async fn completion_failure_leaves_cache_untouched() {
        let h = harness(book(), vec![1.0, 0.0], false, None);
        let err = h.pipeline.ask("Is money important?").await.unwrap_err();
        assert!(err.is_provider_failure());
        assert!(h.cache.is_empty().await);
    }

    #[tokio::test]
    async fn empty_answer_is_a_completion_error() {
        let h = harness(book(), vec![1.0, 0.0], false, Some("  \n"));
        let err = h.pipeline.ask("Is money important?").await.unwrap_err();
        assert!(matches!(err, ContextorError::Completion(_)));
        assert!(h.cache.is_empty().await);
    }

    #[tokio::test]
    async fn blank_question_is_rejected_before_any_call() {
        let h = harness(book(), vec![1.0, 0.0], false, Some("x"));
        let err = h.pipeline.ask("   ").await.unwrap_err();
        assert!(matches!(err, ContextorError::Validation(_)));
        assert!(!err.is_provider_failure());
        assert_eq!(h.embedder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn query_of_wrong_dimension_fails() {
        let h = harness(book(), vec![1.0, 0.0, 0.0], false, Some("x"));
        let err = h.pipeline.ask("Is money important?").await.unwrap_err();
        assert!(matches!(
            err,
            ContextorError::DimensionMismatch { query: 3, page: 2 }
        ));
        assert_eq!(h.generator.calls.load(Ordering::SeqCst), 0);
        assert!(h.cache.is_empty().await);
    }

    #[tokio::test]
    async fn empty_book_still_produces_a_prompt() {
        let h = harness(PageData::default(), vec![1.0, 0.0], false, Some("No idea."));
        let (built, sections) = h.pipeline.build_prompt("Anything?").await.unwrap();
        assert_eq!(sections, 0);
        assert_eq!(built.context, "");
        assert!(built.prompt.ends_with("\n\n\nQ: Anything?\n\nA:"));
    }
}
