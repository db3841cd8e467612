//! Offline ingestion: split a text export of the book into pages and embed them.
//!
//! Input is plain text with one form feed (`\f`) between pages, which is what
//! common PDF-to-text tools emit. Pages are named `"Page N"` after their
//! 1-based position in the export, including skipped pages, so identifiers
//! stay stable when the ceiling changes.

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::{
    embed::EmbeddingsProvider,
    embedding_store::EmbeddingStore,
    errors::PageStoreError,
    progress::Progress,
    record::{PageRecord, PageTable},
    tokens::estimate_tokens,
};

/// Embedding models accept at most this many tokens per input.
pub const EMBEDDING_INPUT_LIMIT: usize = 8191;

/// Default per-page token ceiling: the input limit minus a small margin.
pub const DEFAULT_MAX_PAGE_TOKENS: usize = EMBEDDING_INPUT_LIMIT - 4;

const PAGE_BREAK: char = '\u{000C}';

/// A page left out of the page table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedPage {
    pub title: String,
    pub reason: SkipReason,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// No text after whitespace normalization.
    Blank,
    /// More tokens than the configured ceiling.
    TooLong { tokens: usize },
}

/// Result of splitting an export into pages.
#[derive(Debug)]
pub struct SplitPages {
    pub pages: PageTable,
    pub skipped: Vec<SkippedPage>,
}

/// Splits `text` on form feeds into pages with collapsed whitespace and token counts.
///
/// A trailing form feed does not produce an extra page.
pub fn split_pages(text: &str, max_page_tokens: usize) -> Result<SplitPages, PageStoreError> {
    let mut raw: Vec<&str> = text.split(PAGE_BREAK).collect();
    if raw.len() > 1 && raw.last().is_some_and(|p| p.trim().is_empty()) {
        raw.pop();
    }

    let mut pages = Vec::new();
    let mut skipped = Vec::new();

    for (i, page) in raw.iter().enumerate() {
        let title = format!("Page {}", i + 1);
        let content = page.split_whitespace().collect::<Vec<_>>().join(" ");

        if content.is_empty() {
            skipped.push(SkippedPage {
                title,
                reason: SkipReason::Blank,
            });
            continue;
        }

        let tokens = estimate_tokens(&content);
        if tokens > max_page_tokens {
            warn!(%title, tokens, max_page_tokens, "page exceeds token ceiling, skipping");
            skipped.push(SkippedPage {
                title,
                reason: SkipReason::TooLong { tokens },
            });
            continue;
        }

        pages.push(PageRecord {
            title,
            content,
            tokens,
        });
    }

    info!(
        "split_pages: kept={} skipped={}",
        pages.len(),
        skipped.len()
    );
    Ok(SplitPages {
        pages: PageTable::new(pages)?,
        skipped,
    })
}

/// Embeds every page with bounded concurrency, preserving page order.
///
/// # Errors
/// - [`PageStoreError::Embedding`] if the provider fails (first failure aborts)
/// - [`PageStoreError::VectorSizeMismatch`] if the provider returns mixed sizes
pub async fn embed_pages(
    pages: &PageTable,
    provider: &dyn EmbeddingsProvider,
    concurrency: usize,
    progress: &dyn Progress,
) -> Result<EmbeddingStore, PageStoreError> {
    info!(
        "embed_pages: total={} concurrency={}",
        pages.len(),
        concurrency
    );
    progress.set_total(pages.len() as u64);

    let mut results = stream::iter(pages.iter())
        .map(|page| async move {
            let v = provider.embed(&page.content).await?;
            Ok::<(&str, Vec<f32>), PageStoreError>((page.title.as_str(), v))
        })
        .buffered(concurrency.max(1));

    let mut store = EmbeddingStore::default();
    while let Some(item) = results.next().await {
        let (title, vector) = item?;
        store.insert(title, vector)?;
        progress.page_done(title);
    }

    debug!(dim = store.dimension(), "embed_pages: done");
    progress.finish("embeddings ready");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use std::{
        future::Future,
        pin::Pin,
        sync::atomic::{AtomicUsize, Ordering},
    };

    use super::*;
    use crate::progress::NoopProgress;

    #[test]
    fn splits_on_form_feed_and_normalizes_whitespace() {
        let text = "First  page\ntext\x0c\x0c Third\tpage \x0c";
        let split = split_pages(text, DEFAULT_MAX_PAGE_TOKENS).unwrap();

        let titles: Vec<_> = split.pages.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Page 1", "Page 3"]);
        assert_eq!(split.pages.get("Page 1").unwrap().content, "First page text");
        assert_eq!(split.pages.get("Page 3").unwrap().tokens, 3);
        assert_eq!(
            split.skipped,
            vec![SkippedPage {
                title: "Page 2".into(),
                reason: SkipReason::Blank
            }]
        );
    }

    #[test]
    fn pages_over_the_ceiling_are_skipped() {
        let text = "short\x0cone two three four five";
        let split = split_pages(text, 3).unwrap();
        assert_eq!(split.pages.len(), 1);
        assert_eq!(
            split.skipped[0].reason,
            SkipReason::TooLong { tokens: 6 }
        );
        assert_eq!(split.skipped[0].title, "Page 2");
    }

    struct LenEmbedder {
        calls: AtomicUsize,
        fail_on: Option<&'static str>,
    }

    impl EmbeddingsProvider for LenEmbedder {
        fn embed<'a>(
            &'a self,
            text: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, PageStoreError>> + Send + 'a>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if self.fail_on == Some(text) {
                    return Err(PageStoreError::VectorSizeMismatch { got: 0, want: 2 });
                }
                Ok(vec![text.len() as f32, 1.0])
            })
        }
    }

    #[tokio::test]
    async fn embeds_in_page_order() {
        let pages = PageTable::new(vec![
            PageRecord::new("Page 1", "a", 1),
            PageRecord::new("Page 2", "bbb", 1),
            PageRecord::new("Page 3", "cc", 1),
        ])
        .unwrap();
        let provider = LenEmbedder {
            calls: AtomicUsize::new(0),
            fail_on: None,
        };

        let store = embed_pages(&pages, &provider, 2, &NoopProgress).await.unwrap();
        let got: Vec<_> = store.iter().map(|(t, v)| (t.to_string(), v[0])).collect();
        assert_eq!(
            got,
            vec![
                ("Page 1".to_string(), 1.0),
                ("Page 2".to_string(), 3.0),
                ("Page 3".to_string(), 2.0)
            ]
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
        assert!(store.validate_against(&pages).is_ok());
    }

    #[tokio::test]
    async fn provider_failure_aborts() {
        let pages = PageTable::new(vec![
            PageRecord::new("Page 1", "a", 1),
            PageRecord::new("Page 2", "boom", 1),
        ])
        .unwrap();
        let provider = LenEmbedder {
            calls: AtomicUsize::new(0),
            fail_on: Some("boom"),
        };
        assert!(embed_pages(&pages, &provider, 1, &NoopProgress).await.is_err());
    }
}
