//! Greedy packing of ranked pages into a token-bounded context.

use page_store::PageTable;
use tracing::debug;

use crate::rank::RankedResult;

/// Knobs for [`pack`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackConfig {
    /// Token budget for all sections together.
    pub max_section_tokens: usize,
    /// Marker placed before every section.
    pub separator: String,
    /// Tokens charged for each separator.
    pub separator_tokens: usize,
    /// Stop after the first truncated section instead of continuing.
    pub early_exit: bool,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            max_section_tokens: 1000,
            separator: "\n* ".to_string(),
            separator_tokens: 4,
            early_exit: false,
        }
    }
}

/// One page's contribution to the prompt context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextSection {
    /// Page the text came from.
    pub identifier: String,
    /// Separator followed by the (possibly cut) page content.
    pub text: String,
    pub truncated: bool,
}

/// Walks `ranked` in order and renders sections until the budget is spent.
///
/// Every matched page charges `tokens + separator_tokens`. Once the running
/// total exceeds the budget, the page is cut to
/// `budget - consumed - separator_tokens` characters (see [`legacy_slice`]).
/// Unless `early_exit` is set, later pages are still visited and cut the same
/// way, which usually leaves them empty or nearly so.
///
/// Pages missing from `pages` are skipped. Repeated identifiers are packed
/// again.
pub fn pack(ranked: &[RankedResult], pages: &PageTable, cfg: &PackConfig) -> Vec<ContextSection> {
    let budget = cfg.max_section_tokens as i64;
    let overhead = cfg.separator_tokens as i64;
    let mut consumed: i64 = 0;
    let mut sections = Vec::new();

    for hit in ranked {
        let Some(page) = pages.get(&hit.identifier) else {
            continue;
        };

        consumed += page.tokens as i64 + overhead;

        let (body, truncated) = if consumed > budget {
            let keep = budget - consumed - overhead;
            (legacy_slice(&page.content, keep), true)
        } else {
            (page.content.as_str(), false)
        };

        sections.push(ContextSection {
            identifier: page.title.clone(),
            text: format!("{}{}", cfg.separator, body),
            truncated,
        });

        if truncated && cfg.early_exit {
            break;
        }
    }

    debug!(
        sections = sections.len(),
        consumed_tokens = consumed,
        budget,
        "pack: done"
    );
    sections
}

/// Character slice with signed length.
///
/// `keep >= 0` keeps the first `keep` characters. `keep < 0` drops the last
/// `|keep|` characters, leaving nothing if that is the whole string.
pub fn legacy_slice(s: &str, keep: i64) -> &str {
    let len = s.chars().count();
    let end = if keep >= 0 {
        usize::try_from(keep).unwrap_or(usize::MAX).min(len)
    } else {
        len.saturating_sub(usize::try_from(keep.unsigned_abs()).unwrap_or(usize::MAX))
    };
    match s.char_indices().nth(end) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}
