//! Approximate token counting for page budgeting.
//!
//! The counts only need to be in the same ballpark as the model tokenizer:
//! they drive the context budget and the per-page ceiling during ingestion.

use std::sync::LazyLock;

use regex::Regex;

static TOKEN_PIECE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|[^\w\s]").expect("token regex is valid"));

/// Average characters per token for long words in BPE vocabularies.
const CHARS_PER_TOKEN: usize = 4;

/// Estimates the number of model tokens in `text`.
///
/// Each punctuation mark counts as one token; a word counts as one token per
/// started group of four characters.
pub fn estimate_tokens(text: &str) -> usize {
    TOKEN_PIECE
        .find_iter(text)
        .map(|m| m.as_str().chars().count().div_ceil(CHARS_PER_TOKEN))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_words_and_punctuation() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("   \n\t"), 0);
        assert_eq!(estimate_tokens("Is money important?"), 1 + 2 + 3 + 1);
        assert_eq!(estimate_tokens("a, b."), 4);
    }

    #[test]
    fn non_ascii_words_count_by_chars() {
        assert_eq!(estimate_tokens("café"), 1);
    }
}
