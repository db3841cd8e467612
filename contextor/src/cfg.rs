//! Runtime configuration loaded from environment variables.

use ai_llm_service::error_handler::{env_flag, env_or, env_parse_or};

use crate::{pack::PackConfig, prompt::PromptTemplate};

/// Config bag for the ask pipeline. All fields have defaults via `from_env`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextorConfig {
    // Packing knobs
    pub pack: PackConfig,

    // Prompt persona
    pub book_title: String,
    pub book_author: String,

    pub max_question_chars: usize,
}

impl Default for ContextorConfig {
    fn default() -> Self {
        Self {
            pack: PackConfig::default(),
            book_title: "The Book".to_string(),
            book_author: "The author".to_string(),
            max_question_chars: 2000,
        }
    }
}

impl ContextorConfig {
    /// Build from environment variables with defaults for anything unset or unparsable.
    ///
    /// # Example
    /// ```
    /// # use contextor::cfg::ContextorConfig;
    /// let cfg = ContextorConfig::from_env();
    /// assert!(cfg.max_question_chars >= 1);
    /// ```
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            pack: PackConfig {
                max_section_tokens: env_parse_or("MAX_SECTION_TOKENS", d.pack.max_section_tokens),
                separator: std::env::var("SECTION_SEPARATOR")
                    .map_or(d.pack.separator, |v| unescape(&v)),
                separator_tokens: env_parse_or("SEPARATOR_TOKENS", d.pack.separator_tokens),
                early_exit: env_flag("PACK_EARLY_EXIT", d.pack.early_exit),
            },
            book_title: env_or("BOOK_TITLE", &d.book_title),
            book_author: env_or("BOOK_AUTHOR", &d.book_author),
            max_question_chars: env_parse_or("MAX_QUESTION_CHARS", d.max_question_chars).max(1),
        }
    }

    pub fn prompt_template(&self) -> PromptTemplate {
        PromptTemplate::for_book(&self.book_title, &self.book_author)
    }
}

/// `.env` files carry `\n` literally; turn the usual escapes into characters.
fn unescape(s: &str) -> String {
    s.replace("\\n", "\n").replace("\\t", "\t")
}
