use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Which OpenAI endpoint family is used to turn a prompt into text.
///
/// The prompt format of this service (few-shot `Q:`/`A:` blocks ending in an
/// open `A:` cue) was written for the plain completions endpoint. The chat
/// endpoint is supported for models that are only served there; the whole
/// prompt is then sent as a single user message.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::completion_api::CompletionApi;
///
/// let api: CompletionApi = "chat".parse().unwrap();
/// assert_eq!(api, CompletionApi::Chat);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionApi {
    /// `POST /v1/completions`.
    #[default]
    Completions,
    /// `POST /v1/chat/completions`.
    Chat,
}

impl FromStr for CompletionApi {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "completions" | "completion" | "text" => Ok(CompletionApi::Completions),
            "chat" => Ok(CompletionApi::Chat),
            other => Err(ConfigError::UnsupportedApi(other.to_string())),
        }
    }
}
