use crate::config::completion_api::CompletionApi;

/// Configuration for one model invocation profile.
///
/// # Fields
///
/// - `model`: The model identifier (e.g., `"gpt-3.5-turbo-instruct"`).
/// - `endpoint`: API base URL (e.g., `https://api.openai.com`).
/// - `api_key`: Bearer token for the API.
/// - `api`: completions vs chat completions (ignored for embedding profiles).
/// - `max_tokens`: Maximum number of tokens to generate (if supported).
/// - `temperature`: Controls randomness (0.0 = deterministic).
/// - `top_p`: Nucleus sampling cutoff (alternative to temperature).
/// - `timeout_secs`: Request timeout in seconds.
///
/// # Examples
///
/// ```
/// use ai_llm_service::config::llm_model_config::LlmModelConfig;
/// use ai_llm_service::config::completion_api::CompletionApi;
///
/// let cfg = LlmModelConfig {
///     model: "gpt-3.5-turbo-instruct".to_string(),
///     endpoint: "https://api.openai.com".to_string(),
///     api_key: Some("sk-...".to_string()),
///     api: CompletionApi::Completions,
///     max_tokens: Some(150),
///     temperature: Some(0.0),
///     top_p: None,
///     timeout_secs: Some(60),
/// };
/// assert_eq!(cfg.api, CompletionApi::Completions);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Model identifier string.
    pub model: String,

    /// API base URL.
    pub endpoint: String,

    /// API key for authentication.
    pub api_key: Option<String>,

    /// Endpoint family used by `complete`.
    pub api: CompletionApi,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}
