//! Default model configs loaded from environment variables.
//!
//! Two roles are used by the question-answering service:
//!
//! - **Completion** → turns the assembled prompt into an answer
//! - **Embedding**  → turns page text and questions into vectors
//!
//! # Environment variables
//!
//! - `OPENAI_API_KEY`          = API key (mandatory)
//! - `OPENAI_URL`              = API base (default `https://api.openai.com`)
//! - `COMPLETIONS_MODEL`       = completion model (default `gpt-3.5-turbo-instruct`)
//! - `COMPLETION_API`          = `completions` | `chat` (default `completions`)
//! - `COMPLETION_MAX_TOKENS`   = max generated tokens (default 150)
//! - `COMPLETION_TIMEOUT_SECS` = request timeout (default 60)
//! - `EMBEDDING_MODEL`         = embedding model (default `text-embedding-ada-002`)
//! - `EMBEDDING_TIMEOUT_SECS`  = request timeout (default 30)

use crate::{
    config::{completion_api::CompletionApi, llm_model_config::LlmModelConfig},
    error_handler::{AiLlmError, env_opt_u32, env_opt_u64, env_or, must_env, validate_http_endpoint},
};

pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";
pub const DEFAULT_COMPLETIONS_MODEL: &str = "gpt-3.5-turbo-instruct";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-ada-002";

/// Resolves the OpenAI base URL from `OPENAI_URL`.
///
/// # Errors
/// - [`crate::error_handler::ConfigError::InvalidFormat`] if the scheme is not http/https
fn openai_endpoint() -> Result<String, AiLlmError> {
    let url = env_or("OPENAI_URL", DEFAULT_OPENAI_URL);
    validate_http_endpoint("OPENAI_URL", &url)?;
    Ok(url)
}

/// Constructs the config for the **completion** model.
///
/// # Defaults
/// - `temperature = Some(0.0)`
/// - `max_tokens = Some(150)`
/// - `timeout_secs = Some(60)`
pub fn config_openai_completion() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = openai_endpoint()?;
    let api_key = must_env("OPENAI_API_KEY")?;
    let api = env_or("COMPLETION_API", "completions").parse::<CompletionApi>()?;

    Ok(LlmModelConfig {
        model: env_or("COMPLETIONS_MODEL", DEFAULT_COMPLETIONS_MODEL),
        endpoint,
        api_key: Some(api_key),
        api,
        max_tokens: Some(env_opt_u32("COMPLETION_MAX_TOKENS")?.unwrap_or(150)),
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(env_opt_u64("COMPLETION_TIMEOUT_SECS")?.unwrap_or(60)),
    })
}

/// Constructs the config for the **embedding** model.
///
/// # Defaults
/// - `timeout_secs = Some(30)`
pub fn config_openai_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let endpoint = openai_endpoint()?;
    let api_key = must_env("OPENAI_API_KEY")?;

    Ok(LlmModelConfig {
        model: env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
        endpoint,
        api_key: Some(api_key),
        api: CompletionApi::default(),
        max_tokens: None,
        temperature: None,
        top_p: None,
        timeout_secs: Some(env_opt_u64("EMBEDDING_TIMEOUT_SECS")?.unwrap_or(30)),
    })
}
