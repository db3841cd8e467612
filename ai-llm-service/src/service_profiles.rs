//! Shared LLM service with two profiles: `completion` and `embedding`.
//!
//! - Lives in the same Tokio runtime as the application.
//! - Construct once, wrap in `Arc`, and pass clones to dependents.
//! - Each profile owns its own HTTP client, so timeouts are per role.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::service_profiles::LlmServiceProfiles;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let svc = Arc::new(LlmServiceProfiles::from_env()?);
//!
//!     let emb = svc.embed("Ferris").await?;
//!     println!("Embedding dim = {}", emb.len());
//!
//!     let txt = svc.complete("Q: What is Rust?\n\nA:").await?;
//!     println!("Answer: {}", txt);
//!     Ok(())
//! }
//! ```

use crate::{
    config::{
        default_config::{config_openai_completion, config_openai_embedding},
        llm_model_config::LlmModelConfig,
    },
    error_handler::AiLlmError,
    services::open_ai_service::OpenAiService,
};

/// Shared service that manages the **completion** and **embedding** profiles.
#[derive(Debug)]
pub struct LlmServiceProfiles {
    completion: OpenAiService,
    embedding: OpenAiService,
}

impl LlmServiceProfiles {
    /// Creates a new service from explicit profile configs.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if either client cannot be constructed.
    pub fn new(
        completion: LlmModelConfig,
        embedding: LlmModelConfig,
    ) -> Result<Self, AiLlmError> {
        Ok(Self {
            completion: OpenAiService::new(completion)?,
            embedding: OpenAiService::new(embedding)?,
        })
    }

    /// Creates the service from environment variables
    /// (see [`crate::config::default_config`]).
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::new(config_openai_completion()?, config_openai_embedding()?)
    }

    /// Generates text for `prompt` using the **completion** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if generation fails or times out.
    pub async fn complete(&self, prompt: &str) -> Result<String, AiLlmError> {
        self.completion.complete(prompt).await
    }

    /// Computes an embedding using the **embedding** profile.
    ///
    /// # Errors
    /// Returns [`AiLlmError`] if embedding fails or times out.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        self.embedding.embeddings(input).await
    }
}
