//! OpenAI embedding provider backed by the shared [`LlmServiceProfiles`].

use std::{future::Future, pin::Pin, sync::Arc};

use ai_llm_service::LlmServiceProfiles;
use tracing::warn;

use crate::{EmbeddingsProvider, PageStoreError};

/// Configuration for the OpenAI embedding backend.
#[derive(Clone, Debug)]
pub struct OpenAiEmbedderConfig {
    pub svc: Arc<LlmServiceProfiles>,
    /// Expected embedding dimension size.
    pub dim: usize,
}

/// OpenAI embedding provider (async).
#[derive(Clone, Debug)]
pub struct OpenAiEmbedder {
    svc: Arc<LlmServiceProfiles>,
    dim: usize,
}

impl OpenAiEmbedder {
    pub fn new(cfg: OpenAiEmbedderConfig) -> Self {
        Self {
            svc: cfg.svc,
            dim: cfg.dim,
        }
    }
}

impl EmbeddingsProvider for OpenAiEmbedder {
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, PageStoreError>> + Send + 'a>> {
        Box::pin(async move {
            let resp = self.svc.embed(text).await?;

            if resp.len() != self.dim {
                warn!(got = resp.len(), want = self.dim, "unexpected embedding size");
                return Err(PageStoreError::VectorSizeMismatch {
                    got: resp.len(),
                    want: self.dim,
                });
            }

            Ok(resp)
        })
    }
}
