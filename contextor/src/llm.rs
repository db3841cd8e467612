//! Answer generation seam and its OpenAI-backed implementation.

use std::{future::Future, pin::Pin, sync::Arc};

use ai_llm_service::service_profiles::LlmServiceProfiles;
use tracing::warn;

use crate::error::ContextorError;

/// Turns a finished prompt into an answer.
pub trait AnswerGenerator: Send + Sync {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ContextorError>> + Send + 'a>>;
}

/// [`AnswerGenerator`] over the completion profile of [`LlmServiceProfiles`].
pub struct OpenAiCompletion {
    svc: Arc<LlmServiceProfiles>,
}

impl OpenAiCompletion {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }
}

impl AnswerGenerator for OpenAiCompletion {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ContextorError>> + Send + 'a>> {
        Box::pin(async move {
            self.svc.complete(prompt).await.map_err(|e| {
                warn!(error = %e, "completion request failed");
                ContextorError::Completion(e.to_string())
            })
        })
    }
}
