use std::{future::Future, pin::Pin};

use crate::errors::PageStoreError;

/// Provider interface for embedding generation.
///
/// Async because real providers (OpenAI, etc.) perform HTTP requests.
/// Implement this trait to plug in another backend or a test double.
pub trait EmbeddingsProvider: Send + Sync {
    /// Embeds a single text.
    fn embed<'a>(
        &'a self,
        text: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, PageStoreError>> + Send + 'a>>;
}

pub mod openai;
