//! Language model seam.

use async_trait::async_trait;
use sasper_shared::{GeminiClient, LlmError};

/// Turns a prompt into generated text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generates a completion for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        GeminiClient::generate(self, prompt).await
    }
}
