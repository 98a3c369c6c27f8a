//! Prompt-to-text generation that never fails.

use crate::client::{LlmClient, LlmRequest};
use crate::error::LlmError;
use crate::factory::create_client;
use crate::types::GenerationBackendConfig;
use std::sync::Arc;

/// Sends prompts to one backend with fixed generation options.
///
/// `generate` turns every backend failure into the text returned by
/// [`LlmError::user_message`], so callers always get something to display.
pub struct Generator {
    client: Arc<dyn LlmClient>,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl Generator {
    /// Wrap an existing client, taking generation options from `config`.
    pub fn new(client: Arc<dyn LlmClient>, config: &GenerationBackendConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Build the backend client described by `config` and wrap it.
    pub fn from_config(config: &GenerationBackendConfig) -> Result<Self, LlmError> {
        Ok(Self::new(create_client(config)?, config))
    }

    /// Name of the wrapped provider.
    pub fn provider_name(&self) -> &str {
        self.client.provider_name()
    }

    /// Generate text, surfacing the classified failure.
    pub async fn try_generate(&self, prompt: &str) -> Result<String, LlmError> {
        let request = LlmRequest::new(prompt, &self.model)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);

        let response = self.client.complete(&request).await?;

        tracing::debug!(
            "Token usage - Prompt: {}, Completion: {}, Total: {}",
            response.usage.prompt_tokens,
            response.usage.completion_tokens,
            response.usage.total_tokens
        );

        Ok(response.content)
    }

    /// Generate text; failures become user-facing text instead of errors.
    pub async fn generate(&self, prompt: &str) -> String {
        match self.try_generate(prompt).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(provider = self.provider_name(), error = %err, "Generation failed");
                err.user_message()
            }
        }
    }
}
