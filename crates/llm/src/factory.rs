//! LLM provider factory.
//!
//! This module creates the generation client matching a
//! [`GenerationBackendConfig`], checking that required secrets are present.

use crate::client::LlmClient;
use crate::error::LlmError;
use crate::providers::{OllamaClient, OpenAiClient};
use crate::types::{GenerationBackendConfig, ProviderType};
use std::sync::Arc;

/// Create an LLM client for the configured backend.
///
/// # Errors
/// Returns [`LlmError::MissingApiKey`] when the hosted backend has no
/// credential, or [`LlmError::Request`] if the HTTP client cannot be built.
pub fn create_client(config: &GenerationBackendConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    tracing::debug!(backend = config.kind.as_str(), endpoint = %config.endpoint, "Creating LLM client");

    match config.kind {
        ProviderType::Local => {
            let client = OllamaClient::with_base_url(&config.endpoint, config.timeout)?;
            Ok(Arc::new(client))
        }
        ProviderType::Hosted => {
            let api_key = config
                .api_key
                .as_deref()
                .ok_or(LlmError::MissingApiKey { provider: "openai" })?;
            let client = OpenAiClient::with_base_url(api_key, &config.endpoint, config.timeout)?;
            Ok(Arc::new(client))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_ollama_client() {
        let client = create_client(&GenerationBackendConfig::local()).unwrap();
        assert_eq!(client.provider_name(), "ollama");
    }

    #[test]
    fn test_create_ollama_with_custom_endpoint() {
        let config = GenerationBackendConfig::local().with_endpoint("http://localhost:8080");
        assert!(create_client(&config).is_ok());
    }

    #[test]
    fn test_create_hosted_client() {
        let client = create_client(&GenerationBackendConfig::hosted("sk-test")).unwrap();
        assert_eq!(client.provider_name(), "openai");
    }

    #[test]
    fn test_hosted_requires_api_key() {
        match create_client(&GenerationBackendConfig::new(ProviderType::Hosted)) {
            Err(err) => assert!(matches!(err, LlmError::MissingApiKey { .. })),
            Ok(_) => panic!("Expected error for hosted backend without API key"),
        }
    }
}
