//! OpenAI-compatible hosted provider.
//!
//! Talks to `POST {base_url}/v1/chat/completions` with bearer authentication
//! and a single user message. Any server implementing the Chat Completions
//! shape works.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
use crate::error::LlmError;
use crate::types::ProviderType;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROVIDER: &str = "openai";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<LlmUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Hosted chat-completion client.
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client against the default OpenAI endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_base_url(
            api_key,
            ProviderType::Hosted.default_endpoint(),
            ProviderType::Hosted.default_timeout(),
        )
    }

    /// Create a client against a custom OpenAI-compatible endpoint.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey { provider: PROVIDER });
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Request {
                provider: PROVIDER,
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    fn to_chat_request<'a>(&self, request: &'a LlmRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &request.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
    fn provider_name(&self) -> &str {
        PROVIDER
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        tracing::info!(model = %request.model, "Sending chat completion request");

        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.to_chat_request(request))
            .send()
            .await
            .map_err(|e| LlmError::from_transport(PROVIDER, &self.base_url, e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Status {
                provider: PROVIDER,
                status,
                body,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse {
                provider: PROVIDER,
                message: e.to_string(),
            })?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::MalformedResponse {
                provider: PROVIDER,
                message: "response contained no message content".to_string(),
            })?;

        tracing::info!("Received chat completion");

        Ok(LlmResponse {
            content,
            model: if chat.model.is_empty() {
                request.model.clone()
            } else {
                chat.model
            },
            usage: chat.usage.unwrap_or_default(),
        })
    }
}
