//! Generation backend configuration types.

use std::fmt;
use std::time::Duration;
use webask_core::config::{DEFAULT_HOSTED_ENDPOINT, DEFAULT_LOCAL_ENDPOINT};
use webask_core::{AppConfig, AppError, AppResult};

/// Provider type enum for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    /// Local model server (Ollama)
    Local,
    /// Hosted chat-completion API (OpenAI-compatible)
    Hosted,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "local" | "ollama" => Some(Self::Local),
            "hosted" | "openai" => Some(Self::Hosted),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Hosted => "hosted",
        }
    }

    /// Default endpoint for this backend.
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Self::Local => DEFAULT_LOCAL_ENDPOINT,
            Self::Hosted => DEFAULT_HOSTED_ENDPOINT,
        }
    }

    /// Default model for this backend.
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Local => "llama2",
            Self::Hosted => "gpt-3.5-turbo",
        }
    }

    /// Default request timeout. Local inference is slow, so it gets minutes.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Local => Duration::from_secs(180),
            Self::Hosted => Duration::from_secs(30),
        }
    }
}

/// Immutable configuration of one generation backend.
#[derive(Clone)]
pub struct GenerationBackendConfig {
    /// Which backend to talk to
    pub kind: ProviderType,

    /// Base URL of the backend
    pub endpoint: String,

    /// Model identifier
    pub model: String,

    /// Bearer credential; required iff `kind` is `Hosted`
    pub api_key: Option<String>,

    /// Sampling temperature
    pub temperature: f32,

    /// Output token cap
    pub max_tokens: u32,

    /// Per-request timeout
    pub timeout: Duration,
}

impl GenerationBackendConfig {
    /// Create a config for the given backend with its defaults.
    pub fn new(kind: ProviderType) -> Self {
        Self {
            kind,
            endpoint: kind.default_endpoint().to_string(),
            model: kind.default_model().to_string(),
            api_key: None,
            temperature: 0.7,
            max_tokens: 500,
            timeout: kind.default_timeout(),
        }
    }

    /// Local Ollama backend with defaults.
    pub fn local() -> Self {
        Self::new(ProviderType::Local)
    }

    /// Hosted backend with defaults and the given credential.
    pub fn hosted(api_key: impl Into<String>) -> Self {
        Self::new(ProviderType::Hosted).with_api_key(api_key)
    }

    /// Set the endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the backend configuration from the application configuration.
    pub fn from_app_config(config: &AppConfig) -> AppResult<Self> {
        let kind = ProviderType::parse(&config.provider).ok_or_else(|| {
            AppError::Config(format!("Unknown backend: {}", config.provider))
        })?;

        let mut backend = Self::new(kind);

        if let Some(endpoint) = config.resolve_endpoint() {
            backend.endpoint = endpoint;
        }
        if let Some(model) = config.resolve_model() {
            backend.model = model;
        }
        if let Some(timeout) = config.resolve_timeout() {
            backend.timeout = Duration::from_secs(timeout);
        }
        backend.temperature = config.temperature;
        backend.max_tokens = config.max_tokens;

        if kind == ProviderType::Hosted {
            backend.api_key = config.resolve_api_key();
        }

        Ok(backend)
    }
}

impl fmt::Debug for GenerationBackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationBackendConfig")
            .field("kind", &self.kind)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_parsing() {
        assert_eq!(ProviderType::parse("local"), Some(ProviderType::Local));
        assert_eq!(ProviderType::parse("Ollama"), Some(ProviderType::Local));
        assert_eq!(ProviderType::parse("hosted"), Some(ProviderType::Hosted));
        assert_eq!(ProviderType::parse("openai"), Some(ProviderType::Hosted));
        assert_eq!(ProviderType::parse("unknown"), None);
    }

    #[test]
    fn test_backend_defaults() {
        let local = GenerationBackendConfig::local();
        assert_eq!(local.endpoint, "http://localhost:11434");
        assert_eq!(local.model, "llama2");
        assert_eq!(local.temperature, 0.7);
        assert_eq!(local.max_tokens, 500);
        assert_eq!(local.timeout, Duration::from_secs(180));

        let hosted = GenerationBackendConfig::hosted("sk-test");
        assert_eq!(hosted.timeout, Duration::from_secs(30));
        assert_eq!(hosted.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_from_app_config() {
        let config = AppConfig::default().with_overrides(
            Some("hosted".to_string()),
            Some("gpt-4o-mini".to_string()),
            Some("http://proxy.internal".to_string()),
            Some("sk-test".to_string()),
            None,
            false,
            false,
        );

        let backend = GenerationBackendConfig::from_app_config(&config).unwrap();
        assert_eq!(backend.kind, ProviderType::Hosted);
        assert_eq!(backend.model, "gpt-4o-mini");
        assert_eq!(backend.endpoint, "http://proxy.internal");
        assert_eq!(backend.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_from_app_config_unknown_backend() {
        let config = AppConfig {
            provider: "gguf".to_string(),
            ..AppConfig::default()
        };
        assert!(GenerationBackendConfig::from_app_config(&config).is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let backend = GenerationBackendConfig::hosted("sk-secret");
        let debug = format!("{:?}", backend);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
