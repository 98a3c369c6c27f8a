//! Configuration management for webask.
//!
//! Configuration is layered, lowest precedence first:
//! - Built-in defaults
//! - An optional YAML config file (`--config` or `WEBASK_CONFIG`)
//! - Environment variables
//! - Command-line flags
//!
//! Nothing is ever written back to disk; the resolved configuration is
//! immutable for the lifetime of the process.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default local (Ollama) endpoint.
pub const DEFAULT_LOCAL_ENDPOINT: &str = "http://localhost:11434";

/// Default hosted (OpenAI-compatible) endpoint.
pub const DEFAULT_HOSTED_ENDPOINT: &str = "https://api.openai.com";

/// Environment variable consulted for the hosted API key when nothing else is set.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Generation backend ("local" or "hosted"; "ollama" and "openai" are aliases)
    pub provider: String,

    /// Model override; falls back to the provider config, then the backend default
    pub model: Option<String>,

    /// Endpoint override for the generation backend
    pub endpoint: Option<String>,

    /// API key for the hosted backend
    pub api_key: Option<String>,

    /// Sampling temperature sent to the backend
    pub temperature: f32,

    /// Output token cap sent to the backend
    pub max_tokens: u32,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Provider configurations from the config file
    pub llm: Option<LlmConfig>,

    /// Retrieval heuristics and source endpoints
    pub search: SearchSettings,

    /// Optional YAML prompt definition overriding the built-in template
    pub prompt_file: Option<PathBuf>,
}

/// LLM configuration from config.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(rename = "activeProvider")]
    pub active_provider: String,

    #[serde(default)]
    pub temperature: Option<f32>,

    #[serde(rename = "maxTokens", default)]
    pub max_tokens: Option<u32>,

    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Provider-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderConfig {
    Hosted {
        #[serde(rename = "apiKeyEnv")]
        api_key_env: String,
        model: Option<String>,
        endpoint: Option<String>,
        timeout: Option<u64>,
    },
    Local {
        endpoint: Option<String>,
        model: Option<String>,
        timeout: Option<u64>,
    },
}

impl ProviderConfig {
    /// Configured model, if any.
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::Hosted { model, .. } | Self::Local { model, .. } => model.as_deref(),
        }
    }

    /// Configured endpoint, if any.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Hosted { endpoint, .. } | Self::Local { endpoint, .. } => endpoint.as_deref(),
        }
    }

    /// Configured request timeout in seconds, if any.
    pub fn timeout(&self) -> Option<u64> {
        match self {
            Self::Hosted { timeout, .. } | Self::Local { timeout, .. } => *timeout,
        }
    }
}

/// Retrieval heuristics and source endpoints.
///
/// The thresholds and caps are empirical; they are kept configurable rather
/// than derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchSettings {
    /// A snippet must be longer than this many characters (after trimming)
    pub min_snippet_chars: usize,

    /// Maximum number of results kept after deduplication
    pub max_results: usize,

    /// Candidate titles requested from the encyclopedic open search
    pub encyclopedic_candidates: usize,

    /// Candidates for which a summary is fetched
    pub encyclopedic_details: usize,

    /// Related topics considered from the instant-answer source
    pub instant_answer_topics: usize,

    /// Related-topic titles longer than this are truncated with "..."
    pub topic_title_chars: usize,

    /// Timeout for search-style calls
    pub search_timeout_secs: u64,

    /// Timeout for each encyclopedic summary call
    pub detail_timeout_secs: u64,

    /// User-Agent sent to the search sources
    pub user_agent: String,

    /// Wikipedia action API (opensearch)
    pub wikipedia_api_url: String,

    /// Wikipedia REST API root (page summaries)
    pub wikipedia_rest_url: String,

    /// DuckDuckGo instant answer API
    pub duckduckgo_url: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_snippet_chars: 50,
            max_results: 5,
            encyclopedic_candidates: 5,
            encyclopedic_details: 3,
            instant_answer_topics: 4,
            topic_title_chars: 80,
            search_timeout_secs: 10,
            detail_timeout_secs: 5,
            user_agent: concat!("webask/", env!("CARGO_PKG_VERSION")).to_string(),
            wikipedia_api_url: "https://en.wikipedia.org/w/api.php".to_string(),
            wikipedia_rest_url: "https://en.wikipedia.org/api/rest_v1".to_string(),
            duckduckgo_url: "https://api.duckduckgo.com/".to_string(),
        }
    }
}

impl SearchSettings {
    /// Reject limits that would make retrieval meaningless.
    pub fn validate(&self) -> AppResult<()> {
        if self.max_results == 0 {
            return Err(AppError::Config("search.maxResults must be at least 1".to_string()));
        }
        if self.encyclopedic_details > self.encyclopedic_candidates {
            return Err(AppError::Config(format!(
                "search.encyclopedicDetails ({}) cannot exceed search.encyclopedicCandidates ({})",
                self.encyclopedic_details, self.encyclopedic_candidates
            )));
        }
        if self.search_timeout_secs == 0 || self.detail_timeout_secs == 0 {
            return Err(AppError::Config("search timeouts must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmConfig>,
    search: Option<SearchSettings>,
    prompt: Option<PromptFileConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PromptFileConfig {
    file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            provider: "local".to_string(), // Local-first default
            model: None,
            endpoint: None,
            api_key: None,
            temperature: 0.7,
            max_tokens: 500,
            log_level: None,
            verbose: false,
            no_color: false,
            llm: None,
            search: SearchSettings::default(),
            prompt_file: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional YAML file and the environment.
    ///
    /// `config_file` (from `--config`) takes precedence over `WEBASK_CONFIG`.
    ///
    /// Environment variables:
    /// - `WEBASK_CONFIG`: Path to config file
    /// - `WEBASK_BACKEND`: Generation backend
    /// - `WEBASK_MODEL`: Model identifier
    /// - `WEBASK_ENDPOINT`: Backend endpoint
    /// - `WEBASK_API_KEY`: API key for the hosted backend
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use webask_core::config::AppConfig;
    ///
    /// let config = AppConfig::load(None).expect("Failed to load config");
    /// println!("Backend: {}", config.provider);
    /// ```
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let mut config = Self::default();

        config.config_file = config_file
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("WEBASK_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = config.config_file.clone() {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "Config file does not exist: {:?}",
                    path
                )));
            }
            config = config.merge_yaml(&path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("WEBASK_BACKEND") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("WEBASK_MODEL") {
            config.model = Some(model);
        }

        if let Ok(endpoint) = std::env::var("WEBASK_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        if let Ok(key) = std::env::var("WEBASK_API_KEY") {
            config.api_key = Some(key);
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(search) = config_file.search {
            result.search = search;
        }

        if let Some(prompt) = config_file.prompt {
            // Relative prompt paths resolve against the config file's directory
            result.prompt_file = prompt.file.map(|file| match path.parent() {
                Some(dir) if file.is_relative() => dir.join(file),
                _ => file,
            });
        }

        if let Some(llm) = config_file.llm {
            result.provider = llm.active_provider.clone();
            if let Some(temperature) = llm.temperature {
                result.temperature = temperature;
            }
            if let Some(max_tokens) = llm.max_tokens {
                result.max_tokens = max_tokens;
            }
            result.llm = Some(llm);
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over the config file and environment.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        provider: Option<String>,
        model: Option<String>,
        endpoint: Option<String>,
        api_key: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = Some(model);
        }

        if let Some(endpoint) = endpoint {
            self.endpoint = Some(endpoint);
        }

        if let Some(api_key) = api_key {
            self.api_key = Some(api_key);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the configuration entry for a provider, if the config file declared one.
    pub fn get_provider_config(&self, provider: &str) -> Option<&ProviderConfig> {
        self.llm.as_ref().and_then(|llm| llm.providers.get(provider))
    }

    /// Whether the active backend is the hosted one.
    pub fn is_hosted(&self) -> bool {
        matches!(self.provider.to_lowercase().as_str(), "hosted" | "openai")
    }

    /// Resolve the model: CLI/env override, then provider config.
    pub fn resolve_model(&self) -> Option<String> {
        self.model.clone().or_else(|| {
            self.get_provider_config(&self.provider)
                .and_then(ProviderConfig::model)
                .map(str::to_string)
        })
    }

    /// Resolve the endpoint: CLI/env override, then provider config.
    pub fn resolve_endpoint(&self) -> Option<String> {
        self.endpoint.clone().or_else(|| {
            self.get_provider_config(&self.provider)
                .and_then(ProviderConfig::endpoint)
                .map(str::to_string)
        })
    }

    /// Resolve the backend timeout configured for the active provider.
    pub fn resolve_timeout(&self) -> Option<u64> {
        self.get_provider_config(&self.provider)
            .and_then(ProviderConfig::timeout)
    }

    /// Resolve the API key for the active provider.
    ///
    /// Order: explicit key (flag or `WEBASK_API_KEY`), the provider's
    /// `apiKeyEnv`, then `OPENAI_API_KEY`.
    pub fn resolve_api_key(&self) -> Option<String> {
        if let Some(ref key) = self.api_key {
            return Some(key.clone());
        }

        let configured_env = match self.get_provider_config(&self.provider) {
            Some(ProviderConfig::Hosted { api_key_env, .. }) => Some(api_key_env.as_str()),
            _ => None,
        };

        configured_env
            .into_iter()
            .chain(std::iter::once(DEFAULT_API_KEY_ENV))
            .find_map(|var| std::env::var(var).ok().filter(|key| !key.trim().is_empty()))
    }

    /// Validate configuration for the active provider.
    pub fn validate(&self) -> AppResult<()> {
        let known_providers = ["local", "ollama", "hosted", "openai"];

        if !known_providers.contains(&self.provider.to_lowercase().as_str()) {
            return Err(AppError::Config(format!(
                "Unknown backend: {}. Supported: {}",
                self.provider,
                known_providers.join(", ")
            )));
        }

        if self.max_tokens == 0 {
            return Err(AppError::Config("llm.maxTokens must be at least 1".to_string()));
        }

        self.search.validate()
    }

    /// Check that the active backend can be called.
    ///
    /// Only commands that generate answers need this; retrieval alone
    /// works without credentials.
    pub fn validate_credentials(&self) -> AppResult<()> {
        if self.is_hosted() && self.resolve_api_key().is_none() {
            return Err(AppError::Config(format!(
                "The hosted backend requires an API key (--api-key, WEBASK_API_KEY or {})",
                DEFAULT_API_KEY_ENV
            )));
        }
        Ok(())
    }
}
