//! Classified generation failures.
//!
//! Every backend call ends in either generated text or one of these
//! variants. [`LlmError::user_message`] renders the text shown to the user
//! in place of an answer.

use thiserror::Error;
use webask_core::AppError;

/// A generation backend failure.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The backend could not be reached at all (connection refused, DNS, ...).
    #[error("cannot connect to {provider} at {endpoint}")]
    BackendUnreachable {
        provider: &'static str,
        endpoint: String,
    },

    /// The backend answered with a non-2xx status.
    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    /// The backend answered 2xx but the body did not have the expected shape.
    #[error("malformed {provider} response: {message}")]
    MalformedResponse {
        provider: &'static str,
        message: String,
    },

    /// Any other transport failure, including timeouts.
    #[error("{provider} request failed: {message}")]
    Request {
        provider: &'static str,
        message: String,
    },

    /// The hosted backend was configured without a credential.
    #[error("{provider} backend requires an API key")]
    MissingApiKey { provider: &'static str },
}

impl LlmError {
    /// Classify a transport error raised while sending a request.
    pub(crate) fn from_transport(
        provider: &'static str,
        endpoint: &str,
        err: reqwest::Error,
    ) -> Self {
        if err.is_connect() {
            Self::BackendUnreachable {
                provider,
                endpoint: endpoint.to_string(),
            }
        } else if err.is_timeout() {
            Self::Request {
                provider,
                message: "request timed out".to_string(),
            }
        } else {
            Self::Request {
                provider,
                message: err.to_string(),
            }
        }
    }

    /// Whether this failure means the backend is not running or not reachable.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::BackendUnreachable { .. })
    }

    /// Text shown to the user in place of an answer.
    pub fn user_message(&self) -> String {
        match self {
            Self::BackendUnreachable { provider, endpoint } if *provider == "ollama" => format!(
                "Cannot connect to Ollama at {endpoint}: the local backend is not running.\n\n\
                 Please start Ollama:\n\
                 1. Open a new terminal\n\
                 2. Run: ollama serve\n\
                 3. Keep it running\n\
                 4. Ask your question again"
            ),
            Self::BackendUnreachable { provider, endpoint } => format!(
                "Cannot connect to {provider} at {endpoint}. Check your network connection and endpoint setting."
            ),
            Self::Status {
                provider, status, ..
            } => format!("{} error (status {})", display_name(provider), status),
            Self::MissingApiKey { .. } => format!(
                "Error: {self}. Pass --api-key or set WEBASK_API_KEY / OPENAI_API_KEY."
            ),
            _ => format!("Error: {self}"),
        }
    }
}

fn display_name(provider: &str) -> &str {
    match provider {
        "ollama" => "Ollama",
        "openai" => "OpenAI",
        other => other,
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::Llm(err.to_string())
    }
}
