//! Error types for webask.
//!
//! This module defines a unified error enum covering configuration, I/O,
//! generation, search, prompt and serialization failures.

use thiserror::Error;

/// Unified error type for webask.
///
/// Fallible functions return `Result<T, AppError>`. Question-answering itself
/// degrades to descriptive text instead of returning these errors; they surface
/// only for startup problems and inside individual source or backend calls.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generation backend errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Web search source errors
    #[error("Search error: {0}")]
    Search(String),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_display() {
        let err = AppError::Search("wikipedia returned 503".to_string());
        assert_eq!(err.to_string(), "Search error: wikipedia returned 503");
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: AppError = parse_err.into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
