//! Shared HTTP client for the web sources.

use std::time::Duration;
use webask_core::{AppError, AppResult, SearchSettings};

/// Build a [`reqwest::Client`] for source requests.
///
/// The client carries the configured User-Agent (Wikimedia rejects anonymous
/// API clients) and uses the search timeout as its default; individual
/// requests may set a shorter one.
pub fn build_client(settings: &SearchSettings) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(settings.search_timeout_secs))
        .user_agent(settings.user_agent.clone())
        .build()
        .map_err(|e| AppError::Search(format!("failed to build HTTP client: {}", e)))
}
