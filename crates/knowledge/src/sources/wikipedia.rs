//! Encyclopedic source backed by the Wikipedia APIs.
//!
//! Two calls per query:
//! 1. `opensearch` on the Action API returns candidate titles, short
//!    descriptions and links as parallel arrays.
//! 2. The REST `page/summary/<title>` endpoint returns the lead extract for
//!    each of the first few candidates.

use crate::sources::http::build_client;
use crate::sources::SourceClient;
use crate::types::{is_substantive, SearchResult};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;
use webask_core::{AppError, AppResult, SearchSettings};

const SOURCE: &str = "wikipedia";

/// One opensearch hit, zipped from the parallel response arrays.
#[derive(Debug, Clone, Default, PartialEq)]
struct Candidate {
    title: String,
    description: String,
    link: String,
}

#[derive(Debug, Default, Deserialize)]
struct PageSummary {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    extract: Option<String>,
    #[serde(default)]
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Default, Deserialize)]
struct ContentUrls {
    #[serde(default)]
    desktop: Option<PageUrls>,
}

#[derive(Debug, Default, Deserialize)]
struct PageUrls {
    #[serde(default)]
    page: Option<String>,
}

impl PageSummary {
    fn desktop_url(&self) -> Option<&str> {
        self.content_urls
            .as_ref()
            .and_then(|urls| urls.desktop.as_ref())
            .and_then(|desktop| desktop.page.as_deref())
            .filter(|page| !page.is_empty())
    }
}

/// Wikipedia search client.
pub struct WikipediaClient {
    settings: SearchSettings,
    client: reqwest::Client,
}

impl WikipediaClient {
    /// Create a client from search settings.
    pub fn new(settings: &SearchSettings) -> AppResult<Self> {
        Ok(Self {
            settings: settings.clone(),
            client: build_client(settings)?,
        })
    }

    async fn open_search(&self, query: &str) -> AppResult<Vec<Candidate>> {
        let limit = self.settings.encyclopedic_candidates.to_string();

        let response = self
            .client
            .get(&self.settings.wikipedia_api_url)
            .query(&[
                ("action", "opensearch"),
                ("search", query),
                ("limit", limit.as_str()),
                ("format", "json"),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::Search(format!("Wikipedia search failed: {}", e)))?;

        let data: Value = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Wikipedia search returned invalid JSON: {}", e)))?;

        Ok(parse_open_search(&data))
    }

    fn summary_url(&self, title: &str) -> AppResult<Url> {
        let mut url = Url::parse(&self.settings.wikipedia_rest_url)
            .map_err(|e| AppError::Search(format!("Invalid Wikipedia REST URL: {}", e)))?;

        url.path_segments_mut()
            .map_err(|_| AppError::Search("Wikipedia REST URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push("page")
            .push("summary")
            .push(&title.replace(' ', "_"));

        Ok(url)
    }

    async fn fetch_summary(&self, title: &str) -> AppResult<PageSummary> {
        let url = self.summary_url(title)?;

        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(self.settings.detail_timeout_secs))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::Search(format!("Wikipedia summary failed: {}", e)))?;

        response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("Wikipedia summary returned invalid JSON: {}", e)))
    }

    /// Turn one candidate into a result, falling back to its description.
    async fn resolve(&self, candidate: &Candidate) -> Option<SearchResult> {
        match self.fetch_summary(&candidate.title).await {
            Ok(summary) => {
                let extract = summary.extract.as_deref().unwrap_or_default();
                if is_substantive(extract, self.settings.min_snippet_chars) {
                    let title = summary
                        .title
                        .as_deref()
                        .filter(|t| !t.trim().is_empty())
                        .unwrap_or(candidate.title.as_str());
                    let link = summary.desktop_url().unwrap_or(candidate.link.as_str());
                    return Some(SearchResult::new(title, extract, link, SOURCE));
                }
                tracing::debug!(title = %candidate.title, "summary extract too short");
            }
            Err(err) => {
                tracing::debug!(title = %candidate.title, error = %err, "summary unavailable");
            }
        }

        candidate_fallback(candidate)
    }
}

#[async_trait::async_trait]
impl SourceClient for WikipediaClient {
    fn name(&self) -> &str {
        SOURCE
    }

    async fn search(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        let candidates = self.open_search(query).await?;
        tracing::debug!(count = candidates.len(), "wikipedia candidates");

        let mut results = Vec::new();
        for candidate in candidates.iter().take(self.settings.encyclopedic_details) {
            if let Some(result) = self.resolve(candidate).await {
                results.push(result);
            }
        }

        Ok(results)
    }
}

/// Zip the `[query, titles, descriptions, links]` opensearch arrays.
///
/// Missing or malformed arrays count as empty; titles drive the length.
fn parse_open_search(data: &Value) -> Vec<Candidate> {
    let titles = string_list(data, 1);
    let descriptions = string_list(data, 2);
    let links = string_list(data, 3);

    titles
        .into_iter()
        .enumerate()
        .filter(|(_, title)| !title.trim().is_empty())
        .map(|(i, title)| Candidate {
            title,
            description: descriptions.get(i).cloned().unwrap_or_default(),
            link: links.get(i).cloned().unwrap_or_default(),
        })
        .collect()
}

fn string_list(data: &Value, index: usize) -> Vec<String> {
    data.get(index)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| item.as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// Result built from the opensearch description alone. Exempt from the
/// substantive length rule, but never empty.
fn candidate_fallback(candidate: &Candidate) -> Option<SearchResult> {
    if candidate.description.trim().is_empty() {
        return None;
    }
    Some(SearchResult::new(
        candidate.title.clone(),
        &candidate.description,
        candidate.link.clone(),
        SOURCE,
    ))
}
