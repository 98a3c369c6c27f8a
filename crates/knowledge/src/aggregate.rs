//! Multi-source fan-out, deduplication and truncation.
//!
//! All sources are queried concurrently with [`futures::future::join_all`].
//! Outcomes come back in source order, so merged results keep the priority
//! of the source list (encyclopedic first, then instant answers) regardless
//! of which request finished first.

use crate::sources::{DuckDuckGoClient, SourceClient, WikipediaClient};
use crate::types::SearchResult;
use std::collections::HashSet;
use webask_core::{AppResult, SearchSettings};

/// Queries every source and merges their results.
pub struct Aggregator {
    sources: Vec<Box<dyn SourceClient>>,
    max_results: usize,
}

impl Aggregator {
    /// Aggregate over `sources` in priority order.
    pub fn new(sources: Vec<Box<dyn SourceClient>>, max_results: usize) -> Self {
        Self {
            sources,
            max_results,
        }
    }

    /// The default source list: Wikipedia, then DuckDuckGo.
    pub fn from_settings(settings: &SearchSettings) -> AppResult<Self> {
        let sources: Vec<Box<dyn SourceClient>> = vec![
            Box::new(WikipediaClient::new(settings)?),
            Box::new(DuckDuckGoClient::new(settings)?),
        ];
        Ok(Self::new(sources, settings.max_results))
    }

    /// Names of the configured sources, in priority order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Query all sources and return at most `max_results` unique results.
    ///
    /// Never fails: a source that errors contributes nothing.
    pub async fn aggregate(&self, query: &str) -> Vec<SearchResult> {
        let fetches = self.sources.iter().map(|source| source.fetch(query));
        let per_source = futures::future::join_all(fetches).await;

        let total: usize = per_source.iter().map(Vec::len).sum();
        let merged = merge_results(per_source.into_iter().flatten(), self.max_results);

        tracing::info!(
            sources = self.sources.len(),
            candidates = total,
            kept = merged.len(),
            "aggregated search results"
        );

        merged
    }
}

/// Keep the first result per normalized title, dropping empty snippets,
/// until `max_results` are collected.
pub fn merge_results(
    results: impl IntoIterator<Item = SearchResult>,
    max_results: usize,
) -> Vec<SearchResult> {
    let mut seen = HashSet::new();
    let mut merged = Vec::new();

    for result in results {
        if merged.len() >= max_results {
            break;
        }
        if result.snippet.trim().is_empty() {
            continue;
        }
        if seen.insert(result.dedup_key()) {
            merged.push(result);
        } else {
            tracing::debug!(title = %result.title, source = %result.source, "dropping duplicate");
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use webask_core::AppError;

    struct FixedSource {
        name: &'static str,
        results: Vec<SearchResult>,
        delay: Duration,
    }

    impl FixedSource {
        fn boxed(name: &'static str, titles: &[&str], delay_ms: u64) -> Box<dyn SourceClient> {
            Box::new(Self {
                name,
                results: titles
                    .iter()
                    .map(|t| SearchResult::new(*t, format!("Snippet about {}", t), "", name))
                    .collect(),
                delay: Duration::from_millis(delay_ms),
            })
        }
    }

    #[async_trait::async_trait]
    impl SourceClient for FixedSource {
        fn name(&self) -> &str {
            self.name
        }

        async fn search(&self, _query: &str) -> AppResult<Vec<SearchResult>> {
            tokio::time::sleep(self.delay).await;
            Ok(self.results.clone())
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl SourceClient for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn search(&self, _query: &str) -> AppResult<Vec<SearchResult>> {
            Err(AppError::Search("timed out".to_string()))
        }
    }

    fn titles(results: &[SearchResult]) -> Vec<&str> {
        results.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn merge_dedups_case_insensitively_keeping_first() {
        let results = vec![
            SearchResult::new("Photosynthesis", "From the encyclopedia", "", "wikipedia"),
            SearchResult::new(" photosynthesis ", "From instant answers", "", "duckduckgo"),
            SearchResult::new("Chlorophyll", "Green pigment", "", "duckduckgo"),
        ];

        let merged = merge_results(results, 5);
        assert_eq!(titles(&merged), vec!["Photosynthesis", "Chlorophyll"]);
        assert_eq!(merged[0].snippet, "From the encyclopedia");
    }

    #[test]
    fn merge_drops_empty_snippets() {
        let results = vec![
            SearchResult::new("Blank", "   ", "", "test"),
            SearchResult::new("Blank", "Now with content", "", "test"),
        ];
        let merged = merge_results(results, 5);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].snippet, "Now with content");
    }

    #[test]
    fn merge_truncates_to_max_results() {
        let results = (0..8).map(|i| SearchResult::new(format!("Title {}", i), "text", "", "test"));
        let merged = merge_results(results, 5);
        assert_eq!(merged.len(), 5);
        assert_eq!(merged[4].title, "Title 4");
    }

    #[tokio::test]
    async fn aggregate_preserves_source_priority() {
        // The first source answers last; its results must still come first
        let aggregator = Aggregator::new(
            vec![
                FixedSource::boxed("slow", &["A", "B", "C"], 50),
                FixedSource::boxed("fast", &["b", "D", "E", "F"], 0),
            ],
            5,
        );

        let results = aggregator.aggregate("query").await;
        assert_eq!(titles(&results), vec!["A", "B", "C", "D", "E"]);
    }

    #[tokio::test]
    async fn aggregate_survives_failing_source() {
        let sources: Vec<Box<dyn SourceClient>> = vec![
            Box::new(FailingSource),
            FixedSource::boxed("fixed", &["Telephone"], 0),
        ];
        let aggregator = Aggregator::new(sources, 5);

        let results = aggregator.aggregate("Who invented the telephone?").await;
        assert_eq!(titles(&results), vec!["Telephone"]);
        assert_eq!(aggregator.source_names(), vec!["failing", "fixed"]);
    }

    #[tokio::test]
    async fn aggregate_all_sources_failing_is_empty() {
        let sources: Vec<Box<dyn SourceClient>> = vec![Box::new(FailingSource), Box::new(FailingSource)];
        let aggregator = Aggregator::new(sources, 5);
        assert!(aggregator.aggregate("anything").await.is_empty());
    }

    #[test]
    fn from_settings_orders_wikipedia_first() {
        let aggregator = Aggregator::from_settings(&SearchSettings::default()).unwrap();
        assert_eq!(aggregator.source_names(), vec!["wikipedia", "duckduckgo"]);
    }
}
