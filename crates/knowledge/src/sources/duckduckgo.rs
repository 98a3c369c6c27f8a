//! Instant-answer source backed by the DuckDuckGo API.
//!
//! The response is loosely shaped: fields may be missing, empty or of an
//! unexpected type, and `RelatedTopics` mixes plain topics with category
//! groups. Parsing therefore walks a [`serde_json::Value`] and skips anything
//! it does not recognise instead of failing.

use crate::sources::http::build_client;
use crate::sources::SourceClient;
use crate::types::{is_substantive, SearchResult};
use serde_json::Value;
use webask_core::{AppError, AppResult, SearchSettings};

const SOURCE: &str = "duckduckgo";

/// Title used for the abstract when the response has no heading.
const ABSTRACT_FALLBACK_TITLE: &str = "Main Answer";

/// DuckDuckGo instant-answer client.
pub struct DuckDuckGoClient {
    settings: SearchSettings,
    client: reqwest::Client,
}

impl DuckDuckGoClient {
    /// Create a client from search settings.
    pub fn new(settings: &SearchSettings) -> AppResult<Self> {
        Ok(Self {
            settings: settings.clone(),
            client: build_client(settings)?,
        })
    }
}

#[async_trait::async_trait]
impl SourceClient for DuckDuckGoClient {
    fn name(&self) -> &str {
        SOURCE
    }

    async fn search(&self, query: &str) -> AppResult<Vec<SearchResult>> {
        let response = self
            .client
            .get(&self.settings.duckduckgo_url)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::Search(format!("DuckDuckGo search failed: {}", e)))?;

        let data: Value = response
            .json()
            .await
            .map_err(|e| AppError::Search(format!("DuckDuckGo returned invalid JSON: {}", e)))?;

        Ok(parse_instant_answer(&data, &self.settings))
    }
}

/// Extract the abstract and related topics from an instant-answer payload.
fn parse_instant_answer(data: &Value, settings: &SearchSettings) -> Vec<SearchResult> {
    let mut results = Vec::new();

    let abstract_text = str_field(data, "Abstract");
    if is_substantive(abstract_text, settings.min_snippet_chars) {
        let heading = str_field(data, "Heading");
        let title = if heading.trim().is_empty() {
            ABSTRACT_FALLBACK_TITLE
        } else {
            heading
        };
        results.push(SearchResult::new(
            title,
            abstract_text,
            str_field(data, "AbstractURL"),
            SOURCE,
        ));
    }

    let topics = data
        .get("RelatedTopics")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    // Only the leading entries are considered, whatever their shape
    for topic in topics.iter().take(settings.instant_answer_topics) {
        // Category groups carry `Name`/`Topics` instead of `Text`
        let Some(text) = topic.get("Text").and_then(Value::as_str) else {
            continue;
        };
        if !is_substantive(text, settings.min_snippet_chars) {
            continue;
        }
        results.push(SearchResult::new(
            topic_title(text, settings.topic_title_chars),
            text,
            str_field(topic, "FirstURL"),
            SOURCE,
        ));
    }

    results
}

/// Title for a related topic: the text itself, cut at `max_chars` with an
/// ellipsis when longer.
fn topic_title(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let mut title: String = text.chars().take(max_chars).collect();
        title.push_str("...");
        title
    } else {
        text.to_string()
    }
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const LONG_ABSTRACT: &str = "Quantum computing is a type of computation that harnesses quantum mechanical phenomena.";
    const LONG_TOPIC: &str = "Quantum supremacy - The goal of demonstrating that a programmable quantum device can solve a problem no classical computer can.";

    #[test]
    fn test_abstract_and_topics() {
        let data = json!({
            "Abstract": LONG_ABSTRACT,
            "Heading": "Quantum computing",
            "AbstractURL": "https://en.wikipedia.org/wiki/Quantum_computing",
            "RelatedTopics": [
                {"Text": LONG_TOPIC, "FirstURL": "https://duckduckgo.com/Quantum_supremacy"}
            ]
        });

        let results = parse_instant_answer(&data, &SearchSettings::default());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Quantum computing");
        assert_eq!(results[0].snippet, LONG_ABSTRACT);
        assert_eq!(results[0].link, "https://en.wikipedia.org/wiki/Quantum_computing");
        assert_eq!(results[1].snippet, LONG_TOPIC);
        assert_eq!(results[1].link, "https://duckduckgo.com/Quantum_supremacy");
        assert!(results.iter().all(|r| r.source == "duckduckgo"));
    }

    #[test]
    fn test_missing_heading_uses_fallback_title() {
        let data = json!({"Abstract": LONG_ABSTRACT});
        let results = parse_instant_answer(&data, &SearchSettings::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Main Answer");
        assert_eq!(results[0].link, "");
    }

    #[test]
    fn test_short_abstract_and_topics_skipped() {
        let data = json!({
            "Abstract": "Too short.",
            "Heading": "Short",
            "RelatedTopics": [{"Text": "Also short", "FirstURL": "https://duckduckgo.com/x"}]
        });
        assert!(parse_instant_answer(&data, &SearchSettings::default()).is_empty());
    }

    #[test]
    fn test_category_groups_and_malformed_entries_skipped() {
        let data = json!({
            "RelatedTopics": [
                {"Name": "See also", "Topics": [{"Text": LONG_TOPIC}]},
                "not an object",
                {"Text": 42},
                {"Text": LONG_TOPIC}
            ]
        });
        let results = parse_instant_answer(&data, &SearchSettings::default());
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].snippet, LONG_TOPIC);
    }

    #[test]
    fn test_only_leading_topics_considered() {
        let topics: Vec<Value> = (0..6)
            .map(|i| json!({"Text": format!("{} number {}", LONG_TOPIC, i)}))
            .collect();
        let data = json!({"RelatedTopics": topics});

        let results = parse_instant_answer(&data, &SearchSettings::default());
        assert_eq!(results.len(), 4);
        assert!(results[3].snippet.ends_with("number 3"));
    }

    #[test]
    fn test_malformed_payload_yields_nothing() {
        let settings = SearchSettings::default();
        assert!(parse_instant_answer(&json!([]), &settings).is_empty());
        assert!(parse_instant_answer(&json!({"Abstract": 7, "RelatedTopics": "x"}), &settings).is_empty());
    }

    #[test]
    fn test_topic_title_truncation() {
        let exact = "a".repeat(80);
        assert_eq!(topic_title(&exact, 80), exact);

        let long = "b".repeat(81);
        let title = topic_title(&long, 80);
        assert_eq!(title.chars().count(), 83);
        assert!(title.ends_with("..."));

        // Multi-byte text is cut on character boundaries
        let accented = "é".repeat(100);
        assert_eq!(topic_title(&accented, 80).chars().count(), 83);
    }
}
