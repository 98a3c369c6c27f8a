//! Search result model shared by every source.

use serde::{Deserialize, Serialize};

/// A snippet retrieved from one web source.
///
/// Created by a [`SourceClient`](crate::sources::SourceClient) and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Page or topic title; also the deduplication key
    pub title: String,

    /// Extracted passage used as generation evidence
    pub snippet: String,

    /// Link to the page, empty when the source did not provide one
    pub link: String,

    /// Name of the source client that produced this result
    #[serde(default)]
    pub source: String,
}

impl SearchResult {
    /// Create a new result. The snippet is stored trimmed.
    pub fn new(
        title: impl Into<String>,
        snippet: impl AsRef<str>,
        link: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.as_ref().trim().to_string(),
            link: link.into(),
            source: source.into(),
        }
    }

    /// Normalized title used for deduplication (trimmed, lowercased).
    pub fn dedup_key(&self) -> String {
        self.title.trim().to_lowercase()
    }
}

/// Whether `text` is long enough to be admitted as evidence.
///
/// Length is counted in characters after trimming and must exceed `min_chars`.
pub fn is_substantive(text: &str, min_chars: usize) -> bool {
    text.trim().chars().count() > min_chars
}
