//! Prompt types for webask.

use serde::{Deserialize, Serialize};

/// A prompt definition, either built in or loaded from YAML.
///
/// The template is rendered with Handlebars and receives two variables:
/// `question` (the raw user question) and `context` (the rendered grounding
/// context block).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion", default = "default_api_version")]
    pub api_version: String,

    /// Template string with Handlebars syntax
    pub template: String,
}

fn default_api_version() -> String {
    "1.0".to_string()
}
