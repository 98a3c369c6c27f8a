//! Prompt system for webask.
//!
//! This crate turns a question and a rendered grounding context into the
//! single instruction prompt sent to the generation backend:
//! - Built-in answer template, overridable by a YAML prompt definition
//! - Handlebars rendering with HTML escaping disabled
//! - Deterministic output for identical inputs

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::{build_prompt, PromptBuilder};
pub use loader::{default_prompt, load_prompt};
pub use types::PromptDefinition;
