//! Prompt builder for rendering the answer template.

use crate::loader::default_prompt;
use crate::types::PromptDefinition;
use handlebars::Handlebars;
use std::collections::HashMap;
use webask_core::{AppError, AppResult};

const TEMPLATE_NAME: &str = "prompt";

/// Renders a prompt definition for a question and its grounding context.
///
/// The template is compiled once at construction. Rendering is a pure
/// string transform: identical inputs always produce identical output.
pub struct PromptBuilder {
    registry: Handlebars<'static>,
    prompt_id: String,
}

impl PromptBuilder {
    /// Compile a prompt definition.
    pub fn new(definition: &PromptDefinition) -> AppResult<Self> {
        let mut registry = Handlebars::new();

        // Disable HTML escaping for plain text
        registry.register_escape_fn(handlebars::no_escape);

        registry
            .register_template_string(TEMPLATE_NAME, &definition.template)
            .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

        Ok(Self {
            registry,
            prompt_id: definition.id.clone(),
        })
    }

    /// Builder for the built-in answer prompt.
    pub fn with_default_prompt() -> AppResult<Self> {
        Self::new(&default_prompt())
    }

    /// Identifier of the compiled prompt.
    pub fn prompt_id(&self) -> &str {
        &self.prompt_id
    }

    /// Render the prompt for a question and a rendered context block.
    ///
    /// # Example
    /// ```
    /// use webask_prompt::PromptBuilder;
    ///
    /// let builder = PromptBuilder::with_default_prompt().unwrap();
    /// let prompt = builder.build("What is Rust?", "[Source 1] Rust:\nA language.").unwrap();
    /// assert!(prompt.contains("Question: What is Rust?"));
    /// ```
    pub fn build(&self, question: &str, context: &str) -> AppResult<String> {
        tracing::debug!("Building prompt: {}", self.prompt_id);

        let mut variables = HashMap::new();
        variables.insert("question", question);
        variables.insert("context", context);

        self.registry
            .render(TEMPLATE_NAME, &variables)
            .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
    }
}

/// Render a prompt definition once.
pub fn build_prompt(
    definition: &PromptDefinition,
    question: &str,
    context: &str,
) -> AppResult<String> {
    PromptBuilder::new(definition)?.build(question, context)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: &str = "Information from web sources:\n\n[Source 1] Photosynthesis:\nPlants turn light into sugar & oxygen.\n\n";

    #[test]
    fn test_default_prompt_layout() {
        let builder = PromptBuilder::with_default_prompt().unwrap();
        let prompt = builder.build("What is photosynthesis?", CONTEXT).unwrap();

        assert!(prompt.starts_with("You are a helpful AI assistant."));
        assert!(prompt.contains("using ONLY the information provided in the context"));
        assert!(prompt.contains("[Source 1] Photosynthesis:"));
        assert!(prompt.contains("Question: What is photosynthesis?"));
        assert!(prompt.contains("2-3 paragraphs maximum"));
        assert!(prompt.contains("doesn't contain enough information, say so"));
        assert!(prompt.trim_end().ends_with("Answer:"));

        let context_at = prompt.find("[Source 1]").unwrap();
        let question_at = prompt.find("Question:").unwrap();
        assert!(context_at < question_at);
    }

    #[test]
    fn test_build_is_deterministic() {
        let builder = PromptBuilder::with_default_prompt().unwrap();
        let first = builder.build("Who invented the telephone?", CONTEXT).unwrap();
        let second = builder.build("Who invented the telephone?", CONTEXT).unwrap();
        assert_eq!(first, second);

        let rebuilt = build_prompt(&default_prompt(), "Who invented the telephone?", CONTEXT).unwrap();
        assert_eq!(first, rebuilt);
    }

    #[test]
    fn test_no_html_escaping() {
        let builder = PromptBuilder::with_default_prompt().unwrap();
        let prompt = builder.build("Is 1 < 2 & 3 > 2?", CONTEXT).unwrap();
        assert!(prompt.contains("Is 1 < 2 & 3 > 2?"));
        assert!(prompt.contains("sugar & oxygen"));
    }

    #[test]
    fn test_question_is_not_interpreted_as_template() {
        let builder = PromptBuilder::with_default_prompt().unwrap();
        let prompt = builder.build("What does {{context}} mean?", CONTEXT).unwrap();
        assert!(prompt.contains("Question: What does {{context}} mean?"));
    }

    #[test]
    fn test_custom_definition() {
        let definition = PromptDefinition {
            id: "answer.terse".to_string(),
            title: "Terse".to_string(),
            api_version: "1.0".to_string(),
            template: "{{context}}Q: {{question}}\nA:".to_string(),
        };

        let builder = PromptBuilder::new(&definition).unwrap();
        assert_eq!(builder.prompt_id(), "answer.terse");
        assert_eq!(builder.build("Why?", "ctx\n").unwrap(), "ctx\nQ: Why?\nA:");
    }

    #[test]
    fn test_invalid_template_rejected() {
        let definition = PromptDefinition {
            template: "{{#if context}}unterminated".to_string(),
            ..default_prompt()
        };
        assert!(matches!(
            PromptBuilder::new(&definition),
            Err(AppError::Prompt(_))
        ));
    }
}
