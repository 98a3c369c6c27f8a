//! Prompt loader for the built-in and YAML prompt definitions.

use crate::types::PromptDefinition;
use std::path::Path;
use webask_core::{AppError, AppResult};

/// Identifier of the built-in answer prompt.
pub const DEFAULT_PROMPT_ID: &str = "answer.default";

const DEFAULT_TEMPLATE: &str = "You are a helpful AI assistant. Answer the question below using ONLY the information provided in the context.

{{context}}

Question: {{question}}

Instructions:
- Give a clear, direct answer
- Use information from the sources above
- Be concise (2-3 paragraphs maximum)
- If the context doesn't contain enough information, say so

Answer:";

/// The built-in answer prompt.
pub fn default_prompt() -> PromptDefinition {
    PromptDefinition {
        id: DEFAULT_PROMPT_ID.to_string(),
        title: "Grounded web answer".to_string(),
        api_version: "1.0".to_string(),
        template: DEFAULT_TEMPLATE.to_string(),
    }
}

/// Load a prompt definition from a YAML file.
///
/// # Example
/// ```no_run
/// use webask_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("prompts/answer.yml"))?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(path: &Path) -> AppResult<PromptDefinition> {
    tracing::debug!("Loading prompt from: {:?}", path);

    if !path.exists() {
        return Err(AppError::Prompt(format!("Prompt file not found: {:?}", path)));
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| AppError::Prompt(format!("Failed to read prompt file {:?}: {}", path, e)))?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents)
        .map_err(|e| AppError::Prompt(format!("Failed to parse prompt YAML {:?}: {}", path, e)))?;

    validate_prompt(&definition)?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    for variable in ["question", "context"] {
        if !def.template.contains(&format!("{{{{{}}}}}", variable)) {
            return Err(AppError::Prompt(format!(
                "Prompt template must reference {{{{{}}}}}",
                variable
            )));
        }
    }

    Ok(())
}
