//! Search command handler.
//!
//! Runs retrieval only, which helps diagnose answers without a backend.

use crate::render;
use clap::Args;
use webask_core::{config::AppConfig, AppResult};
use webask_knowledge::Aggregator;

/// Show what the web sources return for a question
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Search query; multiple words are joined with spaces
    #[arg(required = true, num_args = 1.., value_name = "QUESTION")]
    pub words: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    /// Execute the search command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let query = self.words.join(" ");
        let query = query.trim();
        tracing::info!(query, "Executing search command");

        let results = if query.is_empty() {
            Vec::new()
        } else {
            Aggregator::from_settings(&config.search)?
                .aggregate(query)
                .await
        };

        let mut stdout = std::io::stdout().lock();
        if self.json {
            render::write_json(&mut stdout, &results)
        } else {
            render::write_results(&mut stdout, &results)?;
            Ok(())
        }
    }
}
