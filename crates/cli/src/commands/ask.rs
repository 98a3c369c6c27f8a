//! Ask command handler.
//!
//! Answers one question and prints the answer with its sources.

use crate::render;
use clap::Args;
use webask_core::{config::AppConfig, AppResult};
use webask_knowledge::AnswerPipeline;

/// Answer a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask; multiple words are joined with spaces
    #[arg(required = true, num_args = 1.., value_name = "QUESTION")]
    pub words: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// The question as typed.
    pub fn question(&self) -> String {
        self.words.join(" ")
    }

    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");

        let question = self.question();
        let pipeline = AnswerPipeline::from_config(config)?;
        let result = pipeline.answer(&question).await;

        tracing::debug!(sources = result.sources.len(), "answer ready");

        let mut stdout = std::io::stdout().lock();
        if self.json {
            render::write_json(&mut stdout, &result)
        } else {
            render::write_question(&mut stdout, question.trim())?;
            render::write_answer(&mut stdout, &result)?;
            Ok(())
        }
    }
}
