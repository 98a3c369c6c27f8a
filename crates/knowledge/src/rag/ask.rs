//! End-to-end answering.
//!
//! Validates the question, aggregates web evidence, renders the context and
//! prompt, and generates an answer. Every outcome is an [`AnswerResult`];
//! only construction can fail.

use crate::aggregate::Aggregator;
use crate::rag::context::build_context;
use crate::rag::types::AnswerResult;
use crate::types::SearchResult;
use std::fmt;
use webask_core::{AppConfig, AppResult};
use webask_llm::{GenerationBackendConfig, Generator};
use webask_prompt::{default_prompt, load_prompt, PromptBuilder};

/// Progress of a single [`AnswerPipeline::answer`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Validating,
    Searching,
    NoEvidence,
    ContextReady,
    Generating,
    Done,
}

impl PipelineState {
    /// Lowercase name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Searching => "searching",
            Self::NoEvidence => "no_evidence",
            Self::ContextReady => "context_ready",
            Self::Generating => "generating",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn advance(state: &mut PipelineState, next: PipelineState) {
    tracing::debug!(from = %state, to = %next, "pipeline transition");
    *state = next;
}

/// Question in, grounded answer out.
pub struct AnswerPipeline {
    aggregator: Aggregator,
    prompt: PromptBuilder,
    generator: Generator,
}

impl AnswerPipeline {
    /// Assemble a pipeline from its collaborators.
    pub fn new(aggregator: Aggregator, prompt: PromptBuilder, generator: Generator) -> Self {
        Self {
            aggregator,
            prompt,
            generator,
        }
    }

    /// Build the default sources, prompt and backend from configuration.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let aggregator = Aggregator::from_settings(&config.search)?;

        let definition = match &config.prompt_file {
            Some(path) => load_prompt(path)?,
            None => default_prompt(),
        };
        let prompt = PromptBuilder::new(&definition)?;

        let backend = GenerationBackendConfig::from_app_config(config)?;
        tracing::debug!(?backend, "generation backend");
        let generator = Generator::from_config(&backend)?;

        tracing::info!(
            sources = ?aggregator.source_names(),
            prompt = prompt.prompt_id(),
            provider = generator.provider_name(),
            "answer pipeline ready"
        );

        Ok(Self::new(aggregator, prompt, generator))
    }

    /// Run retrieval only.
    pub async fn search(&self, question: &str) -> Vec<SearchResult> {
        if question.trim().is_empty() {
            return Vec::new();
        }
        self.aggregator.aggregate(question).await
    }

    /// Answer a question.
    ///
    /// The question is passed to the sources and the prompt as given;
    /// surrounding whitespace only matters for the emptiness check.
    ///
    /// Never fails: invalid input, missing evidence, and backend failures
    /// all produce an explanatory `answer`. When evidence was found,
    /// `sources` carries it even if generation failed.
    pub async fn answer(&self, question: &str) -> AnswerResult {
        let mut state = PipelineState::Idle;

        advance(&mut state, PipelineState::Validating);
        if question.trim().is_empty() {
            advance(&mut state, PipelineState::Done);
            return AnswerResult::empty_question();
        }

        tracing::info!(question, "answering");

        advance(&mut state, PipelineState::Searching);
        let results = self.aggregator.aggregate(question).await;

        if results.is_empty() {
            advance(&mut state, PipelineState::NoEvidence);
            tracing::info!("no evidence found");
            return AnswerResult::no_evidence();
        }

        advance(&mut state, PipelineState::ContextReady);
        let context = build_context(&results);

        let prompt = match self.prompt.build(question, &context) {
            Ok(prompt) => prompt,
            Err(err) => {
                tracing::warn!(error = %err, "prompt rendering failed");
                advance(&mut state, PipelineState::Done);
                return AnswerResult::new(format!("Error: {}", err), results);
            }
        };

        advance(&mut state, PipelineState::Generating);
        let answer = self.generator.generate(&prompt).await;

        advance(&mut state, PipelineState::Done);
        AnswerResult::new(answer, results)
    }
}
