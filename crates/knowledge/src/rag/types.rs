//! Answer types returned by the pipeline.

use crate::types::SearchResult;
use serde::{Deserialize, Serialize};

/// Reply to an empty or whitespace-only question.
pub const EMPTY_QUESTION_MESSAGE: &str = "Please ask a question!";

/// Reply when no source produced usable evidence.
pub const NO_EVIDENCE_MESSAGE: &str = "I couldn't find information for this question.

Possible reasons:
- No internet connection
- Question too vague
- Try rephrasing your question

Example questions that work well:
- \"What is Python programming?\"
- \"Who invented the telephone?\"
- \"What is photosynthesis?\"
- \"Explain quantum computing\"
";

/// Final output of one question.
///
/// `sources` is exactly the evidence the answer was generated from, in the
/// order it was presented to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Generated answer, or an explanatory message
    pub answer: String,

    /// Evidence used for the answer
    pub sources: Vec<SearchResult>,
}

impl AnswerResult {
    /// Create a new answer.
    pub fn new(answer: impl Into<String>, sources: Vec<SearchResult>) -> Self {
        Self {
            answer: answer.into(),
            sources,
        }
    }

    /// Reply to an empty question.
    pub fn empty_question() -> Self {
        Self::new(EMPTY_QUESTION_MESSAGE, Vec::new())
    }

    /// Reply when aggregation found nothing.
    pub fn no_evidence() -> Self {
        Self::new(NO_EVIDENCE_MESSAGE, Vec::new())
    }
}
