//! Retrieval-augmented answering over web sources.
//!
//! Aggregated search results are rendered into a numbered context block,
//! wrapped in the answer prompt and sent to the generation backend.

pub mod ask;
pub mod context;
pub mod types;

pub use ask::{AnswerPipeline, PipelineState};
pub use context::build_context;
pub use types::{AnswerResult, EMPTY_QUESTION_MESSAGE, NO_EVIDENCE_MESSAGE};
