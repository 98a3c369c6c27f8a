//! webask Knowledge Library
//!
//! Web retrieval and grounded answering:
//! - Source clients for Wikipedia and DuckDuckGo
//! - Concurrent aggregation with title deduplication
//! - Context rendering and the end-to-end answer pipeline

pub mod aggregate;
pub mod rag;
pub mod sources;
pub mod types;

pub use aggregate::{merge_results, Aggregator};
pub use rag::{build_context, AnswerPipeline, AnswerResult, PipelineState};
pub use sources::{DuckDuckGoClient, SourceClient, WikipediaClient};
pub use types::SearchResult;
