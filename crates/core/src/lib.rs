//! webask Core Library
//!
//! This crate provides the foundational utilities shared by every webask crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management (generation backend, search heuristics, prompt override)

pub mod config;
pub mod error;
pub mod logging;

// Re-export commonly used types
pub use config::{AppConfig, SearchSettings};
pub use error::{AppError, AppResult};
