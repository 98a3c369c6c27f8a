//! Generation backends for webask.
//!
//! This crate provides a backend-agnostic abstraction for turning a prompt
//! into generated text. Two backends implement the [`LlmClient`] trait:
//!
//! - **Local**: an Ollama server (default)
//! - **Hosted**: an OpenAI-compatible chat-completion API
//!
//! [`Generator`] wraps a client and never fails: backend problems are turned
//! into user-facing text so the caller can show them in place of an answer.
//!
//! # Example
//! ```no_run
//! use webask_llm::{GenerationBackendConfig, Generator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let generator = Generator::from_config(&GenerationBackendConfig::local())?;
//! let text = generator.generate("Say hello").await;
//! println!("{}", text);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod generator;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use error::LlmError;
pub use factory::create_client;
pub use generator::Generator;
pub use providers::{OllamaClient, OpenAiClient};
pub use types::{GenerationBackendConfig, ProviderType};
