//! Bounty LLM - application text generation.
//!
//! This crate turns a listing title into a tailored application message. A
//! [`PromptTemplate`] is rendered for the listing and handed to a
//! [`CompletionProvider`]; the first completion choice becomes the
//! application content, verbatim.
//!
//! # Example
//!
//! ```rust,ignore
//! use bounty_llm::{ApplicationGenerator, OpenAiProvider, PromptTemplate};
//! use std::sync::Arc;
//!
//! let provider = OpenAiProvider::new(api_key)?;
//! let template = PromptTemplate::new("Write a short application for [Project Name].")?;
//! let generator = ApplicationGenerator::new(Arc::new(provider), template);
//!
//! let draft = generator.generate(listing_id, "Discord moderation bot").await?;
//! println!("{}", draft.content);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod error;
pub mod generator;
#[allow(missing_docs)]
pub mod provider;
pub mod providers;

// Re-export commonly used types
pub use error::{LlmError, Result};
pub use generator::{ApplicationGenerator, PromptTemplate};
pub use provider::{CompletionProvider, CompletionRequest, CompletionResponse};
pub use providers::OpenAiProvider;
