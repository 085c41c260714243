//! Language-model review of learner writing
//!
//! This module sends the text and the writer's profile to an LLM and turns
//! the reply into located [`Suggestion`](crate::models::Suggestion)s.
//! Supports multiple backends (Anthropic, OpenAI-compatible, Ollama) using
//! the BYOK (bring your own key) model: API keys come from the user config
//! or environment variables.
//!
//! # Environment Variables
//!
//! - `ANTHROPIC_API_KEY`: Required for the Anthropic backend
//! - `OPENAI_API_KEY`: Required for the OpenAI backend
//! - `OPENROUTER_API_KEY`, `DEEPINFRA_API_KEY`: other hosted backends
//! - `OLLAMA_MODEL`: Model override for a local Ollama server
//!
//! # Example
//!
//! ```rust,ignore
//! use esl_coach::ai::{AiClient, LlmBackend, ModelReviewer};
//!
//! let client = AiClient::from_env(LlmBackend::Anthropic)?;
//! let reviewer = ModelReviewer::new(Box::new(client));
//! let outcome = reviewer.review(text, &profile)?;
//! ```

mod client;
mod parse;
mod prompts;
mod reviewer;

pub use client::{AiClient, AiConfig, LanguageModel, LlmBackend, Message, Role};
pub use parse::{locate_suggestions, parse_review, ModelReview, ModelSuggestion};
pub use prompts::{PromptTemplate, ReviewPromptBuilder, DEFAULT_MAX_MODEL_SUGGESTIONS};
pub use reviewer::{ModelOutcome, ModelReviewer};

use thiserror::Error;

/// Errors that can occur in the AI module
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Missing API key: {env_var} not set. Get your key at {signup_url}")]
    MissingApiKey { env_var: String, signup_url: String },

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type AiResult<T> = Result<T, AiError>;
