//! LLM completion gateway
//!
//! The rest of the crate talks to the model through [`CompletionGateway`],
//! a single call that takes a prompt and a system prompt and yields text or
//! nothing. [`AiClient`] is the HTTP implementation with support for
//! OpenAI-compatible endpoints and Anthropic. Keys are read from the
//! environment or the user config (BYOK).
//!
//! # Environment Variables
//!
//! - `OPENAI_API_KEY`: Required for the OpenAI backend (default)
//! - `ANTHROPIC_API_KEY`: Required for the Anthropic backend
//!
//! # Example
//!
//! ```rust,ignore
//! use codecritic::ai::{AiClient, AiConfig, CompletionGateway};
//!
//! let client = AiClient::from_config(AiConfig::default(), std::env::var("OPENAI_API_KEY").ok())?;
//! let text = client.generate_completion("Review this", "You are a reviewer");
//! ```

mod client;
pub mod prompts;

pub use client::{
    AiClient, AiConfig, LlmBackend, Message, Role, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};
pub use prompts::SystemPrompt;

use thiserror::Error;

/// Errors that can occur in the AI module
#[derive(Error, Debug)]
pub enum AiError {
    #[error("Missing API key: {env_var} not set. Get your key at {signup_url}")]
    MissingApiKey { env_var: String, signup_url: String },

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type AiResult<T> = Result<T, AiError>;

/// Something that turns a prompt into generated text.
///
/// `None` means "no result". Implementations log the reason themselves;
/// callers substitute their own fallback and never see the error.
pub trait CompletionGateway {
    fn generate_completion(&self, prompt: &str, system_prompt: &str) -> Option<String>;

    /// Short human-readable name of the endpoint, used in status messages
    fn describe(&self) -> String {
        "completion service".to_string()
    }
}
