//! Persona generation — chat-style completion against a remote LLM.
//!
//! Defines the [`ChatModel`] trait and the shared request type. The
//! production implementation lives in [`huggingface`].

use async_trait::async_trait;

use crate::http::HttpError;

pub mod huggingface;

/// Default maximum output length, in tokens.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A two-message chat completion request: system role plus user content.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// System message establishing the assistant's role.
    pub system: String,
    /// User message carrying the full persona prompt.
    pub user: String,
    /// Maximum tokens in the completion.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Errors returned by chat completion backends.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// HTTP transport or status failure.
    #[error("chat completion request failed: {0}")]
    Http(#[from] HttpError),
    /// Response did not match the expected schema.
    #[error("chat completion parse error: {0}")]
    Parse(String),
}

/// A chat-style text generation capability.
///
/// One attempt per call; implementations do not retry. Any failure
/// propagates as [`GenerationError`].
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Request a completion and return the first choice's message content
    /// verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError`] on transport, status, or parse failure.
    async fn complete(&self, request: ChatRequest) -> Result<String, GenerationError>;

    /// The model identifier this backend is instantiated for.
    fn model_id(&self) -> &str;
}
