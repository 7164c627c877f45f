//! Hugging Face chat completion backend.
//!
//! Talks to the inference router's OpenAI-compatible
//! `/v1/chat/completions` endpoint with bearer token auth.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::http::{check_response, HttpError};

use super::{ChatModel, ChatRequest, GenerationError};

const ROUTER_URL: &str = "https://router.huggingface.co/v1/chat/completions";

/// Default chat model served through the router.
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.3";

// ---------------------------------------------------------------------------
// Wire types (pub for integration testing)
// ---------------------------------------------------------------------------

/// Chat completions API request body.
#[doc(hidden)]
#[derive(Debug, Serialize)]
pub struct CompletionsRequest {
    /// Model identifier.
    pub model: String,
    /// Role-tagged conversation messages.
    pub messages: Vec<WireMessage>,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// A role-tagged message on the wire.
#[doc(hidden)]
#[derive(Debug, Serialize, Deserialize)]
pub struct WireMessage {
    /// Role (`system` or `user`).
    pub role: String,
    /// Plain text content.
    pub content: String,
}

/// Chat completions API response body.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct CompletionsResponse {
    /// Response choices.
    pub choices: Vec<Choice>,
}

/// A response choice.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct Choice {
    /// Assistant message for this choice.
    pub message: ChoiceMessage,
}

/// Assistant message from the model.
#[doc(hidden)]
#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    /// Text content of the completion.
    pub content: Option<String>,
}

// ---------------------------------------------------------------------------
// Request / response builders (pub for integration testing)
// ---------------------------------------------------------------------------

/// Build the wire request from a chat request: system message first, then
/// the user message.
#[doc(hidden)]
pub fn build_request(model: &str, request: &ChatRequest) -> CompletionsRequest {
    CompletionsRequest {
        model: model.to_owned(),
        messages: vec![
            WireMessage {
                role: "system".to_owned(),
                content: request.system.clone(),
            },
            WireMessage {
                role: "user".to_owned(),
                content: request.user.clone(),
            },
        ],
        max_tokens: request.max_tokens,
        temperature: request.temperature,
    }
}

/// Extract the first completion's message content from a response body.
///
/// # Errors
///
/// Returns `GenerationError::Parse` when the body cannot be deserialized,
/// has no choices, or the first choice carries no content.
#[doc(hidden)]
pub fn parse_response(body: &str) -> Result<String, GenerationError> {
    let resp: CompletionsResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Parse(e.to_string()))?;

    let choice = resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::Parse("missing choices[0]".to_owned()))?;

    choice
        .message
        .content
        .ok_or_else(|| GenerationError::Parse("missing message content".to_owned()))
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Hugging Face router chat completion backend.
#[derive(Debug, Clone)]
pub struct HuggingFaceModel {
    model: String,
    token: String,
    client: reqwest::Client,
}

impl HuggingFaceModel {
    /// Create a new backend for `model`, authenticated with `token`.
    pub fn new(model: String, token: String) -> Self {
        Self {
            model,
            token,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatModel for HuggingFaceModel {
    async fn complete(&self, request: ChatRequest) -> Result<String, GenerationError> {
        let api_request = build_request(&self.model, &request);

        let response = self
            .client
            .post(ROUTER_URL)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", self.token))
            .json(&api_request)
            .send()
            .await
            .map_err(HttpError::from)?;

        let payload = check_response(response).await?;
        parse_response(&payload)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}
