//! LLM request/response models and error taxonomy

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Messages
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: MessageRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: content.into() }
    }
}

/// One completion call. Serializes as an OpenAI `chat/completions` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

// ============================================================================
// OpenAI wire format
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatCompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionChoice {
    pub message: ChatCompletionMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, trimmed. `None` when there is no choice or
    /// its content is missing; a blank reply is `Some("")`.
    pub fn first_content(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(|content| content.trim().to_string())
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Provider failure categories. Details are for logs, never for clients.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LLMError {
    #[error("Provider authentication failed")]
    Authentication,

    #[error("Provider rate limit exceeded")]
    RateLimited,

    #[error("Provider API error: {0}")]
    Api(String),

    #[error("Unexpected provider failure: {0}")]
    Unknown(String),
}
