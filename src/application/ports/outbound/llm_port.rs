//! LLM port - The decision oracle as seen by the application layer
//!
//! The oracle is an opaque text-in/text-out function. Adapters live in the
//! infrastructure layer; tests substitute scripted implementations.

use async_trait::async_trait;

/// A chat completion request
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// The conversation so far
    pub messages: Vec<ChatMessage>,
    /// System instructions
    pub system_prompt: Option<String>,
}

impl LlmRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            system_prompt: None,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

/// A message in the conversation
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Role of a message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    System,
    User,
}

/// Response from the LLM
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// The generated text content
    pub content: String,
    /// Model that produced the reply
    pub model: String,
    /// Token usage, when the server reports it
    pub usage: Option<TokenUsage>,
}

/// Token usage information
#[derive(Debug, Clone, Copy)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Errors raised by an LLM adapter
#[derive(Debug, Clone, thiserror::Error)]
pub enum LlmError {
    /// The request could not be sent or the server rejected it
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    /// The server answered with something that is not a chat completion
    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait LlmPort: Send + Sync {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}
