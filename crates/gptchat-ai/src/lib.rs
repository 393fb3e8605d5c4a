//! Completion engine for gptchat.
//!
//! Provides the chat-completions client and the conversation session:
//! - `CompletionClient` trait with an OpenAI-compatible implementation
//! - Sampling parameters with their documented ranges
//! - `Session`, which rebuilds the message buffer from the visible history
//!   on every turn and commits the reply only after a successful call
//! - Token usage tracking

pub mod openai;
pub mod params;
pub mod session;
pub mod token_tracker;

use async_trait::async_trait;

pub use openai::{OpenAiClient, OpenAiConfig};
pub use params::{ParamRange, SamplingParams, SessionParams};
pub use session::{build_messages, Session, Turn};
pub use token_tracker::TokenTracker;

/// A chat-completion backend: one request in, one generated message out.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(
        &self,
        messages: &[Message],
        params: &SessionParams,
    ) -> Result<AiResponse, AiError>;
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct AiResponse {
    pub content: String,
    pub usage: TokenUsage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn total_tokens(&self) -> u64 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
}
