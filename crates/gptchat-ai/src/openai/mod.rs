//! OpenAI chat-completions client.
//!
//! Implements the `CompletionClient` trait against any endpoint that speaks
//! the `POST {api_base}/chat/completions` protocol.

mod api;
mod client;
mod config;

pub use client::OpenAiClient;
pub use config::{OpenAiConfig, DEFAULT_API_BASE};
