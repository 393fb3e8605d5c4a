//! Completion endpoint configuration.

use serde::{Deserialize, Serialize};

use gptchat_ai::params::DEFAULT_MODEL;

/// Which model to call and how to reach it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier sent with every request.
    pub name: String,
    /// Endpoint base; `OPENAI_BASE_URL` is used when unset.
    pub api_base: Option<String>,
    /// TCP connect timeout in seconds (valid range: 1-120).
    pub connect_timeout_secs: u32,
    /// Whole-request timeout in seconds, 0 disables it.
    pub request_timeout_secs: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_MODEL.into(),
            api_base: None,
            connect_timeout_secs: 10,
            request_timeout_secs: 120,
        }
    }
}
