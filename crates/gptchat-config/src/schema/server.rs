//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// Web UI server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Maximum completion calls in flight across all sessions; 0 means unlimited.
    pub concurrency_limit: u32,
    /// Idle time after which a session is evicted (valid range: 60-604800).
    pub session_ttl_secs: u64,
    /// Page title and transcript label.
    pub title: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 7860,
            concurrency_limit: 4,
            session_ttl_secs: 3600,
            title: "ChatGPT".into(),
        }
    }
}
