//! OpenAI client configuration.

use std::fmt;
use std::time::Duration;

use crate::AiError;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI client configuration.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub api_base: String,
    pub connect_timeout: Duration,
    /// Whole-request timeout; `None` lets a hung call block indefinitely.
    pub request_timeout: Option<Duration>,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Some(Duration::from_secs(120)),
        }
    }

    /// Create config from the environment.
    ///
    /// `OPENAI_API_KEY` is required; `OPENAI_BASE_URL` overrides the
    /// default endpoint when set.
    pub fn from_env() -> Result<Self, AiError> {
        let key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                AiError::Unauthorized("OPENAI_API_KEY not set. Export it or add it to .env.".into())
            })?;

        let mut config = Self::new(key);
        if let Ok(base) = std::env::var("OPENAI_BASE_URL") {
            if !base.trim().is_empty() {
                config = config.with_api_base(base);
            }
        }
        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub(crate) fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_key() {
        let config = OpenAiConfig::new("sk-secret");
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn api_base_trailing_slash_is_trimmed() {
        let config = OpenAiConfig::new("k").with_api_base("http://localhost:8080/v1/");
        assert_eq!(
            config.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn default_endpoint() {
        let config = OpenAiConfig::new("k");
        assert_eq!(
            config.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(config.request_timeout, Some(Duration::from_secs(120)));
    }
}
