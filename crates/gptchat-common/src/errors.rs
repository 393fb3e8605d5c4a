use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum GptChatError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("ai error: {0}")]
    Ai(String),

    #[error("server error: {0}")]
    Server(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("sampling.top_p = 3 is out of range".into());
        assert_eq!(
            err.to_string(),
            "config validation error: sampling.top_p = 3 is out of range"
        );
    }

    #[test]
    fn gptchat_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: GptChatError = config_err.into();
        assert!(matches!(err, GptChatError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn gptchat_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken");
        let err: GptChatError = io_err.into();
        assert!(matches!(err, GptChatError::Io(_)));
        assert!(err.to_string().contains("port taken"));
    }

    #[test]
    fn gptchat_error_other_variants() {
        let err = GptChatError::Ai("OPENAI_API_KEY not set".into());
        assert_eq!(err.to_string(), "ai error: OPENAI_API_KEY not set");

        let err = GptChatError::Server("bind failed".into());
        assert_eq!(err.to_string(), "server error: bind failed");
    }
}
