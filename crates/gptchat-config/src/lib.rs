//! gptchat configuration system.
//!
//! Provides TOML-based configuration with validation. All config sections
//! use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use gptchat_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{GptChatConfig, LogLevel, CONFIG_SCHEMA_VERSION};

use gptchat_common::ConfigError;
use std::path::Path;
use tracing::warn;

/// Load config from `path`, or from the platform default when `None`.
///
/// An explicit path must exist and parse. The default path is created with
/// a commented template on first run; if it cannot be read or created, a
/// warning is logged and the built-in defaults are used.
pub fn load_config(path: Option<&Path>) -> Result<GptChatConfig, ConfigError> {
    match path {
        Some(path) => toml_loader::load_from_path(path),
        None => Ok(or_defaults(toml_loader::load_default())),
    }
}

fn or_defaults(loaded: Result<GptChatConfig, ConfigError>) -> GptChatConfig {
    loaded.unwrap_or_else(|e| {
        warn!("config load failed, using defaults: {e}");
        GptChatConfig::default()
    })
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &GptChatConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let json = config_to_json(&GptChatConfig::default());
        assert!(json.contains("\"model\""));
        assert!(json.contains("\"sampling\""));
        assert!(json.contains("\"server\""));
        assert!(json.contains("\"logging\""));
        assert!(json.contains("\"gpt-3.5-turbo\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let json = config_to_json(&GptChatConfig::default());
        let parsed: GptChatConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.server.port, 7860);
        assert_eq!(parsed.sampling.system_prompt, "You are a helpful assistant.");
    }

    #[test]
    fn unusable_default_location_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("config-home");
        std::fs::write(&blocker, "not a directory").unwrap();

        let loaded = toml_loader::load_or_create(&blocker.join("gptchat").join("config.toml"));
        assert!(matches!(loaded, Err(ConfigError::ParseError(_))));

        let config = or_defaults(loaded);
        assert_eq!(config.server.port, 7860);
        assert_eq!(config.model.name, "gpt-3.5-turbo");
    }

    #[test]
    fn unparseable_default_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let config = or_defaults(toml_loader::load_or_create(&path));
        assert_eq!(config.server.host, "127.0.0.1");
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let result = load_config(Some(Path::new("/tmp/gptchat_missing_config.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
