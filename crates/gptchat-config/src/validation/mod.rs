//! Full configuration validation.
//!
//! Validates numeric ranges and required strings. Each section has its own
//! check; this orchestrator calls them all and collects errors into a
//! single `ConfigError`.

mod helpers;
mod model;
mod sampling;
mod server;


use crate::schema::GptChatConfig;
use gptchat_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &GptChatConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    model::validate_model(&mut errors, config);
    sampling::validate_sampling(&mut errors, config);
    server::validate_server(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
