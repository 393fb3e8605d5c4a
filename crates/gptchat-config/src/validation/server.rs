//! Server section validation.

use crate::schema::GptChatConfig;

use super::helpers::{validate_non_empty, validate_range};

pub(crate) fn validate_server(errors: &mut Vec<String>, config: &GptChatConfig) {
    validate_non_empty(errors, "server.host", &config.server.host);
    validate_range(errors, "server.port", config.server.port.into(), 1, 65535);
    validate_range(
        errors,
        "server.session_ttl_secs",
        config.server.session_ttl_secs,
        60,
        604_800,
    );
}
