//! Model section validation.

use crate::schema::GptChatConfig;

use super::helpers::{validate_non_empty, validate_range};

pub(crate) fn validate_model(errors: &mut Vec<String>, config: &GptChatConfig) {
    validate_non_empty(errors, "model.name", &config.model.name);
    if let Some(base) = &config.model.api_base {
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            errors.push(format!("model.api_base = {base:?} must be an http(s) URL"));
        }
    }
    validate_range(
        errors,
        "model.connect_timeout_secs",
        config.model.connect_timeout_secs.into(),
        1,
        120,
    );
}
