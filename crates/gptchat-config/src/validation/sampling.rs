//! Sampling defaults validation against the documented ranges.

use gptchat_ai::params::SAMPLING_RANGES;

use crate::schema::GptChatConfig;

use super::helpers::validate_range_f64;

pub(crate) fn validate_sampling(errors: &mut Vec<String>, config: &GptChatConfig) {
    let values = config.sampling.to_params();
    for range in SAMPLING_RANGES {
        if let Some(value) = values.value_of(&range) {
            validate_range_f64(
                errors,
                &format!("sampling.{}", range.name),
                value,
                range.min,
                range.max,
            );
        }
    }
}
