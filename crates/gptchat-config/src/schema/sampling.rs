//! Default sampling parameters shown in the options panel.

use serde::{Deserialize, Serialize};

use gptchat_ai::params::{
    DEFAULT_SYSTEM_PROMPT, FREQUENCY_PENALTY, PRESENCE_PENALTY, TEMPERATURE, TOP_P,
};
use gptchat_ai::SamplingParams;

/// Initial values for the system prompt and the four numeric knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub system_prompt: String,
    /// Valid range: 0.0-2.0.
    pub temperature: f64,
    /// Valid range: 0.0-1.0.
    pub top_p: f64,
    /// Valid range: -2.0-2.0.
    pub frequency_penalty: f64,
    /// Valid range: -2.0-2.0.
    pub presence_penalty: f64,
}

impl SamplingConfig {
    pub fn to_params(&self) -> SamplingParams {
        SamplingParams {
            temperature: self.temperature,
            top_p: self.top_p,
            frequency_penalty: self.frequency_penalty,
            presence_penalty: self.presence_penalty,
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.into(),
            temperature: TEMPERATURE.default,
            top_p: TOP_P.default,
            frequency_penalty: FREQUENCY_PENALTY.default,
            presence_penalty: PRESENCE_PENALTY.default,
        }
    }
}
