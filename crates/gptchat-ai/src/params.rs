//! Sampling parameters and their documented ranges.
//!
//! Ranges are advisory: the form widgets and the config validator use them,
//! the turn handler passes whatever it is given straight through.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Bounds, slider step and default for one numeric option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ParamRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const TEMPERATURE: ParamRange = ParamRange {
    name: "temperature",
    min: 0.0,
    max: 2.0,
    step: 0.1,
    default: 1.0,
};

pub const TOP_P: ParamRange = ParamRange {
    name: "top_p",
    min: 0.0,
    max: 1.0,
    step: 0.01,
    default: 1.0,
};

pub const FREQUENCY_PENALTY: ParamRange = ParamRange {
    name: "frequency_penalty",
    min: -2.0,
    max: 2.0,
    step: 0.1,
    default: 0.0,
};

pub const PRESENCE_PENALTY: ParamRange = ParamRange {
    name: "presence_penalty",
    min: -2.0,
    max: 2.0,
    step: 0.1,
    default: 0.0,
};

/// The four numeric knobs, in form order.
pub const SAMPLING_RANGES: [ParamRange; 4] =
    [TEMPERATURE, TOP_P, FREQUENCY_PENALTY, PRESENCE_PENALTY];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    pub temperature: f64,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl SamplingParams {
    /// Value of the option described by `range`, looked up by name.
    pub fn value_of(&self, range: &ParamRange) -> Option<f64> {
        match range.name {
            "temperature" => Some(self.temperature),
            "top_p" => Some(self.top_p),
            "frequency_penalty" => Some(self.frequency_penalty),
            "presence_penalty" => Some(self.presence_penalty),
            _ => None,
        }
    }

    /// Names of options whose value lies outside the documented range.
    pub fn out_of_range(&self) -> Vec<&'static str> {
        SAMPLING_RANGES
            .iter()
            .filter(|r| self.value_of(r).is_some_and(|v| !r.contains(v)))
            .map(|r| r.name)
            .collect()
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE.default,
            top_p: TOP_P.default,
            frequency_penalty: FREQUENCY_PENALTY.default,
            presence_penalty: PRESENCE_PENALTY.default,
        }
    }
}

/// Everything a completion request carries besides the messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionParams {
    pub model: String,
    pub system_prompt: String,
    #[serde(flatten)]
    pub sampling: SamplingParams,
}

impl SessionParams {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            sampling: SamplingParams::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let params = SessionParams::default();
        assert_eq!(params.model, "gpt-3.5-turbo");
        assert_eq!(params.system_prompt, "You are a helpful assistant.");
        assert_eq!(params.sampling.temperature, 1.0);
        assert_eq!(params.sampling.top_p, 1.0);
        assert_eq!(params.sampling.frequency_penalty, 0.0);
        assert_eq!(params.sampling.presence_penalty, 0.0);
    }

    #[test]
    fn defaults_lie_within_ranges() {
        for range in SAMPLING_RANGES {
            assert!(range.contains(range.default), "{}", range.name);
        }
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(TEMPERATURE.contains(0.0));
        assert!(TEMPERATURE.contains(2.0));
        assert!(!TEMPERATURE.contains(2.01));
        assert!(FREQUENCY_PENALTY.contains(-2.0));
        assert!(!PRESENCE_PENALTY.contains(-2.5));
    }

    #[test]
    fn out_of_range_reports_offenders() {
        let sampling = SamplingParams {
            temperature: 3.0,
            top_p: 0.5,
            frequency_penalty: 0.0,
            presence_penalty: -4.0,
        };
        assert_eq!(
            sampling.out_of_range(),
            vec!["temperature", "presence_penalty"]
        );
        assert!(SamplingParams::default().out_of_range().is_empty());
    }

    #[test]
    fn session_params_serialize_flat() {
        let json = serde_json::to_value(SessionParams::default()).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["top_p"], 1.0);
        assert!(json.get("sampling").is_none());
    }
}
