//! OpenAI client struct, request building, and response parsing.

use crate::{AiError, AiResponse, Message, SessionParams, TokenUsage};

use super::config::OpenAiConfig;

/// OpenAI chat-completions client.
pub struct OpenAiClient {
    pub(crate) config: OpenAiConfig,
    pub(crate) http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self, AiError> {
        let mut builder = reqwest::Client::builder().connect_timeout(config.connect_timeout);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AiError::NetworkError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Build the JSON request body for the chat-completions endpoint.
    ///
    /// Sampling values go out exactly as supplied.
    pub(crate) fn build_request_body(
        &self,
        messages: &[Message],
        params: &SessionParams,
    ) -> serde_json::Value {
        serde_json::json!({
            "model": params.model,
            "messages": messages,
            "temperature": params.sampling.temperature,
            "top_p": params.sampling.top_p,
            "frequency_penalty": params.sampling.frequency_penalty,
            "presence_penalty": params.sampling.presence_penalty,
        })
    }

    /// Parse a non-streaming response. Only the first choice is used.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<AiResponse, AiError> {
        let first = json["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .ok_or_else(|| AiError::ParseError("no choices in response".to_string()))?;

        let content = first["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string();

        let usage = TokenUsage {
            input_tokens: json["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
            output_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0),
        };

        Ok(AiResponse { content, usage })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SamplingParams;

    fn client() -> OpenAiClient {
        OpenAiClient::new(OpenAiConfig::new("test-key")).unwrap()
    }

    #[test]
    fn request_body_carries_messages_and_sampling() {
        let params = SessionParams::default().with_sampling(SamplingParams {
            temperature: 2.0,
            top_p: 0.0,
            frequency_penalty: -2.0,
            presence_penalty: 2.0,
        });
        let messages = vec![Message::system("be brief"), Message::user("Hello")];

        let body = client().build_request_body(&messages, &params);

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["temperature"], 2.0);
        assert_eq!(body["top_p"], 0.0);
        assert_eq!(body["frequency_penalty"], -2.0);
        assert_eq!(body["presence_penalty"], 2.0);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "be brief");
        assert_eq!(body["messages"][1]["role"], "user");
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn parses_first_choice_and_usage() {
        let json = serde_json::json!({
            "choices": [
                { "index": 0, "message": { "role": "assistant", "content": "4" } },
                { "index": 1, "message": { "role": "assistant", "content": "four" } }
            ],
            "usage": { "prompt_tokens": 21, "completion_tokens": 1 }
        });

        let response = client().parse_response(json).unwrap();
        assert_eq!(response.content, "4");
        assert_eq!(response.usage.input_tokens, 21);
        assert_eq!(response.usage.output_tokens, 1);
    }

    #[test]
    fn null_content_becomes_empty() {
        let json = serde_json::json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        });
        let response = client().parse_response(json).unwrap();
        assert_eq!(response.content, "");
        assert_eq!(response.usage, TokenUsage::default());
    }

    #[test]
    fn missing_choices_is_parse_error() {
        let err = client()
            .parse_response(serde_json::json!({ "choices": [] }))
            .unwrap_err();
        assert!(matches!(err, AiError::ParseError(_)));

        let err = client()
            .parse_response(serde_json::json!({ "error": "nope" }))
            .unwrap_err();
        assert!(matches!(err, AiError::ParseError(_)));
    }
}
