//! CompletionClient trait implementation for OpenAiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiError, AiResponse, CompletionClient, Message, SessionParams};

use super::client::OpenAiClient;

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        messages: &[Message],
        params: &SessionParams,
    ) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(messages, params);

        debug!(
            model = %params.model,
            messages = messages.len(),
            "OpenAI API request"
        );

        let response = self
            .http
            .post(self.config.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::Unauthorized(format!("HTTP {status}: {text}")));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        let parsed = self.parse_response(json)?;
        debug!(
            input_tokens = parsed.usage.input_tokens,
            output_tokens = parsed.usage.output_tokens,
            "OpenAI API response"
        );
        Ok(parsed)
    }
}

fn map_transport_error(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::Timeout
    } else {
        AiError::NetworkError(e.to_string())
    }
}
