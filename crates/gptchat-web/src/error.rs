//! HTTP-facing errors.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gptchat_ai::AiError;

#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    Completion(#[from] AiError),

    #[error("a reply is still being generated for this session")]
    Busy,

    /// The request body could not be read as a chat request.
    #[error("{}", .0.body_text())]
    InvalidRequest(#[from] JsonRejection),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::Busy => StatusCode::CONFLICT,
            WebError::InvalidRequest(rejection) => rejection.status(),
            WebError::Completion(AiError::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
            WebError::Completion(AiError::Timeout) => StatusCode::GATEWAY_TIMEOUT,
            WebError::Completion(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}
