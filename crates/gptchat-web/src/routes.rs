//! HTTP handlers: the form UI, the JSON API, and health.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use gptchat_ai::{SamplingParams, Turn};
use gptchat_common::SessionId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::WebError;
use crate::page::{self, PageView};
use crate::AppState;

pub const SESSION_COOKIE: &str = "gptchat_session";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/chat", post(submit_chat))
        .route("/reset", post(reset))
        .route("/api/chat", post(api_chat))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Fields posted by the chat form. Sliders always submit a value.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    pub message: String,
    pub system_prompt: String,
    pub temperature: f64,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
}

impl ChatForm {
    fn sampling(&self) -> SamplingParams {
        SamplingParams {
            temperature: self.temperature,
            top_p: self.top_p,
            frequency_penalty: self.frequency_penalty,
            presence_penalty: self.presence_penalty,
        }
    }
}

/// JSON turn request. Omitted fields fall back to the configured defaults;
/// an omitted history means the session's stored transcript.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub history: Option<Vec<Turn>>,
    pub system_prompt: Option<String>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    pub history: Vec<Turn>,
}

/// Read the session cookie, minting a new id when absent or malformed.
/// The flag is true when the id is new and must be set on the response.
fn session_from_headers(headers: &HeaderMap) -> (SessionId, bool) {
    let existing = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.parse::<SessionId>().ok());

    match existing {
        Some(id) => (id, false),
        None => (SessionId::new(), true),
    }
}

fn with_session_cookie(mut response: Response, id: &SessionId, is_new: bool) -> Response {
    if is_new {
        let cookie = format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax");
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, is_new) = session_from_headers(&headers);
    let entry = state.store.get_or_create(&id).await;
    // A turn holds the entry for the whole completion call.
    let Ok(mut entry) = entry.try_lock() else {
        debug!(session_id = %id, "Page requested while a reply is pending");
        let html = page::render_pending(&state.title);
        return with_session_cookie(Html(html).into_response(), &id, is_new);
    };
    entry.touch();

    let html = page::render_page(&PageView {
        title: &state.title,
        history: &entry.history,
        params: entry.session.params(),
        draft: "",
        error: None,
        total_tokens: entry.session.tracker().total_tokens(),
    });
    with_session_cookie(Html(html).into_response(), &id, is_new)
}

async fn submit_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ChatForm>,
) -> Response {
    let (id, is_new) = session_from_headers(&headers);
    let entry = state.store.get_or_create(&id).await;
    let Ok(mut entry) = entry.try_lock() else {
        let err = WebError::Busy;
        let html = page::render_notice(&state.title, &err.to_string());
        return with_session_cookie((err.status(), Html(html)).into_response(), &id, is_new);
    };
    entry.touch();

    let history = entry.history.clone();
    let result = {
        let _permit = state.admission.acquire().await;
        entry
            .session
            .chat(
                state.client.as_ref(),
                form.message.clone(),
                &history,
                form.system_prompt.clone(),
                form.sampling(),
            )
            .await
    };

    let response = match result {
        Ok((_reply, updated)) => {
            debug!(session_id = %id, turns = updated.len(), "Turn completed");
            entry.history = updated;
            Redirect::to("/").into_response()
        }
        Err(e) => {
            let err = WebError::from(e);
            let message = err.to_string();
            let html = page::render_page(&PageView {
                title: &state.title,
                history: &entry.history,
                params: entry.session.params(),
                draft: &form.message,
                error: Some(&message),
                total_tokens: entry.session.tracker().total_tokens(),
            });
            (err.status(), Html(html)).into_response()
        }
    };
    with_session_cookie(response, &id, is_new)
}

async fn reset(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (id, is_new) = session_from_headers(&headers);
    let entry = state.store.get_or_create(&id).await;
    let Ok(mut entry) = entry.try_lock() else {
        let err = WebError::Busy;
        let html = page::render_notice(&state.title, &err.to_string());
        return with_session_cookie((err.status(), Html(html)).into_response(), &id, is_new);
    };
    entry.reset();
    entry.touch();
    info!(session_id = %id, "Conversation cleared");
    with_session_cookie(Redirect::to("/").into_response(), &id, is_new)
}

async fn api_chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let (id, is_new) = session_from_headers(&headers);
    let result = match payload {
        Ok(Json(request)) => run_api_turn(&state, &id, request).await,
        Err(rejection) => Err(WebError::from(rejection)),
    };
    let response = match result {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => e.into_response(),
    };
    with_session_cookie(response, &id, is_new)
}

async fn run_api_turn(
    state: &AppState,
    id: &SessionId,
    request: ChatRequest,
) -> Result<ChatReply, WebError> {
    let entry = state.store.get_or_create(id).await;
    let mut entry = entry.try_lock().map_err(|_| WebError::Busy)?;
    entry.touch();

    let defaults = state.store.defaults();
    let sampling = SamplingParams {
        temperature: request.temperature.unwrap_or(defaults.sampling.temperature),
        top_p: request.top_p.unwrap_or(defaults.sampling.top_p),
        frequency_penalty: request
            .frequency_penalty
            .unwrap_or(defaults.sampling.frequency_penalty),
        presence_penalty: request
            .presence_penalty
            .unwrap_or(defaults.sampling.presence_penalty),
    };
    let system_prompt = request
        .system_prompt
        .unwrap_or_else(|| defaults.system_prompt.clone());
    let history = request.history.unwrap_or_else(|| entry.history.clone());

    let (reply, updated) = {
        let _permit = state.admission.acquire().await;
        entry
            .session
            .chat(
                state.client.as_ref(),
                request.message,
                &history,
                system_prompt,
                sampling,
            )
            .await?
    };

    entry.history = updated.clone();
    Ok(ChatReply {
        reply,
        history: updated,
    })
}

async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn reads_existing_session_cookie() {
        let id = SessionId::new();
        let headers = headers_with_cookie(&format!("theme=dark; {SESSION_COOKIE}={id}; other=1"));
        let (parsed, is_new) = session_from_headers(&headers);
        assert_eq!(parsed, id);
        assert!(!is_new);
    }

    #[test]
    fn missing_cookie_mints_new_id() {
        let (_, is_new) = session_from_headers(&HeaderMap::new());
        assert!(is_new);
    }

    #[test]
    fn malformed_cookie_mints_new_id() {
        let headers = headers_with_cookie(&format!("{SESSION_COOKIE}=../../etc/passwd"));
        let (id, is_new) = session_from_headers(&headers);
        assert!(is_new);
        assert_ne!(id.as_str(), "../../etc/passwd");
    }

    #[test]
    fn new_sessions_get_cookie() {
        let id = SessionId::new();
        let response = with_session_cookie(StatusCode::OK.into_response(), &id, true);
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with(&format!("{SESSION_COOKIE}={id}")));
        assert!(cookie.contains("HttpOnly"));

        let response = with_session_cookie(StatusCode::OK.into_response(), &id, false);
        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[test]
    fn form_maps_to_sampling() {
        let form = ChatForm {
            message: "hi".into(),
            system_prompt: "sys".into(),
            temperature: 0.1,
            top_p: 0.2,
            frequency_penalty: 0.3,
            presence_penalty: 0.4,
        };
        assert_eq!(
            form.sampling(),
            SamplingParams {
                temperature: 0.1,
                top_p: 0.2,
                frequency_penalty: 0.3,
                presence_penalty: 0.4,
            }
        );
    }
}
