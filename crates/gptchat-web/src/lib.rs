//! gptchat web front end.
//!
//! Serves a single chat page and a JSON endpoint. Every browser gets its own
//! session, keyed by cookie, and completion calls pass through a shared
//! admission limit.

pub mod admission;
pub mod error;
pub mod page;
pub mod routes;
pub mod store;

use std::sync::Arc;

use gptchat_ai::{CompletionClient, SessionParams};

pub use admission::Admission;
pub use error::WebError;
pub use routes::{router, ChatReply, ChatRequest, SESSION_COOKIE};
pub use store::{spawn_reaper, SessionEntry, SessionStore};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn CompletionClient>,
    pub store: SessionStore,
    pub admission: Admission,
    pub title: Arc<str>,
}

impl AppState {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        defaults: SessionParams,
        concurrency_limit: usize,
        title: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            client,
            store: SessionStore::new(defaults),
            admission: Admission::new(concurrency_limit),
            title: title.into(),
        }
    }
}
