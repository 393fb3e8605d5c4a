//! Session struct and conversation state accessors.

use crate::token_tracker::TokenTracker;
use crate::{Message, SessionParams};

/// A conversation session: current parameters, committed buffer, usage.
pub struct Session {
    /// Parameters of the most recent turn (last call wins).
    pub(super) params: SessionParams,
    /// Buffer of the last successful turn, reply included.
    pub(super) messages: Vec<Message>,
    /// Token usage tracker.
    pub(super) tracker: TokenTracker,
}

impl Session {
    pub fn new(params: SessionParams) -> Self {
        Self {
            params,
            messages: Vec::new(),
            tracker: TokenTracker::new(),
        }
    }

    /// Parameters the next request will start from.
    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    /// The last committed buffer. Never ends in an unanswered user entry.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn tracker(&self) -> &TokenTracker {
        &self.tracker
    }

    /// Drop the committed buffer. Parameters and usage are kept.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionParams::default())
    }
}
