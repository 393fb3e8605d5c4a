//! The turn handler.

use tracing::{debug, warn};

use crate::{AiError, CompletionClient, Message, SamplingParams};

use super::buffer::build_messages;
use super::manager::Session;
use super::types::Turn;

impl Session {
    /// Run one turn and return the reply plus the history extended by it.
    ///
    /// The supplied system prompt and sampling values replace the stored
    /// ones before the buffer is built. Values are not range-checked.
    ///
    /// The new user entry stays in a pending buffer until the completion
    /// call succeeds. On error it is dropped, the committed buffer and
    /// `history` are untouched, and the error is returned as-is.
    pub async fn chat(
        &mut self,
        client: &dyn CompletionClient,
        user_text: impl Into<String>,
        history: &[Turn],
        system_prompt: impl Into<String>,
        sampling: SamplingParams,
    ) -> Result<(String, Vec<Turn>), AiError> {
        self.params.system_prompt = system_prompt.into();
        self.params.sampling = sampling;

        let out_of_range = sampling.out_of_range();
        if !out_of_range.is_empty() {
            debug!(options = ?out_of_range, "sampling values outside documented range, sending as-is");
        }

        let user_text = user_text.into();
        let mut pending = build_messages(&self.params.system_prompt, history, &user_text);

        let response = match client.complete(&pending, &self.params).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, turns = history.len(), "completion failed, discarding pending turn");
                return Err(e);
            }
        };

        self.tracker.record(&self.params.model, &response.usage);
        debug!(
            model = %self.params.model,
            model_tokens = self
                .tracker
                .for_model(&self.params.model)
                .map_or(0, |usage| usage.total_tokens()),
            session_tokens = self.tracker.total_tokens(),
            "turn committed"
        );

        pending.push(Message::assistant(response.content.as_str()));
        self.messages = pending;

        let mut updated = Vec::with_capacity(history.len() + 1);
        updated.extend_from_slice(history);
        updated.push(Turn::new(user_text, response.content.as_str()));

        Ok((response.content, updated))
    }
}
