//! Request buffer construction.

use crate::Message;

use super::types::Turn;

/// Build the buffer for one request: the system entry, a user/assistant
/// pair per prior turn, then the new user entry. Always `2 * history.len() + 2`
/// messages long.
pub fn build_messages(system_prompt: &str, history: &[Turn], user_text: &str) -> Vec<Message> {
    let mut msgs = Vec::with_capacity(history.len() * 2 + 2);
    msgs.push(Message::system(system_prompt));
    for turn in history {
        msgs.push(Message::user(turn.user.as_str()));
        msgs.push(Message::assistant(turn.assistant.as_str()));
    }
    msgs.push(Message::user(user_text));
    msgs
}
