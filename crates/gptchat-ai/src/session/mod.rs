//! Conversation session management.
//!
//! A `Session` holds the parameters of the last turn and the last committed
//! message buffer. Each turn rebuilds the buffer from the history the caller
//! supplies, so the request always mirrors the visible transcript.

mod buffer;
mod chat;
mod manager;
mod types;


pub use buffer::build_messages;
pub use manager::Session;
pub use types::Turn;
