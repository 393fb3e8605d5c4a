pub mod errors;
pub mod id;

pub use errors::{ConfigError, GptChatError};
pub use id::{new_id, SessionId};
