//! Configuration schema types for gptchat.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod logging;
mod model;
mod sampling;
mod server;

pub use logging::*;
pub use model::*;
pub use sampling::*;
pub use server::*;

use serde::{Deserialize, Serialize};

use gptchat_ai::SessionParams;

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for gptchat.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GptChatConfig {
    pub model: ModelConfig,
    pub sampling: SamplingConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

impl GptChatConfig {
    /// Parameters a fresh session starts with.
    pub fn session_params(&self) -> SessionParams {
        SessionParams::new(self.model.name.clone())
            .with_system_prompt(self.sampling.system_prompt.clone())
            .with_sampling(self.sampling.to_params())
    }
}
