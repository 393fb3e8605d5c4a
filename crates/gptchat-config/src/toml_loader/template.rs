//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# gptchat configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# The API key is read from OPENAI_API_KEY (environment or .env), never from here.

[model]
# name = "gpt-3.5-turbo"
# api_base = "https://api.openai.com/v1"   # falls back to OPENAI_BASE_URL
# connect_timeout_secs = 10                # 1-120
# request_timeout_secs = 120               # 0 disables the timeout

[sampling]
# system_prompt = "You are a helpful assistant."
# temperature = 1.0          # 0.0-2.0
# top_p = 1.0                # 0.0-1.0
# frequency_penalty = 0.0    # -2.0-2.0
# presence_penalty = 0.0     # -2.0-2.0

[server]
# host = "127.0.0.1"
# port = 7860
# concurrency_limit = 4      # completion calls in flight, 0 = unlimited
# session_ttl_secs = 3600    # 60-604800
# title = "ChatGPT"

[logging]
# level = "info"             # trace, debug, info, warn, error
"##
    .to_string()
}
