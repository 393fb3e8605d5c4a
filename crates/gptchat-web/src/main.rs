//! gptchat: serves the chat page and forwards each turn to the completion API.

mod cli;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use gptchat_ai::{OpenAiClient, OpenAiConfig};
use gptchat_common::GptChatError;
use gptchat_config::{config_to_json, load_config, GptChatConfig, LogLevel};
use gptchat_web::{router, spawn_reaper, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

const REAPER_INTERVAL: Duration = Duration::from_secs(60);

/// Load environment variables from a .env file (KEY=VALUE lines).
/// Variables already set in the environment win.
fn load_dotenv() {
    let Ok(contents) = std::fs::read_to_string(".env") else {
        return;
    };
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        if let Some((key, value)) = line.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_matches('"').trim_matches('\'');
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    }
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

fn level_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!("gptchat={level}"))
}

/// Build the subscriber used from the first line of startup.
///
/// `RUST_LOG` wins, then `--log-level`. When neither is set the filter starts
/// at `info` and the returned handle lets the config file's level replace it
/// once the config is loaded.
fn logging_subscriber(
    env_filter: Option<EnvFilter>,
    cli_level: Option<&str>,
) -> (
    impl tracing::Subscriber + Send + Sync + 'static,
    Option<FilterHandle>,
) {
    let pinned = env_filter.is_some() || cli_level.is_some();
    let filter = env_filter.unwrap_or_else(|| level_filter(cli_level.unwrap_or("info")));
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr));
    (subscriber, (!pinned).then_some(handle))
}

fn apply_config_level(handle: &FilterHandle, level: LogLevel) {
    if let Err(e) = handle.reload(level_filter(level.as_directive())) {
        tracing::warn!(error = %e, "Failed to apply configured log level");
    }
}

fn apply_overrides(config: &mut GptChatConfig, args: &cli::Args) {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(limit) = args.concurrency_limit {
        config.server.concurrency_limit = limit;
    }
}

fn build_client(config: &GptChatConfig) -> Result<OpenAiClient, GptChatError> {
    let mut client_config = OpenAiConfig::from_env()
        .map_err(|e| GptChatError::Ai(e.to_string()))?
        .with_connect_timeout(Duration::from_secs(config.model.connect_timeout_secs.into()));

    let request_timeout = match config.model.request_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs.into())),
    };
    client_config = client_config.with_request_timeout(request_timeout);

    if let Some(base) = &config.model.api_base {
        client_config = client_config.with_api_base(base.clone());
    }

    tracing::info!(api_base = %client_config.api_base, model = %config.model.name, "Completion client ready");
    OpenAiClient::new(client_config).map_err(|e| GptChatError::Ai(e.to_string()))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn run(config: GptChatConfig) -> Result<(), GptChatError> {
    let client = build_client(&config)?;
    let state = AppState::new(
        Arc::new(client),
        config.session_params(),
        config.server.concurrency_limit as usize,
        config.server.title.as_str(),
    );

    match state.admission.limit() {
        Some(limit) => tracing::info!(limit, "Completion calls limited"),
        None => tracing::warn!("Completion concurrency is unlimited"),
    }

    spawn_reaper(
        state.store.clone(),
        Duration::from_secs(config.server.session_ttl_secs),
        REAPER_INTERVAL,
    );

    let addr = (config.server.host.as_str(), config.server.port);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("gptchat listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| GptChatError::Server(e.to_string()))
}

fn main() -> ExitCode {
    // Before any threads exist.
    load_dotenv();

    let args = cli::parse();

    let (subscriber, config_level) = logging_subscriber(
        EnvFilter::try_from_default_env().ok(),
        args.log_level.as_deref(),
    );
    subscriber.init();

    if let Some(path) = &args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let mut config = match load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    apply_overrides(&mut config, &args);
    if let Some(handle) = &config_level {
        apply_config_level(handle, config.logging.level);
    }

    if args.print_config {
        println!("{}", config_to_json(&config));
        return ExitCode::SUCCESS;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start async runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "gptchat stopped");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn config_level_replaces_startup_default() {
        let (subscriber, handle) = logging_subscriber(None, None);
        let handle = handle.expect("level should not be pinned");

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "gptchat_web", Level::INFO));
            assert!(!tracing::enabled!(target: "gptchat_web", Level::DEBUG));

            apply_config_level(&handle, LogLevel::Debug);
            assert!(tracing::enabled!(target: "gptchat_web::routes", Level::DEBUG));
        });
    }

    #[test]
    fn cli_level_is_not_overridden() {
        let (subscriber, handle) = logging_subscriber(None, Some("warn"));
        assert!(handle.is_none());

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "gptchat_config", Level::WARN));
            assert!(!tracing::enabled!(target: "gptchat_config", Level::INFO));
        });
    }

    #[test]
    fn env_filter_wins_over_cli_level() {
        let (subscriber, handle) =
            logging_subscriber(Some(EnvFilter::new("gptchat=trace")), Some("error"));
        assert!(handle.is_none());

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "gptchat_ai", Level::TRACE));
        });
    }
}
