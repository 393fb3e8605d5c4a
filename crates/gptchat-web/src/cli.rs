use std::path::PathBuf;

use clap::Parser;

/// gptchat: a chat page in front of an OpenAI-compatible completion API.
#[derive(Parser, Debug)]
#[command(name = "gptchat", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address to bind (overrides server.host).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on (overrides server.port).
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Completion calls allowed in flight, 0 for unlimited (overrides server.concurrency_limit).
    #[arg(long)]
    pub concurrency_limit: Option<u32>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
