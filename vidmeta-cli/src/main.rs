//! Vidmeta CLI
//!
//! Command-line interface for the video metadata generation backend.

mod commands;
mod config;
mod render;
mod store;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::{Config, default_config_dir};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidmeta_poller::PollConfig;

#[derive(Parser)]
#[command(name = "vidmeta")]
#[command(about = "Generate YouTube titles, tags and summaries", long_about = None)]
struct Cli {
    /// Backend URL
    #[arg(long, env = "VIDMETA_API_URL", default_value = "http://localhost:8000")]
    api_url: String,

    /// Bearer token (falls back to VIDMETA_TOKEN on every request)
    #[arg(long)]
    token: Option<String>,

    /// Directory holding local preferences
    #[arg(long, env = "VIDMETA_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Log client and poller activity to stderr
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "vidmeta=debug"
    } else {
        "vidmeta=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => default_config_dir()?,
    };

    let config = Config {
        api_url: cli.api_url,
        token: cli.token,
        config_dir,
        poll: PollConfig::from_env()?,
    };

    handle_command(cli.command, &config).await
}
