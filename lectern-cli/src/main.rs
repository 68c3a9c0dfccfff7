//! Lectern CLI - Command-line interface
//!
//! Serves the course catalog and inspects the demo catalog.

mod commands;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use lectern_core::config::LecternConfig;
use lectern_core::tracing_setup::{LogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "lectern")]
#[command(about = "A course catalog server")]
struct Cli {
    /// Console log level for Lectern's own events (RUST_LOG takes precedence)
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Directory for the debug log of the last run (defaults to LECTERN_LOGS_DIR or ./logs)
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = LecternConfig::from_env();
    if let Some(dir) = cli.logs_dir {
        config.logging.logs_dir = dir;
    }

    let log_path =
        init_tracing(cli.log_level, &config.logging).context("Failed to initialize tracing")?;
    tracing::debug!(log = %log_path.display(), ?config, "Loaded configuration");

    commands::handle_command(cli.command, config).await
}
