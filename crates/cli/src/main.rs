//! adpanel - operator CLI for the advertising admin API

mod commands;
mod logging;

use adpanel_client::{AdminClient, ClientConfig, FileStorage, SessionStore, StateDir};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use commands::Commands;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "adpanel")]
#[command(about = "Manage campaigns, users and applications on the admin API")]
#[command(version)]
struct Cli {
    /// Set logging level
    #[arg(short = 'l', long, global = true, default_value = "warn")]
    log_level: LogLevel,

    /// Configuration file (defaults to adpanel.toml or config/adpanel.toml)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the persisted session and the log file
    #[arg(short = 'd', long, global = true)]
    state_dir: Option<PathBuf>,

    /// Disable file logging (only log to stderr)
    #[arg(long, global = true)]
    no_file_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ClientConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ClientConfig::load().context("Failed to load config")?,
    };
    if cli.state_dir.is_some() {
        config.state_dir.clone_from(&cli.state_dir);
    }

    let state_dir = StateDir::resolve(config.state_dir.clone());
    let log_file = (!cli.no_file_log).then(|| state_dir.log_file());
    logging::init_logging(cli.log_level.into(), log_file)?;

    debug!(base_url = %config.base_url, state_dir = %state_dir.data_dir().display(), "Starting adpanel");

    let storage = Arc::new(FileStorage::new(state_dir.session_dir()));
    let session = Arc::new(SessionStore::new(storage));
    session.initialize();

    let client = AdminClient::from_config(&config, session)?;

    if let Err(e) = cli.command.execute(&client).await {
        error!("Command failed: {e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

#[derive(Clone, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(log_level: LogLevel) -> Self {
        match log_level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}
