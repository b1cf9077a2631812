use anyhow::Result;
use std::fs::OpenOptions;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the CLI
///
/// Logs always go to stderr; when `log_file` is set they are also appended
/// to that file without ANSI colors. `RUST_LOG` overrides the level.
pub fn init_logging(log_level: Level, log_file: Option<PathBuf>) -> Result<()> {
    match log_file {
        Some(path) => init_file_logging(log_level, path),
        None => init_stderr_logging(log_level),
    }
}

fn env_filter(level: Level) -> EnvFilter {
    let level_str = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("adpanel={level_str},adpanel_client={level_str}").into())
}

fn init_file_logging(level: Level, log_file_path: PathBuf) -> Result<()> {
    if let Some(parent) = log_file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_file)
                .with_ansi(false),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

fn init_stderr_logging(level: Level) -> Result<()> {
    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}
