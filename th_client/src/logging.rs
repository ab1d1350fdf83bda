//! Logging setup for the client.
//!
//! The TUI owns the terminal, so in TUI mode logs go to a file or nowhere.

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Where log records are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Off,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the global subscriber.
///
/// Configurable log levels via the RUST_LOG env var.
pub fn init(target: LogTarget) -> std::io::Result<()> {
    match target {
        LogTarget::Stderr => {
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt_layer)
                .init();
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            let fmt_layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(file));
            tracing_subscriber::registry()
                .with(env_filter())
                .with(fmt_layer)
                .init();
            tracing::info!(path = %path.display(), "File logging initialized");
        }
        LogTarget::Off => {}
    }

    Ok(())
}
