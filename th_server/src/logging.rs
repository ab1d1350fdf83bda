//! Logging setup and tournament event records.

use std::{fmt, str::FromStr};
use tournament_hub::Tournament;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,hyper=warn,tower_http=warn";

/// Shape of the console output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Thread ids, source file and line on every record
    #[default]
    Full,
    /// One short line per record
    Compact,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            other => Err(format!("unknown log format '{other}', expected full or compact")),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Full => f.write_str("full"),
            LogFormat::Compact => f.write_str("compact"),
        }
    }
}

/// Initialize the global subscriber; RUST_LOG overrides the default filter.
///
/// ```no_run
/// use th_server::logging::{self, LogFormat};
///
/// logging::init(LogFormat::Compact);
/// tracing::info!("Server starting");
/// ```
pub fn init(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Full => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact().with_target(false))
            .init(),
    }

    tracing::debug!(%format, "Logging initialized");
}

/// Change applied to the repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TournamentEvent {
    Created,
    Updated,
    Deleted,
}

impl TournamentEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentEvent::Created => "created",
            TournamentEvent::Updated => "updated",
            TournamentEvent::Deleted => "deleted",
        }
    }
}

/// Record a repository change with the tournament's id and name
pub fn log_tournament_event(event: TournamentEvent, tournament: &Tournament) {
    tracing::info!(
        event = event.as_str(),
        id = %tournament.id,
        name = %tournament.name,
        participants = %format!("{}/{}", tournament.participants.current, tournament.participants.max),
        "Tournament {}",
        event.as_str()
    );
}
