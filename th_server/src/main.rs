//! In-memory tournaments API server.
//!
//! Serves the tournaments REST contract from a seeded in-memory map. Data is
//! lost on exit.

use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use pico_args::Arguments;
use th_server::{
    api::{self, AppState},
    config::ServerConfig,
    logging,
    repository::TournamentRepository,
};

const HELP: &str = "\
Run an in-memory tournaments API server

USAGE:
  th_server [OPTIONS]

OPTIONS:
  --bind       IP:PORT     Server socket bind address  [default: env TH_SERVER_BIND or 127.0.0.1:4000]
  --seed       N           Number of generated tournaments  [default: env TH_SEED_COUNT or 12]

FLAGS:
  -h, --help               Print help information

ENVIRONMENT:
  TH_SERVER_BIND           Server bind address (e.g., 0.0.0.0:4000)
  TH_SEED_COUNT            Number of generated tournaments
  TH_LOG_FORMAT            Console log shape, full or compact  [default: full]
  RUST_LOG                 Log filter  [default: info]
";

struct Args {
    bind: Option<SocketAddr>,
    seed_count: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        bind: pargs
            .opt_value_from_str("--bind")
            .context("Invalid --bind address")?,
        seed_count: pargs
            .opt_value_from_str("--seed")
            .context("Invalid --seed count")?,
    };

    let config = ServerConfig::from_env(args.bind, args.seed_count)
        .context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    logging::init(config.log_format);

    let repository = Arc::new(TournamentRepository::seeded(config.seed_count));
    tracing::info!(count = config.seed_count, "Seeded tournaments");

    let app = api::create_router(AppState { repository });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;

    tracing::info!(
        "Server is running at http://{}/tournaments. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
