//! A terminal client for the tournaments API.
//!
//! Lists, searches, creates, renames and removes tournaments, either in a
//! full-screen TUI or in a line-oriented mode suited to scripts.

use anyhow::{Context, Result};
use pico_args::Arguments;
use std::{path::PathBuf, sync::Arc};
use th_client::{
    cli::Cli,
    config::ClientConfig,
    logging::{self, LogTarget},
    tui_app::TuiApp,
};
use tournament_hub::{HttpTournamentService, StoreActor, TournamentThunks};

const HELP: &str = "\
Browse and edit tournaments

USAGE:
  th_client [OPTIONS]

OPTIONS:
  --api-url URL         Tournaments endpoint  [default: env TH_API_URL or http://localhost:4000/tournaments]
  --log-file PATH       Write logs to PATH  [default: env TH_LOG_FILE]

FLAGS:
  --cli                 Use line mode instead of the TUI
  --sync                Also send renames and removals to the API
  -h, --help            Print help information

ENVIRONMENT:
  TH_API_URL            Tournaments endpoint
  TH_SEARCH_DEBOUNCE_MS Quiet period before a search is sent  [default: 275]
  TH_SYNC_MUTATIONS     Same as --sync when true
  TH_LOG_FILE           Same as --log-file
  RUST_LOG              Log filter  [default: info]
";

struct Args {
    api_url: Option<String>,
    log_file: Option<PathBuf>,
    use_cli: bool,
    sync: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        api_url: pargs
            .opt_value_from_str("--api-url")
            .context("Invalid --api-url")?,
        log_file: pargs
            .opt_value_from_str("--log-file")
            .context("Invalid --log-file")?,
        use_cli: pargs.contains("--cli"),
        sync: pargs.contains("--sync"),
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        anyhow::bail!("Unexpected arguments: {remaining:?}. See --help");
    }

    run(args).await
}

async fn run(args: Args) -> Result<()> {
    let config = ClientConfig::from_env(args.api_url, args.sync, args.log_file)
        .context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    // The TUI owns the terminal; only line mode may log to stderr
    let log_target = match (&config.log_file, args.use_cli) {
        (Some(path), _) => LogTarget::File(path.clone()),
        (None, true) => LogTarget::Stderr,
        (None, false) => LogTarget::Off,
    };
    logging::init(log_target).context("Failed to open log file")?;

    tracing::info!(
        api_url = %config.api_url,
        sync_mutations = config.sync_mutations,
        "Starting tournaments client"
    );

    let store = StoreActor::spawn();
    let service = Arc::new(HttpTournamentService::new(config.api_url.clone()));
    let thunks = TournamentThunks::new(service, Arc::new(store.clone()))
        .with_persisted_mutations(config.sync_mutations);

    if args.use_cli {
        let cli = Cli::new(tokio::io::stdin(), std::io::stdout(), store, thunks);
        return cli.run().await;
    }

    let tui_app = TuiApp::new(&store, thunks, config.search_debounce);

    let terminal = ratatui::init();
    let result = tui_app.run(terminal).await;
    ratatui::restore();

    result
}
