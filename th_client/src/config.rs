//! Client configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use std::path::PathBuf;
use std::time::Duration;
use tournament_hub::SEARCH_DEBOUNCE_DELAY;

pub const DEFAULT_API_URL: &str = "http://localhost:4000/tournaments";

/// Longest accepted search debounce
const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the tournaments endpoint
    pub api_url: String,
    /// Quiet period before a search is sent
    pub search_debounce: Duration,
    /// Send renames and removals to the API as well
    pub sync_mutations: bool,
    /// Log destination for TUI mode
    pub log_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            search_debounce: SEARCH_DEBOUNCE_DELAY,
            sync_mutations: false,
            log_file: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `api_url_override` - Optional API URL override (from CLI args)
    /// * `sync_override` - `--sync` flag; forces mutation syncing on
    /// * `log_file_override` - Optional log file override (from CLI args)
    pub fn from_env(
        api_url_override: Option<String>,
        sync_override: bool,
        log_file_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(
            |key| std::env::var(key).ok(),
            api_url_override,
            sync_override,
            log_file_override,
        )
    }

    /// Same as [`ClientConfig::from_env`] with an explicit variable source
    pub fn from_lookup<F>(
        lookup: F,
        api_url_override: Option<String>,
        sync_override: bool,
        log_file_override: Option<PathBuf>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = api_url_override
            .or_else(|| lookup("TH_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let debounce_ms = match lookup("TH_SEARCH_DEBOUNCE_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                var: "TH_SEARCH_DEBOUNCE_MS".to_string(),
                reason: format!("Expected a number of milliseconds, got '{raw}'"),
            })?,
            None => SEARCH_DEBOUNCE_DELAY.as_millis() as u64,
        };

        let sync_mutations = sync_override || parse_or(&lookup, "TH_SYNC_MUTATIONS", false);

        let log_file = log_file_override.or_else(|| lookup("TH_LOG_FILE").map(PathBuf::from));

        Ok(ClientConfig {
            api_url,
            search_debounce: Duration::from_millis(debounce_ms),
            sync_mutations,
            log_file,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "TH_API_URL".to_string(),
                reason: format!("Must be an http(s) URL, got '{}'", self.api_url),
            });
        }

        if self.search_debounce > Duration::from_millis(MAX_DEBOUNCE_MS) {
            return Err(ConfigError::Invalid {
                var: "TH_SEARCH_DEBOUNCE_MS".to_string(),
                reason: format!("Must be at most {MAX_DEBOUNCE_MS} ms"),
            });
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse a variable with default fallback
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
