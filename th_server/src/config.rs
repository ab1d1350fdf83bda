//! Server configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use crate::logging::LogFormat;
use std::net::SocketAddr;

pub const DEFAULT_BIND: &str = "127.0.0.1:4000";
pub const DEFAULT_SEED_COUNT: usize = 12;

/// Largest accepted seed
const MAX_SEED_COUNT: usize = 10_000;

/// Complete server configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Server bind address
    pub bind: SocketAddr,
    /// Number of generated tournaments on startup
    pub seed_count: usize,
    /// Console log shape
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Arguments
    ///
    /// * `bind_override` - Optional bind address override (from CLI args)
    /// * `seed_count_override` - Optional seed count override (from CLI args)
    ///
    /// # Errors
    ///
    /// Returns error if a variable is set but cannot be parsed
    pub fn from_env(
        bind_override: Option<SocketAddr>,
        seed_count_override: Option<usize>,
    ) -> Result<Self, ConfigError> {
        Self::from_lookup(
            |key| std::env::var(key).ok(),
            bind_override,
            seed_count_override,
        )
    }

    /// Same as [`ServerConfig::from_env`] with an explicit variable source
    pub fn from_lookup<F>(
        lookup: F,
        bind_override: Option<SocketAddr>,
        seed_count_override: Option<usize>,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = match bind_override {
            Some(bind) => bind,
            None => parse_var(&lookup, "TH_SERVER_BIND", DEFAULT_BIND)?,
        };

        let seed_count = match seed_count_override {
            Some(count) => count,
            None => parse_var(&lookup, "TH_SEED_COUNT", &DEFAULT_SEED_COUNT.to_string())?,
        };

        let log_format = parse_var(&lookup, "TH_LOG_FORMAT", &LogFormat::default().to_string())?;

        Ok(ServerConfig {
            bind,
            seed_count,
            log_format,
        })
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed_count > MAX_SEED_COUNT {
            return Err(ConfigError::Invalid {
                var: "TH_SEED_COUNT".to_string(),
                reason: format!("Must be at most {MAX_SEED_COUNT}"),
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

/// Parse a variable, falling back to `default` when unset
fn parse_var<F, T>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim().parse().map_err(|e| ConfigError::Invalid {
        var: key.to_string(),
        reason: format!("Cannot parse '{raw}': {e}"),
    })
}
