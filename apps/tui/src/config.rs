use dotenv::dotenv;
use senate_trades_core::{ApiBase, ApiError};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API_BASE: {0}")]
    ApiBase(#[from] ApiError),

    #[error("API_BASE must be an absolute http(s) URL in the terminal app, got {0:?}")]
    RelativeApiBase(String),

    #[error("REQUEST_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    Timeout(String),
}

/// Runtime settings, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: ApiBase,
    pub timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_base = lookup("API_BASE")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_base = ApiBase::parse(&raw_base)?;
        if !api_base.as_str().starts_with("http") {
            return Err(ConfigError::RelativeApiBase(raw_base));
        }

        let timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Timeout(raw))?,
            _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let log_file = lookup("LOG_FILE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_base,
            timeout,
            log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).expect("defaults are valid");
        assert_eq!(config.api_base.as_str(), DEFAULT_API_BASE);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn environment_values_are_used() {
        let config = Config::from_lookup(lookup(&[
            ("API_BASE", "https://trades.example.com/api/"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("LOG_FILE", "dashboard.log"),
        ]))
        .expect("valid config");
        assert_eq!(config.api_base.as_str(), "https://trades.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.log_file, Some(PathBuf::from("dashboard.log")));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("REQUEST_TIMEOUT_SECS", "soon")])),
            Err(ConfigError::Timeout(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("API_BASE", "/api")])),
            Err(ConfigError::RelativeApiBase(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("API_BASE", "ftp://example.com")])),
            Err(ConfigError::ApiBase(_))
        ));
    }
}
