//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SCAN_POLL_MS: u64 = 3000;
pub const DEFAULT_STATS_REFRESH_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API URL '{0}' (expected http:// or https://)")]
    InvalidApiUrl(String),
    #[error("no state directory; set RESONANT_STATE_DIR")]
    MissingStateDir,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every service path is appended to, without trailing slash.
    pub api_url: String,
    pub timeouts: HttpTimeouts,
    /// Fixed delay between scan-status fetches while a job is non-terminal.
    pub scan_poll_interval: Duration,
    /// Auto-refresh period for dashboard stats in watch mode.
    pub stats_refresh_interval: Duration,
    /// Directory holding the persisted client state file.
    pub state_dir: PathBuf,
}

impl ClientConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `RESONANT_API_URL`: default `http://localhost:8080/api`
    /// - `RESONANT_REQUEST_TIMEOUT_SECS`: default 30
    /// - `RESONANT_CONNECT_TIMEOUT_SECS`: default 10
    /// - `RESONANT_SCAN_POLL_MS`: default 3000
    /// - `RESONANT_STATS_REFRESH_SECS`: default 30
    /// - `RESONANT_STATE_DIR`: default `<config dir>/resonant`
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = normalize_api_url(
            &std::env::var("RESONANT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_owned()),
        )?;
        let timeouts = HttpTimeouts {
            request_secs: env_parse("RESONANT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("RESONANT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        let state_dir = match std::env::var("RESONANT_STATE_DIR") {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => default_state_dir().ok_or(ConfigError::MissingStateDir)?,
        };

        Ok(Self {
            api_url,
            timeouts,
            scan_poll_interval: Duration::from_millis(env_parse("RESONANT_SCAN_POLL_MS", DEFAULT_SCAN_POLL_MS)),
            stats_refresh_interval: Duration::from_secs(env_parse(
                "RESONANT_STATS_REFRESH_SECS",
                DEFAULT_STATS_REFRESH_SECS,
            )),
            state_dir,
        })
    }

    /// Config with defaults for everything except the API URL and state dir.
    pub fn new(api_url: &str, state_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: normalize_api_url(api_url)?,
            timeouts: HttpTimeouts {
                request_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
                connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            },
            scan_poll_interval: Duration::from_millis(DEFAULT_SCAN_POLL_MS),
            stats_refresh_interval: Duration::from_secs(DEFAULT_STATS_REFRESH_SECS),
            state_dir: state_dir.into(),
        })
    }

    /// Override the API URL (CLI flag precedence over env).
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        self.api_url = normalize_api_url(api_url)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_state_dir(mut self, state_dir: impl Into<PathBuf>) -> Self {
        self.state_dir = state_dir.into();
        self
    }

    #[must_use]
    pub fn state_file(&self) -> PathBuf {
        self.state_dir.join("state.json")
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_owned())
    } else {
        Err(ConfigError::InvalidApiUrl(raw.to_owned()))
    }
}

fn default_state_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("resonant"))
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    let Ok(raw) = std::env::var(key) else {
        return default;
    };
    match raw.parse::<T>() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = %raw, "config: unparseable value; using default");
            default
        }
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
