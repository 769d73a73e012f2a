//! # Client Configuration
//!
//! Configuration loaded from environment variables (and a `.env` file when present).
//! Validated on startup so a bad setting fails fast instead of on the first request.
//!
//! | Variable                         | Default                     |
//! |----------------------------------|-----------------------------|
//! | `STOCKDESK_API_URL`              | `http://localhost:5000/api` |
//! | `STOCKDESK_REQUEST_TIMEOUT_SECS` | `10`                        |
//! | `STOCKDESK_SESSION_FILE`         | `.stockdesk/session.json`   |
//! | `STOCKDESK_SEARCH_LIMIT`         | `8`                         |

use super::error::{AppError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Base URL used when `STOCKDESK_API_URL` is unset
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
/// Request timeout used when `STOCKDESK_REQUEST_TIMEOUT_SECS` is unset
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
/// Session file used when `STOCKDESK_SESSION_FILE` is unset
pub const DEFAULT_SESSION_FILE: &str = ".stockdesk/session.json";
/// Maximum search results shown by the navigation panel
pub const DEFAULT_SEARCH_LIMIT: usize = 8;

/// Terminal client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// API root every endpoint path is appended to. Never ends with `/`.
    pub api_base_url: String,

    /// Per-request timeout for the HTTP client
    pub request_timeout: Duration,

    /// Where the session (profile + token) is persisted
    pub session_file: PathBuf,

    /// Result cap for the navigation panel's stock search
    pub search_limit: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            search_limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from `.env` and the process environment.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is normal
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base_url = lookup("STOCKDESK_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = api_base_url.trim().trim_end_matches('/').to_string();

        let timeout_secs = match lookup("STOCKDESK_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::Config(format!(
                    "STOCKDESK_REQUEST_TIMEOUT_SECS must be a whole number of seconds: {}",
                    e
                ))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let session_file = lookup("STOCKDESK_SESSION_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE));

        let search_limit = match lookup("STOCKDESK_SEARCH_LIMIT") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                AppError::Config(format!("STOCKDESK_SEARCH_LIMIT must be a number: {}", e))
            })?,
            None => DEFAULT_SEARCH_LIMIT,
        };

        let config = Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            session_file,
            search_limit,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.api_base_url).map_err(|e| {
            AppError::Config(format!(
                "STOCKDESK_API_URL '{}' is not a valid URL: {}",
                self.api_base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "STOCKDESK_API_URL must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(AppError::Config(
                "STOCKDESK_REQUEST_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        if self.search_limit == 0 {
            return Err(AppError::Config(
                "STOCKDESK_SEARCH_LIMIT must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
