//! Runtime configuration for the view and its HTTP transport.
//!
//! Defaults are overridden by environment variables, which the binary then
//! overrides with command-line flags. The resulting value is passed to the
//! transport explicitly.

use std::time::Duration;

use crate::error::{Result, ViewError};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_MESSAGE_MS: u64 = 3000;

pub const ENV_BASE_URL: &str = "BOOK_API_URL";
pub const ENV_MESSAGE_MS: &str = "BOOK_MESSAGE_MS";
pub const ENV_TIMEOUT_MS: &str = "BOOK_TIMEOUT_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    /// Root of the book API, without the `/books` path.
    pub base_url: String,
    /// How long timed messages stay visible.
    pub message_duration: Duration,
    /// `None` leaves requests without a deadline.
    pub request_timeout: Option<Duration>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            message_duration: Duration::from_millis(DEFAULT_MESSAGE_MS),
            request_timeout: None,
        }
    }
}

impl ViewConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_BASE_URL) {
            config.set_base_url(&url)?;
        }
        if let Some(raw) = lookup(ENV_MESSAGE_MS) {
            config.message_duration = Duration::from_millis(parse_millis(ENV_MESSAGE_MS, &raw)?);
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_MS) {
            config.set_timeout_ms(parse_millis(ENV_TIMEOUT_MS, &raw)?);
        }
        Ok(config)
    }

    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        let parsed = url::Url::parse(url)
            .map_err(|e| ViewError::config(format!("invalid API URL {url:?}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ViewError::config(format!(
                "API URL must use http or https, got {url:?}"
            )));
        }
        if parsed.host_str().is_none() {
            return Err(ViewError::config(format!("API URL has no host: {url:?}")));
        }
        self.base_url = url.to_string();
        Ok(())
    }

    /// Zero disables the timeout.
    pub fn set_timeout_ms(&mut self, millis: u64) {
        self.request_timeout = (millis > 0).then(|| Duration::from_millis(millis));
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<u64> {
    raw.trim().parse().map_err(|_| {
        ViewError::config(format!(
            "{key} must be a whole number of milliseconds, got {raw:?}"
        ))
    })
}
