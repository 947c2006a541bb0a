//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and batching behavior settings
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Result output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(AppError::config("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(AppError::config("fetcher.timeout_secs must be > 0"));
        }
        if self.fetcher.batch_size == 0 {
            return Err(AppError::config("fetcher.batch_size must be > 0"));
        }
        if self.fetcher.max_attempts == 0 {
            return Err(AppError::config("fetcher.max_attempts must be > 0"));
        }
        url::Url::parse(&self.fetcher.endpoint)?;
        Ok(())
    }
}

/// HTTP client and batching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// Directory search endpoint (form POST target)
    #[serde(default = "defaults::endpoint")]
    pub endpoint: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Number of rooms fetched concurrently in one batch
    #[serde(default = "defaults::batch_size")]
    pub batch_size: usize,

    /// Pause between batches in milliseconds
    #[serde(default = "defaults::fetch_delay")]
    pub fetch_delay_ms: u64,

    /// Total attempts per query before it is dropped
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: u32,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::endpoint(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            batch_size: defaults::batch_size(),
            fetch_delay_ms: defaults::fetch_delay(),
            max_attempts: defaults::max_attempts(),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Preferred output format ("text", "csv" or "json")
    #[serde(default)]
    pub format: Option<String>,
}

mod defaults {
    pub fn endpoint() -> String {
        "https://kn.vutbr.cz/is2/index.html".into()
    }
    pub fn user_agent() -> String {
        concat!("kolnet/", env!("CARGO_PKG_VERSION")).into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn batch_size() -> usize {
        10
    }
    pub fn fetch_delay() -> u64 {
        300
    }
    pub fn max_attempts() -> u32 {
        3
    }
}
