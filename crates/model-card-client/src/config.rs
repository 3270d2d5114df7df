//! Configuration management for the registry client
//!
//! Loads configuration from environment variables with sensible defaults.

use model_card_common::DEFAULT_LIMIT;
use std::env;
use std::time::Duration;

use crate::error::{Error, Result};

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Registry base URL, without the `/api/v1` prefix
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Page size for listings
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            page_size: DEFAULT_LIMIT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let config = ClientConfig {
            base_url: env::var("MODEL_CARD_API_URL").unwrap_or(defaults.base_url),

            timeout_secs: parse_var("MODEL_CARD_API_TIMEOUT_SECS", defaults.timeout_secs)?,

            page_size: parse_var("MODEL_CARD_PAGE_SIZE", defaults.page_size)?,
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(Error::InvalidUrl(format!(
                "MODEL_CARD_API_URL must be an http(s) URL, got {}",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(invalid("MODEL_CARD_API_TIMEOUT_SECS must be greater than 0"));
        }

        if self.page_size == 0 {
            return Err(invalid("MODEL_CARD_PAGE_SIZE must be greater than 0"));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| invalid(&format!("Invalid {name}: {raw}"))),
        Err(_) => Ok(default),
    }
}

fn invalid(message: &str) -> Error {
    Error::Config(message.to_string())
}
