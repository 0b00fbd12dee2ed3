//! Client configuration loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/";

/// Errors raised while interpreting configured values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The base URL does not parse.
    #[error("invalid booking API base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// Configured value.
        url: String,
        /// Parser failure.
        source: url::ParseError,
    },
    /// The base URL cannot have endpoint paths appended.
    #[error("booking API base URL {url:?} cannot carry a path")]
    CannotBeABase {
        /// Configured value.
        url: String,
    },
}

/// Configuration values for talking to the booking API.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BOOKING_CLIENT")]
pub struct ClientSettings {
    /// Base URL the booking endpoints resolve against.
    pub api_base_url: Option<String>,
    /// Per-request timeout in seconds.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
}

impl ClientSettings {
    /// Return the configured base URL, normalised to end in `/` so endpoint
    /// paths append below it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the value does not parse or cannot carry
    /// a path.
    pub fn api_base_url(&self) -> Result<Url, ConfigError> {
        let raw = self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL);
        let mut url = Url::parse(raw).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw.to_owned(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::CannotBeABase {
                url: raw.to_owned(),
            });
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Return the configured request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
