//! Client settings loaded via OrthoConfig.
//!
//! Values come from `STOREFRONT_*` environment variables and the OrthoConfig
//! configuration file; every setting has a default.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_STORAGE_DIR: &str = ".storefront";

/// Invalid settings detected at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// `base_url` does not parse as a URL.
    #[error("invalid base URL {value:?}: {source}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Parser failure.
        #[source]
        source: url::ParseError,
    },
    /// `base_url` is not an HTTP(S) origin.
    #[error("base URL {value:?} must use http or https")]
    UnsupportedScheme {
        /// Configured value.
        value: String,
    },
}

/// Where the storefront lives and how the client talks to it.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "STOREFRONT")]
pub struct StorefrontSettings {
    /// Storefront origin, optionally with a path prefix.
    #[ortho_config(default = DEFAULT_BASE_URL.to_owned())]
    pub base_url: String,
    /// Directory holding the local cart cache.
    #[ortho_config(default = PathBuf::from(DEFAULT_STORAGE_DIR))]
    pub storage_dir: PathBuf,
    /// Per-request timeout in seconds. Requests never time out when unset.
    pub request_timeout_secs: Option<u64>,
}

impl StorefrontSettings {
    /// Parsed storefront origin; the local development server unless
    /// configured otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error when the configured value is not an HTTP(S) URL.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let raw = self.base_url.as_str();
        let url = Url::parse(raw).map_err(|source| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            source,
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            _ => Err(SettingsError::UnsupportedScheme {
                value: raw.to_owned(),
            }),
        }
    }

    /// Cart cache directory; `.storefront` in the working directory unless
    /// configured otherwise.
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    /// Configured request timeout.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
