use std::env;
use std::time::Duration;

use edx_core::model::Username;
use reqwest::Url;

use crate::error::ConfigError;

const DEFAULT_BASE_URL: &str = "https://courses.edx.org";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the platform REST API.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: Url,
    pub username: Username,
    pub access_token: Option<String>,
    pub client_id: String,
    pub timeout: Duration,
}

impl ApiConfig {
    /// Read settings from `EDX_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `EDX_USERNAME` is missing or a value does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `EDX_USERNAME` is missing or a value does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let username = non_blank("EDX_USERNAME").ok_or(ConfigError::Missing("EDX_USERNAME"))?;
        let base_url = non_blank("EDX_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let timeout = match non_blank("EDX_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url: parse_base_url(&base_url)?,
            username: Username::new(username)?,
            access_token: non_blank("EDX_ACCESS_TOKEN"),
            client_id: non_blank("EDX_CLIENT_ID").unwrap_or_default(),
            timeout,
        })
    }

    /// Override the base url, e.g. from a CLI flag.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if `raw` is not an http(s) url.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(raw)?;
        Ok(self)
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|_| ConfigError::InvalidBaseUrl(raw.to_owned()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(url)
}
