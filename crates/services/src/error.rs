//! Shared error types for the services crate.

use thiserror::Error;

pub use reqwest::StatusCode;

use edx_core::model::{AccountError, ParseIdError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// The two buckets every remote failure is sorted into before it reaches a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Host could not be resolved or reached.
    Connectivity,
    /// Anything else: HTTP status, payload, local cache.
    Generic,
}

/// Errors emitted by the profile and course interactors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProfileServiceError {
    #[error("no connection: {0}")]
    NoConnection(String),
    #[error("request failed with status {0}")]
    HttpStatus(StatusCode),
    #[error(transparent)]
    Http(reqwest::Error),
    #[error("invalid endpoint: {0}")]
    Endpoint(String),
    #[error(transparent)]
    Account(#[from] AccountError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ProfileServiceError {
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::NoConnection(_) => FailureKind::Connectivity,
            _ => FailureKind::Generic,
        }
    }
}

impl From<reqwest::Error> for ProfileServiceError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest reports DNS failures as connect errors.
        if err.is_connect() || err.is_timeout() {
            Self::NoConnection(err.to_string())
        } else {
            Self::Http(err)
        }
    }
}

/// Errors emitted while reading `ApiConfig`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    #[error(transparent)]
    Username(#[from] ParseIdError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Client(#[from] reqwest::Error),
}
