#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Retrieval of the boundary and forecast documents.
//!
//! Both inputs are plain JSON. They are fetched over HTTP with retry
//! ([`retry`]) or read from a local file when running offline. Parsing
//! into domain types happens in the crates that own those types.

pub mod retry;

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Per-request timeout for remote documents.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const USER_AGENT: &str = concat!("vigilance-map/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while loading a source document.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a status that is not retried.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// Final response status.
        status: reqwest::StatusCode,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading a local file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataLocation {
    Url(String),
    File(PathBuf),
}

impl DataLocation {
    /// Interprets `http://` and `https://` strings as URLs, anything else
    /// as a file path.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }
}

impl std::fmt::Display for DataLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Builds the HTTP client used for every remote document.
///
/// # Errors
///
/// Returns [`SourceError`] if the client cannot be built.
pub fn build_client() -> Result<reqwest::Client, SourceError> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(Into::into)
}

/// Loads a JSON document from a URL or a local file.
///
/// # Errors
///
/// Returns [`SourceError`] if the document cannot be fetched, read or
/// parsed.
pub async fn load_json(
    client: &reqwest::Client,
    location: &DataLocation,
) -> Result<serde_json::Value, SourceError> {
    log::info!("Loading {location}");

    match location {
        DataLocation::Url(url) => retry::send_json(|| client.get(url)).await,
        DataLocation::File(path) => {
            let text = tokio::fs::read_to_string(path).await?;
            Ok(serde_json::from_str(&text)?)
        }
    }
}
