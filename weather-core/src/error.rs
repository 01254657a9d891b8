use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the forecast service.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("No area selected. Pass an area code or run `weather areas` to list them.")]
    NoArea,

    #[error("Invalid area code '{0}': expected digits only, e.g. 130000")]
    InvalidAreaCode(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} failed with status {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Forecast for area {0} contained no data")]
    MissingData(String),
}

/// Failures reading or writing the local forecast cache.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to create database directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid timestamp '{value}' in cache: {source}")]
    InvalidTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
