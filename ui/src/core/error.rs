//! Error types shared by the data sources and preference storage.

use thiserror::Error;

/// Failure while reading standings, metadata or a character history.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} unavailable")]
    Unavailable(&'static str),
}

/// Failure while reading or writing persisted preferences.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Couldn't encode preferences: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("{0} unavailable")]
    Unavailable(&'static str),
}
