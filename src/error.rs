//! Error taxonomy for the catalog client, the collection store and the rules

use reqwest::StatusCode;
use thiserror::Error;

/// Violations of a domain rule rather than I/O failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("rename suffix index {index} is past the largest representable Fibonacci term")]
    RenameOverflow { index: usize },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("catalog returned {status} for {url}")]
    Status { status: StatusCode, url: String },

    #[error("catalog payload did not match the expected shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference backend error: {0}")]
    Backend(#[from] sqlx::Error),

    #[error("stored collection is corrupt: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to encode collection: {0}")]
    Encode(#[source] serde_json::Error),
}
