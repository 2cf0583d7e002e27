use std::time::Duration;

use thiserror::Error;

/// Errors from the catalog API client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("request for anime {id} timed out after {after:?}")]
    Timeout { id: String, after: Duration },

    #[error("library record has no anime id")]
    MissingId,

    #[error("invalid base URL: {0}")]
    InvalidUrl(String),
}
