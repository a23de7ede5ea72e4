//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Transport { status: u16, body: String },

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Download failed with HTTP {status}: {url}")]
    Download { status: u16, url: String },

    #[error("Too many redirects ({hops}) while fetching {url}")]
    TooManyRedirects { hops: usize, url: String },

    #[error("Generic error: {0}")]
    Generic(String),
}

impl Error {
    /// Classify a reqwest error into the transport taxonomy.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout(e.to_string())
        } else if e.is_connect() {
            Error::Network(e.to_string())
        } else {
            Error::Http(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
