//! Sketch download error types.

use thiserror::Error;

/// Errors from a single sketch request.
///
/// Every variant except [`FetchError::Client`] just moves retrieval on to
/// the next branch; they stay separate so logs tell them apart.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the timeout.
    #[error("Request to {url} timed out")]
    Timeout { url: String },

    /// The server answered with a non-success status.
    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Connection, TLS or body transfer failure.
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
