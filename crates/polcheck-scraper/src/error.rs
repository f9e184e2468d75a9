//! Fetch error types.
//!
//! Every variant means the same thing to the pipeline: the page could not be
//! fetched and the static department list is used instead. The variants only
//! exist so the warning says why.

/// The department page could not be fetched.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection, TLS, timeout or redirect failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
    /// The server answered with status 400 or above.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    /// The response body could not be read.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        source: reqwest::Error,
    },
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// No HTTP client is available, so nothing was requested.
    #[error("cannot fetch {url}: {reason}")]
    Unavailable { url: String, reason: String },
}
