//! Fetching the department page.
//!
//! [`FetchHtml`] is the seam between the pipeline and the network. The
//! production implementation is [`HttpFetcher`]; tests substitute canned
//! pages. [`ConfiguredFetcher`] keeps the pipeline running when the client
//! cannot be built.

use std::future::Future;

use reqwest::redirect::Policy;
use url::Url;

use crate::config::ScraperConfig;
use crate::error::FetchError;

const MAX_REDIRECTS: usize = 10;

/// Retrieves a page as text.
pub trait FetchHtml: Send + Sync {
    /// Perform one GET and return the decoded body.
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// One-shot GET over `reqwest` with fixed timeouts and no retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the timeouts and User-Agent from `config`.
    pub fn new(config: &ScraperConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::ClientBuild)?;
        Ok(Self { http })
    }
}

/// An [`HttpFetcher`] if one could be built, otherwise a fetcher whose every
/// request fails with [`FetchError::Unavailable`].
#[derive(Debug, Clone)]
pub enum ConfiguredFetcher {
    Http(HttpFetcher),
    Unavailable { reason: String },
}

impl ConfiguredFetcher {
    /// Build from `config`, logging and degrading if the client build fails.
    pub fn new(config: &ScraperConfig) -> Self {
        match HttpFetcher::new(config) {
            Ok(fetcher) => Self::Http(fetcher),
            Err(e) => {
                tracing::warn!(error = %e, "HTTP client unavailable, department page will not be fetched");
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

impl FetchHtml for ConfiguredFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        match self {
            Self::Http(fetcher) => fetcher.fetch(url).await,
            Self::Unavailable { reason } => Err(FetchError::Unavailable {
                url: url.to_string(),
                reason: reason.clone(),
            }),
        }
    }
}

impl FetchHtml for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = resp.status();
        if status.as_u16() >= 400 {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = resp.bytes().await.map_err(|e| FetchError::Body {
            url: url.to_string(),
            source: e,
        })?;

        // Malformed UTF-8 is replaced rather than rejected.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
