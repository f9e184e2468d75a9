//! Scraper configuration.
//!
//! One page URL, one User-Agent and two timeouts. The URL defaults to the
//! Karnataka Mahiti Kanaja department listing and can be overridden through
//! `POLCHECK_DEPARTMENT_SOURCE_URL` or explicit construction.

use std::time::Duration;

use url::Url;

/// Department listing page used when nothing else is configured.
pub const DEFAULT_DEPARTMENT_SOURCE_URL: &str = "https://mahitikanaja.karnataka.gov.in/Department";

/// User-Agent sent with the department page request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (polcheck Department Scraper)";

/// Environment variable that overrides the department page URL.
pub const SOURCE_URL_ENV: &str = "POLCHECK_DEPARTMENT_SOURCE_URL";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the department scraper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    /// Page that lists the departments. Also the base for relative links and
    /// the URL every fallback department points at.
    pub department_page_url: Url,
    /// Sent as the `User-Agent` header.
    pub user_agent: String,
    /// Upper bound on establishing the connection.
    pub connect_timeout: Duration,
    /// Upper bound on the whole request, body included.
    pub request_timeout: Duration,
}

impl ScraperConfig {
    /// Configuration for the given page with the default agent and timeouts.
    pub fn new(department_page_url: Url) -> Self {
        Self {
            department_page_url,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: CONNECT_TIMEOUT,
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Parse the page URL from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] if `raw` is not an absolute URL.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(raw.trim())
            .map_err(|e| ConfigError::InvalidUrl(raw.to_string(), e.to_string()))?;
        Ok(Self::new(url))
    }

    /// Load configuration from `POLCHECK_DEPARTMENT_SOURCE_URL`, falling back
    /// to [`DEFAULT_DEPARTMENT_SOURCE_URL`] when it is unset or blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(SOURCE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DEPARTMENT_SOURCE_URL.to_string());
        Self::parse(&raw)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configured page URL could not be parsed.
    #[error("invalid department source URL {0:?}: {1}")]
    InvalidUrl(String, String),
}
