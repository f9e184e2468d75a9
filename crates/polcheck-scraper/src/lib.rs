//! # polcheck-scraper — Department Discovery
//!
//! Finds the revenue and urban development departments on a government
//! department listing page.
//!
//! ## Pipeline
//!
//! 1. **Fetch** the configured page once ([`HttpFetcher`]): 20 s connect,
//!    30 s total, redirects followed, no retries.
//! 2. **Anchors**: scan `<a href="...">text</a>` pairs, keep those whose text
//!    mentions a target department, resolve links, deduplicate by text.
//! 3. **Page body**: if no anchor matched, search the flattened page text.
//! 4. **Static list**: if the fetch failed or nothing matched, use
//!    `Department of Revenue` and `Department of Urban Development`, both
//!    pointing at the page URL.
//!
//! Discovery never fails. Fetch problems are logged and the static list is
//! returned; the [`Discovery`] says which step produced the result.

pub mod anchors;
pub mod config;
pub mod departments;
pub mod error;
pub mod fallback;
pub mod fetch;
pub mod strategy;

pub use anchors::{extract_anchors, Anchor};
pub use config::{ConfigError, ScraperConfig};
pub use error::FetchError;
pub use fetch::{ConfiguredFetcher, FetchHtml, HttpFetcher};
pub use strategy::{DiscoverySource, DiscoveryStrategy};

use std::fmt;

use polcheck_core::ScrapedDepartment;
use serde::Serialize;
use url::Url;

/// Departments found by one run of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discovery {
    /// The step that produced `departments`.
    pub source: DiscoverySource,
    /// Never empty.
    pub departments: Vec<ScrapedDepartment>,
}

/// Fetches the department page and runs the discovery cascade over it.
pub struct DepartmentScraper<F = HttpFetcher> {
    fetcher: F,
    page_url: Url,
    strategies: Vec<Box<dyn DiscoveryStrategy>>,
}

impl DepartmentScraper<HttpFetcher> {
    /// Scraper using a real HTTP client built from `config`.
    pub fn new(config: &ScraperConfig) -> Result<Self, FetchError> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::with_fetcher(fetcher, config.department_page_url.clone()))
    }
}

impl DepartmentScraper<ConfiguredFetcher> {
    /// Scraper that never fails to construct. If the HTTP client cannot be
    /// built, discovery returns the static department list.
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::with_fetcher(
            ConfiguredFetcher::new(config),
            config.department_page_url.clone(),
        )
    }
}

impl<F: FetchHtml> DepartmentScraper<F> {
    /// Scraper over any page source, with the default cascade.
    pub fn with_fetcher(fetcher: F, page_url: Url) -> Self {
        Self {
            fetcher,
            page_url,
            strategies: strategy::default_strategies(),
        }
    }

    /// The page source.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// The configured department page.
    pub fn page_url(&self) -> &Url {
        &self.page_url
    }

    /// Fetch the page and discover departments.
    pub async fn discover(&self) -> Discovery {
        match self.fetcher.fetch(&self.page_url).await {
            Ok(html) => self.discover_in(&html),
            Err(e) => {
                tracing::warn!(
                    url = %self.page_url,
                    error = %e,
                    "department page fetch failed, using static department list"
                );
                self.static_discovery()
            }
        }
    }

    /// Run the cascade over an already fetched page.
    pub fn discover_in(&self, html: &str) -> Discovery {
        for strategy in &self.strategies {
            if let Some(departments) = strategy.discover(html, &self.page_url) {
                tracing::info!(
                    source = %strategy.source(),
                    count = departments.len(),
                    "departments discovered"
                );
                return Discovery {
                    source: strategy.source(),
                    departments,
                };
            }
        }

        tracing::warn!(
            url = %self.page_url,
            "no departments found on page, using static department list"
        );
        self.static_discovery()
    }

    /// Only the department list from [`discover`](Self::discover).
    pub async fn fetch_target_departments(&self) -> Vec<ScrapedDepartment> {
        self.discover().await.departments
    }

    fn static_discovery(&self) -> Discovery {
        Discovery {
            source: DiscoverySource::StaticFallback,
            departments: fallback::static_departments(&self.page_url),
        }
    }
}

impl<F: fmt::Debug> fmt::Debug for DepartmentScraper<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sources: Vec<_> = self.strategies.iter().map(|s| s.source()).collect();
        f.debug_struct("DepartmentScraper")
            .field("fetcher", &self.fetcher)
            .field("page_url", &self.page_url.as_str())
            .field("strategies", &sources)
            .finish()
    }
}
