//! Discovery strategies.
//!
//! Each strategy inspects a fetched page and either produces a non-empty
//! department list or declines. The scraper tries them in order; the static
//! list is the terminal step and is not a strategy because it cannot decline.

use std::fmt;

use polcheck_core::ScrapedDepartment;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::anchors::extract_anchors;
use crate::departments::select_departments;
use crate::fallback::scan_page_body;

/// Which step of the cascade produced the department list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoverySource {
    /// Matching `<a>` elements on the page.
    Anchors,
    /// Keyword scan of the flattened page text.
    PageBody,
    /// The fixed two-entry list.
    StaticFallback,
}

impl DiscoverySource {
    /// Stable label, used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anchors => "anchors",
            Self::PageBody => "page_body",
            Self::StaticFallback => "static_fallback",
        }
    }
}

impl fmt::Display for DiscoverySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of the discovery cascade.
pub trait DiscoveryStrategy: Send + Sync {
    /// Reported when this strategy produced the result.
    fn source(&self) -> DiscoverySource;

    /// Departments found in `html`, or `None` if there are none.
    fn discover(&self, html: &str, base: &Url) -> Option<Vec<ScrapedDepartment>>;
}

/// Target-department anchors, resolved and deduplicated.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnchorStrategy;

impl DiscoveryStrategy for AnchorStrategy {
    fn source(&self) -> DiscoverySource {
        DiscoverySource::Anchors
    }

    fn discover(&self, html: &str, base: &Url) -> Option<Vec<ScrapedDepartment>> {
        non_empty(select_departments(&extract_anchors(html), base))
    }
}

/// Keyword scan of the page text, used when no anchor matched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageBodyStrategy;

impl DiscoveryStrategy for PageBodyStrategy {
    fn source(&self) -> DiscoverySource {
        DiscoverySource::PageBody
    }

    fn discover(&self, html: &str, base: &Url) -> Option<Vec<ScrapedDepartment>> {
        non_empty(scan_page_body(html, base))
    }
}

/// The default cascade: anchors, then page body.
pub fn default_strategies() -> Vec<Box<dyn DiscoveryStrategy>> {
    vec![Box::new(AnchorStrategy), Box::new(PageBodyStrategy)]
}

fn non_empty(departments: Vec<ScrapedDepartment>) -> Option<Vec<ScrapedDepartment>> {
    (!departments.is_empty()).then_some(departments)
}
