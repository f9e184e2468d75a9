//! # Scraped Departments
//!
//! The transient output of the department scraping pipeline and the
//! keyword rule used to classify departments when seeding.

use serde::{Deserialize, Serialize};

/// A department discovered on (or synthesized for) the listing page.
///
/// Has no identity beyond its name, which is the deduplication key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapedDepartment {
    /// Visible name, original casing preserved.
    pub name: String,
    /// Absolute URL the department was found at.
    pub source_url: String,
}

/// Case-folded substring check for `"revenue"`.
///
/// Decides both the initial [`ValidationStatus`](crate::ValidationStatus) of
/// a seeded policy and which law reference it is validated against.
pub fn is_revenue_department(name: &str) -> bool {
    name.to_lowercase().contains("revenue")
}
