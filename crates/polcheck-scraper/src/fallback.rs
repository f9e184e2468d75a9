//! Fallbacks used when no department anchors were found.

use polcheck_core::ScrapedDepartment;
use url::Url;

use crate::anchors::strip_tags;

/// Name used for the revenue department when it has to be synthesized.
pub const REVENUE_DEPARTMENT: &str = "Department of Revenue";

/// Name used for the urban development department when it has to be
/// synthesized.
pub const URBAN_DEVELOPMENT_DEPARTMENT: &str = "Department of Urban Development";

/// Search the flattened page text for the two target departments.
///
/// The padded tokens (`" revenue "`) only match a word with whitespace on
/// both sides, so a term at the very start or end of the page text is only
/// found through the full `"department of ..."` phrase.
pub fn scan_page_body(html: &str, base: &Url) -> Vec<ScrapedDepartment> {
    let text = strip_tags(html).to_lowercase();
    let mut departments = Vec::with_capacity(2);

    if text.contains("department of revenue") || text.contains(" revenue ") {
        departments.push(synthesized(REVENUE_DEPARTMENT, base));
    }
    if text.contains("department of urban development") || text.contains(" urban development ") {
        departments.push(synthesized(URBAN_DEVELOPMENT_DEPARTMENT, base));
    }

    departments
}

/// The fixed two-entry list, Revenue first. Never empty.
pub fn static_departments(base: &Url) -> Vec<ScrapedDepartment> {
    vec![
        synthesized(REVENUE_DEPARTMENT, base),
        synthesized(URBAN_DEVELOPMENT_DEPARTMENT, base),
    ]
}

fn synthesized(name: &str, base: &Url) -> ScrapedDepartment {
    ScrapedDepartment {
        name: name.to_string(),
        source_url: base.to_string(),
    }
}
