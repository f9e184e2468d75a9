//! Department filtering, link resolution and deduplication.

use std::collections::HashSet;

use polcheck_core::ScrapedDepartment;
use url::Url;

use crate::anchors::Anchor;

/// Case-folded substrings that mark an anchor as a target department.
pub const DEPARTMENT_KEYWORDS: [&str; 2] = ["revenue", "urban development"];

/// Whether `text` names one of the target departments.
pub fn is_target_department(text: &str) -> bool {
    let folded = text.to_lowercase();
    DEPARTMENT_KEYWORDS.iter().any(|kw| folded.contains(kw))
}

/// Characters that may never appear unescaped in a URI reference.
const DISALLOWED_URI_CHARS: &[char] = &[' ', '"', '<', '>', '\\', '^', '`', '{', '|', '}'];

/// Whether `href` is a syntactically valid URI reference.
///
/// The `url` crate percent-encodes or tolerates characters that RFC 3986
/// forbids, so those are rejected up front.
fn is_valid_uri_reference(href: &str) -> bool {
    !href
        .chars()
        .any(|c| c.is_control() || DISALLOWED_URI_CHARS.contains(&c))
}

/// Resolve an anchor `href` against the page it was found on.
///
/// Absolute URLs are returned unchanged (not normalized). Relative references
/// are joined onto `base`. Anything that is not a valid URI reference, or
/// cannot be resolved, yields `base`.
pub fn resolve_href(base: &Url, href: &str) -> String {
    if !is_valid_uri_reference(href) {
        return base.to_string();
    }
    match Url::parse(href) {
        Ok(_) => href.to_string(),
        Err(url::ParseError::RelativeUrlWithoutBase) => base
            .join(href)
            .map(String::from)
            .unwrap_or_else(|_| base.to_string()),
        Err(_) => base.to_string(),
    }
}

/// Keep target-department anchors, resolve their links and drop repeats.
///
/// The visible text is the key, compared case-sensitively; the first
/// occurrence's link wins and document order is kept.
pub fn select_departments(anchors: &[Anchor], base: &Url) -> Vec<ScrapedDepartment> {
    let mut seen = HashSet::new();
    let mut departments = Vec::new();

    for anchor in anchors {
        if anchor.text.is_empty() || !is_target_department(&anchor.text) {
            continue;
        }
        if !seen.insert(anchor.text.as_str()) {
            continue;
        }
        departments.push(ScrapedDepartment {
            name: anchor.text.clone(),
            source_url: resolve_href(base, &anchor.href),
        });
    }

    departments
}
