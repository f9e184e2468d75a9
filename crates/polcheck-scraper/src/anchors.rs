//! Anchor extraction.
//!
//! A tolerant pattern scan, not an HTML parser. Only double-quoted `href`
//! attributes on non-self-closing anchors are recognised; anything else is
//! skipped silently. Callers depend only on [`extract_anchors`], so the scan
//! can be swapped for a real tokenizer without touching them.

use std::sync::LazyLock;

use regex::Regex;

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#)
        .expect("hardcoded anchor pattern is valid")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("hardcoded tag pattern is valid"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("hardcoded whitespace pattern is valid"));

/// An `<a href="...">...</a>` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// The `href` value, trimmed, not yet resolved.
    pub href: String,
    /// Visible text with nested markup flattened.
    pub text: String,
}

/// All anchors in `html`, in document order. Not deduplicated.
pub fn extract_anchors(html: &str) -> Vec<Anchor> {
    ANCHOR
        .captures_iter(html)
        .map(|caps| Anchor {
            href: caps[1].trim().to_string(),
            text: strip_tags(&caps[2]).trim().to_string(),
        })
        .collect()
}

/// Replace every tag with a space and collapse whitespace runs to one space.
///
/// The result is not trimmed.
pub fn strip_tags(fragment: &str) -> String {
    let untagged = TAG.replace_all(fragment, " ");
    WHITESPACE.replace_all(&untagged, " ").into_owned()
}
