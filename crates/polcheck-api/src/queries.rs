//! Read services over the in-memory stores.

use std::collections::BTreeMap;

use polcheck_core::{Policy, PolicyId, ValidationResult, ValidationStatus};

use crate::state::Store;

/// Optional equality filters for listing policies. Unset fields match
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyFilter {
    pub year: Option<i32>,
    /// Compared case-insensitively.
    pub department: Option<String>,
    pub status: Option<ValidationStatus>,
}

impl PolicyFilter {
    /// Whether `policy` passes every set filter.
    pub fn matches(&self, policy: &Policy) -> bool {
        if self.year.is_some_and(|year| year != policy.year) {
            return false;
        }
        if let Some(department) = &self.department {
            if !eq_ignore_case(department, &policy.department) {
                return false;
            }
        }
        if self.status.is_some_and(|status| status != policy.validation_status) {
            return false;
        }
        true
    }
}

/// Unicode case-insensitive equality without allocating.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// Policies passing `filter`, in id order.
pub fn find_policies(store: &Store<Policy>, filter: &PolicyFilter) -> Vec<Policy> {
    store
        .list()
        .into_iter()
        .filter(|policy| filter.matches(policy))
        .collect()
}

/// Number of policies per publication year, ascending by year.
pub fn yearly_counts(store: &Store<Policy>) -> Vec<(i32, u64)> {
    let mut counts = BTreeMap::new();
    for policy in store.list() {
        *counts.entry(policy.year).or_insert(0u64) += 1;
    }
    counts.into_iter().collect()
}

/// Validation results for one policy, or all of them.
pub fn find_validation_results(
    store: &Store<ValidationResult>,
    policy_id: Option<PolicyId>,
) -> Vec<ValidationResult> {
    let all = store.list();
    match policy_id {
        Some(id) => all.into_iter().filter(|r| r.policy_id == id).collect(),
        None => all,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use polcheck_core::NewPolicy;

    fn add(store: &Store<Policy>, department: &str, year: i32) -> Policy {
        store.create(NewPolicy {
            title: format!("{department} - Latest Department Listing"),
            state: "Karnataka".into(),
            department: department.into(),
            publication_date: NaiveDate::from_ymd_opt(year, 6, 1).unwrap(),
            year,
            source_url: "https://x.test/Department".into(),
            summary: String::new(),
            validation_status: ValidationStatus::for_department(department),
        })
    }

    fn sample() -> Store<Policy> {
        let store = Store::new();
        add(&store, "Department of Revenue", 2025);
        add(&store, "Department of Urban Development", 2026);
        add(&store, "Department of Revenue", 2026);
        store
    }

    #[test]
    fn empty_filter_returns_everything() {
        assert_eq!(find_policies(&sample(), &PolicyFilter::default()).len(), 3);
    }

    #[test]
    fn department_matches_ignoring_case() {
        let filter = PolicyFilter {
            department: Some("department OF revenue".into()),
            ..Default::default()
        };
        let found = find_policies(&sample(), &filter);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.department == "Department of Revenue"));
    }

    #[test]
    fn department_is_not_a_substring_match() {
        let filter = PolicyFilter {
            department: Some("revenue".into()),
            ..Default::default()
        };
        assert!(find_policies(&sample(), &filter).is_empty());
    }

    #[test]
    fn case_folding_covers_non_ascii_and_length() {
        assert!(eq_ignore_case("DÉPARTEMENT", "département"));
        assert!(!eq_ignore_case("Revenue", "Revenue Dept"));
        assert!(!eq_ignore_case("", "x"));
        assert!(eq_ignore_case("", ""));
    }

    #[test]
    fn filters_combine() {
        let filter = PolicyFilter {
            year: Some(2026),
            status: Some(ValidationStatus::NeedsReview),
            department: None,
        };
        let found = find_policies(&sample(), &filter);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id.get(), 3);
    }

    #[test]
    fn yearly_counts_ascend_by_year() {
        let store = sample();
        add(&store, "Department of Revenue", 2019);
        assert_eq!(yearly_counts(&store), vec![(2019, 1), (2025, 1), (2026, 2)]);
    }

    #[test]
    fn yearly_counts_of_empty_store() {
        assert!(yearly_counts(&Store::new()).is_empty());
    }
}
