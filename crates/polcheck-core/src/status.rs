//! # Validation Status
//!
//! The closed set of compliance states a policy can be in. Serialized in
//! `SCREAMING_SNAKE_CASE` so the wire names (`VALID`, `NEEDS_REVIEW`,
//! `CONFLICT_SUSPECTED`) are also the query-parameter values and the text
//! stored in the database.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::department::is_revenue_department;
use crate::error::ValidationError;

/// Compliance status attached to a [`Policy`](crate::Policy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    /// The policy is consistent with the law it was checked against.
    Valid,
    /// The policy needs a human reviewer.
    NeedsReview,
    /// The policy appears to conflict with the law it was checked against.
    ConflictSuspected,
}

impl ValidationStatus {
    /// All statuses, in declaration order.
    pub const ALL: [ValidationStatus; 3] = [Self::Valid, Self::NeedsReview, Self::ConflictSuspected];

    /// Return the wire name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "VALID",
            Self::NeedsReview => "NEEDS_REVIEW",
            Self::ConflictSuspected => "CONFLICT_SUSPECTED",
        }
    }

    /// Status assigned to a freshly scraped department.
    ///
    /// Revenue departments are flagged for review; everything else starts
    /// out valid.
    pub fn for_department(department: &str) -> Self {
        if is_revenue_department(department) {
            Self::NeedsReview
        } else {
            Self::Valid
        }
    }

    /// Human-readable verdict recorded on a validation result.
    pub fn result_label(&self) -> &'static str {
        match self {
            Self::Valid => "Valid",
            Self::NeedsReview => "Needs Review",
            Self::ConflictSuspected => "Conflict Suspected",
        }
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationStatus {
    type Err = ValidationError;

    /// Parse a wire name. Matching is exact: `needs_review` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidStatus(s.to_string()))
    }
}
