//! # Records and Drafts
//!
//! The three persisted record kinds. Each has a draft type without an id;
//! a store turns a draft into a record when it assigns the id, so a record
//! in hand has always been persisted.
//!
//! Records are immutable once created: there are no update operations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::identity::{LawReferenceId, PolicyId, ValidationResultId};
use crate::status::ValidationStatus;

/// A persisted record whose id is assigned by the store on insert.
pub trait Record: Clone + Send + Sync + 'static {
    /// Typed identifier.
    type Id: Copy + Ord + Send + Sync + std::fmt::Debug + From<i64> + Into<i64>;
    /// The record without its id.
    type Draft;

    /// The store-assigned identifier.
    fn id(&self) -> Self::Id;

    /// Combine a draft with the id the store assigned to it.
    fn assign(draft: Self::Draft, id: Self::Id) -> Self;
}

// -- Policy -------------------------------------------------------------------

/// A tracked government notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    /// Store-assigned identifier.
    pub id: PolicyId,
    /// Notice title.
    pub title: String,
    /// State (region) the notice was issued in.
    pub state: String,
    /// Issuing department.
    pub department: String,
    /// Date the notice was published.
    pub publication_date: NaiveDate,
    /// Publication year, used for filtering and yearly counts.
    pub year: i32,
    /// Where the notice was found.
    pub source_url: String,
    /// Short description.
    pub summary: String,
    /// Current compliance status.
    pub validation_status: ValidationStatus,
}

/// A [`Policy`] that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPolicy {
    /// Notice title.
    pub title: String,
    /// State (region) the notice was issued in.
    pub state: String,
    /// Issuing department.
    pub department: String,
    /// Date the notice was published.
    pub publication_date: NaiveDate,
    /// Publication year.
    pub year: i32,
    /// Where the notice was found.
    pub source_url: String,
    /// Short description.
    pub summary: String,
    /// Initial compliance status.
    pub validation_status: ValidationStatus,
}

impl Record for Policy {
    type Id = PolicyId;
    type Draft = NewPolicy;

    fn id(&self) -> PolicyId {
        self.id
    }

    fn assign(draft: NewPolicy, id: PolicyId) -> Self {
        Self {
            id,
            title: draft.title,
            state: draft.state,
            department: draft.department,
            publication_date: draft.publication_date,
            year: draft.year,
            source_url: draft.source_url,
            summary: draft.summary,
            validation_status: draft.validation_status,
        }
    }
}

// -- Law reference ------------------------------------------------------------

/// A citation to a statute section that policies are validated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LawReference {
    /// Store-assigned identifier.
    pub id: LawReferenceId,
    /// Name of the act.
    pub law_name: String,
    /// Cited section.
    pub section: String,
    /// Jurisdiction the act applies in.
    pub jurisdiction: String,
    /// Date the act took effect.
    pub effective_date: NaiveDate,
}

/// A [`LawReference`] that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLawReference {
    /// Name of the act.
    pub law_name: String,
    /// Cited section.
    pub section: String,
    /// Jurisdiction the act applies in.
    pub jurisdiction: String,
    /// Date the act took effect.
    pub effective_date: NaiveDate,
}

impl Record for LawReference {
    type Id = LawReferenceId;
    type Draft = NewLawReference;

    fn id(&self) -> LawReferenceId {
        self.id
    }

    fn assign(draft: NewLawReference, id: LawReferenceId) -> Self {
        Self {
            id,
            law_name: draft.law_name,
            section: draft.section,
            jurisdiction: draft.jurisdiction,
            effective_date: draft.effective_date,
        }
    }
}

// -- Validation result --------------------------------------------------------

/// Outcome of checking one policy against one law reference.
///
/// Refers to both by id; it never owns them. Stores must refuse a result
/// whose policy or law reference does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Store-assigned identifier.
    pub id: ValidationResultId,
    /// The policy that was checked.
    pub policy_id: PolicyId,
    /// The law it was checked against.
    pub law_reference_id: LawReferenceId,
    /// Verdict label, e.g. `"Needs Review"`.
    pub result: String,
    /// Free-text remarks.
    pub remarks: String,
    /// Date of the check.
    pub checked_on: NaiveDate,
}

/// A [`ValidationResult`] that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewValidationResult {
    /// The policy that was checked.
    pub policy_id: PolicyId,
    /// The law it was checked against.
    pub law_reference_id: LawReferenceId,
    /// Verdict label.
    pub result: String,
    /// Free-text remarks.
    pub remarks: String,
    /// Date of the check.
    pub checked_on: NaiveDate,
}

impl Record for ValidationResult {
    type Id = ValidationResultId;
    type Draft = NewValidationResult;

    fn id(&self) -> ValidationResultId {
        self.id
    }

    fn assign(draft: NewValidationResult, id: ValidationResultId) -> Self {
        Self {
            id,
            policy_id: draft.policy_id,
            law_reference_id: draft.law_reference_id,
            result: draft.result,
            remarks: draft.remarks,
            checked_on: draft.checked_on,
        }
    }
}
