#![deny(missing_docs)]

//! # polcheck-core — Foundational Types for polcheck
//!
//! Every other crate in the workspace depends on this one. It has no internal
//! crate dependencies and only `serde`, `thiserror` and `chrono` from the
//! external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype identifiers.** [`PolicyId`], [`LawReferenceId`] and
//!    [`ValidationResultId`] wrap the store-assigned surrogate keys so a
//!    validation result can never be looked up with a policy id.
//!
//! 2. **Drafts vs records.** A record only exists once a store has assigned
//!    it an id. Callers build a draft ([`NewPolicy`], ...) and hand it to a
//!    store, which produces the record through [`Record::assign`].
//!
//! 3. **One classification rule.** Whether a department is a revenue
//!    department decides both the policy status and the law it is checked
//!    against; [`department::is_revenue_department`] is the single place that
//!    rule lives.

pub mod department;
pub mod error;
pub mod identity;
pub mod records;
pub mod status;

pub use department::{is_revenue_department, ScrapedDepartment};
pub use error::ValidationError;
pub use identity::{LawReferenceId, PolicyId, ValidationResultId};
pub use records::{
    LawReference, NewLawReference, NewPolicy, NewValidationResult, Policy, Record,
    ValidationResult,
};
pub use status::ValidationStatus;
