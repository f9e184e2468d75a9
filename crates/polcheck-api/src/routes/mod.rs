//! # API Route Modules
//!
//! - `policies` — policy listing with filters, yearly counts.
//! - `law_references` — law reference listing.
//! - `validation_results` — validation results, optionally for one policy,
//!   joined with the policy title and law name.

pub mod law_references;
pub mod policies;
pub mod validation_results;
