//! # Record Identifiers
//!
//! Store-assigned surrogate keys. Ids are positive integers handed out on
//! insert (by the in-memory store or by a Postgres `BIGSERIAL`), so the
//! wrappers carry an `i64` rather than a UUID.

use serde::{Deserialize, Serialize};

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw store key.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Access the raw store key.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

record_id! {
    /// Identifier of a [`Policy`](crate::Policy).
    PolicyId
}

record_id! {
    /// Identifier of a [`LawReference`](crate::LawReference).
    LawReferenceId
}

record_id! {
    /// Identifier of a [`ValidationResult`](crate::ValidationResult).
    ValidationResultId
}
