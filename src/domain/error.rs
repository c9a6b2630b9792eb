//! Domain validation errors.
//!
//! Returned by constructors that validate inputs against domain rules.

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Check intervals are restricted to a fixed set of hour values.
    #[error("unsupported check interval: {hours} hours (allowed: 3, 6, 9, 12)")]
    UnsupportedInterval {
        /// The rejected hour value.
        hours: i64,
    },
}
