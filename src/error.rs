//! Error types for policy construction and transformation.
//!
//! Provides strongly-typed errors using `thiserror` so callers can branch
//! on the failure kind instead of parsing message strings.

use thiserror::Error;

/// Errors raised while building policy models or mapping them to and from
/// the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// A model field failed its structural check at construction time.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },
    /// A rule's operation tag has no transformer entry.
    #[error("unknown operation {operation}")]
    UnknownOperation { operation: String },
    /// A criterion's type tag is not recognized for its operation.
    #[error("unknown criterion type {criterion_type} for operation {operation}")]
    UnknownCriterionType {
        operation: String,
        criterion_type: String,
    },
}

/// Result type alias for policy operations.
pub type Result<T> = core::result::Result<T, PolicyError>;
