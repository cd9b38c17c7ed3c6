//! Error types shared by every builder and executor.

use thiserror::Error;

/// Errors produced while building, rendering, or executing a statement.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// Malformed builder input, detected before anything reaches the store.
    #[error("validation error: {0}")]
    Validation(String),

    /// The store rejected the statement on a uniqueness, not-null,
    /// foreign-key, or check constraint.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The store is unreachable or the connection handle is unusable.
    #[error("connection error: {0}")]
    Connection(String),

    /// Any other rejection from the store.
    #[error("database error: {0}")]
    Database(String),

    /// A value came back in a storage class outside [`SqlValue`](crate::SqlValue).
    #[error("unsupported type `{type_name}` in column `{column}`")]
    UnsupportedType {
        /// Column the value was read from.
        column: String,
        /// Storage class reported by the store.
        type_name: String,
    },

    /// An executor answered with the wrong result shape for the statement.
    #[error("expected {expected} result, executor returned {found}")]
    UnexpectedResult {
        /// Shape the statement kind requires.
        expected: &'static str,
        /// Shape that was returned.
        found: &'static str,
    },
}

impl QueryError {
    /// Shorthand for a [`QueryError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns true for errors raised by the store's constraint checks.
    #[must_use]
    pub const fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation(_))
    }
}

/// Result type alias for builder and executor operations.
pub type Result<T> = std::result::Result<T, QueryError>;
