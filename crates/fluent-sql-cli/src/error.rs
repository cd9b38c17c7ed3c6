//! Error types for the command-line tool.

use fluent_sql_core::QueryError;

/// Errors that can occur while running a command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from building or executing a statement.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Writing output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON output failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The email is already taken by another user.
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    /// No user with the given ID.
    #[error("User with ID {0} not found")]
    UserNotFound(i64),

    /// `update-user` was called without any field to change.
    #[error("Nothing to update; pass --name, --email or --age")]
    NothingToUpdate,

    /// A result row lacks a column the model needs.
    #[error("Missing column '{0}' in result row")]
    MissingColumn(&'static str),

    /// A result column holds a value of the wrong type.
    #[error("Column '{column}' holds {found}, expected {expected}")]
    ColumnType {
        /// Column name.
        column: &'static str,
        /// Type the model needs.
        expected: &'static str,
        /// Type that was read.
        found: &'static str,
    },
}

impl CliError {
    /// Maps a constraint violation on insert/update of `email` to
    /// [`CliError::DuplicateEmail`]; everything else passes through.
    pub(crate) fn from_email_write(error: QueryError, email: Option<&str>) -> Self {
        match email {
            Some(email) if error.is_constraint_violation() => Self::DuplicateEmail(email.to_owned()),
            _ => Self::Query(error),
        }
    }
}

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, CliError>;
