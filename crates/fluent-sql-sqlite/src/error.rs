//! Mapping from `sqlx` errors to the builder's error taxonomy.

use fluent_sql_core::QueryError;
use sqlx::error::ErrorKind;

/// Primary SQLite result code for constraint failures.
const SQLITE_CONSTRAINT: i32 = 19;

/// Classifies a `sqlx` error raised while running a statement.
pub(crate) fn classify(err: sqlx::Error) -> QueryError {
    match err {
        sqlx::Error::Database(db) => {
            let message = db.message().to_owned();
            match db.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => QueryError::ConstraintViolation(message),
                _ if is_constraint_code(db.code().as_deref()) => {
                    QueryError::ConstraintViolation(message)
                }
                _ => QueryError::Database(message),
            }
        }
        sqlx::Error::Io(e) => QueryError::Connection(e.to_string()),
        e @ (sqlx::Error::Configuration(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed) => QueryError::Connection(e.to_string()),
        other => QueryError::Database(other.to_string()),
    }
}

/// Classifies a `sqlx` error raised while opening or closing a connection.
pub(crate) fn connection(err: sqlx::Error) -> QueryError {
    QueryError::Connection(err.to_string())
}

/// SQLite reports extended codes; the low byte is the primary code.
fn is_constraint_code(code: Option<&str>) -> bool {
    code.and_then(|c| c.parse::<i32>().ok())
        .is_some_and(|c| c & 0xff == SQLITE_CONSTRAINT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_codes() {
        assert!(is_constraint_code(Some("19")));
        assert!(is_constraint_code(Some("2067")));
        assert!(is_constraint_code(Some("1299")));
        assert!(!is_constraint_code(Some("1")));
        assert!(!is_constraint_code(Some("abc")));
        assert!(!is_constraint_code(None));
    }

    #[test]
    fn test_io_is_connection_error() {
        let err = sqlx::Error::Io(std::io::Error::other("disk gone"));
        assert!(matches!(classify(err), QueryError::Connection(_)));
        assert!(matches!(
            classify(sqlx::Error::WorkerCrashed),
            QueryError::Connection(_)
        ));
    }

    #[test]
    fn test_other_errors_are_database_errors() {
        assert!(matches!(
            classify(sqlx::Error::RowNotFound),
            QueryError::Database(_)
        ));
    }
}
