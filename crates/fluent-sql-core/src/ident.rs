//! Identifier rules for names that are spliced into SQL text.
//!
//! Table and column names cannot be bound as parameters, so they are
//! checked against SQLite's unquoted identifier grammar instead. A single
//! qualifier (`users.id`) is accepted for columns.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{QueryError, Result};

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

static QUALIFIED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$").expect("qualified pattern")
});

/// Checks a table name.
pub fn validate_table(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(QueryError::validation("table name must not be empty"));
    }
    if !IDENTIFIER.is_match(name) {
        return Err(QueryError::Validation(format!(
            "invalid table name `{name}`"
        )));
    }
    Ok(())
}

/// Checks a column name, optionally qualified by a table.
pub fn validate_column(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(QueryError::validation("column name must not be empty"));
    }
    if !QUALIFIED.is_match(name) {
        return Err(QueryError::Validation(format!(
            "invalid column name `{name}`"
        )));
    }
    Ok(())
}
