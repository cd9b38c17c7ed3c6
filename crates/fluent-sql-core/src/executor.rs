//! The seam between statement building and a concrete store.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{QueryError, Result};
use crate::render::RenderedStatement;
use crate::value::SqlValue;

/// Runs rendered statements against a store.
///
/// Implementations bind `statement.params` positionally to the `?`
/// placeholders in `statement.sql` and never interpolate values into text.
pub trait Executor {
    /// Executes one statement. Each call commits on its own.
    fn run(&mut self, statement: &RenderedStatement) -> Result<RawResult>;
}

/// What the store returned for one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResult {
    /// Result rows of a SELECT.
    Rows(Vec<Row>),
    /// Affected-row count of an UPDATE or DELETE.
    Affected(u64),
    /// Generated row identifier of an INSERT.
    Inserted(i64),
}

impl RawResult {
    const fn shape(&self) -> &'static str {
        match self {
            Self::Rows(_) => "rows",
            Self::Affected(_) => "affected-count",
            Self::Inserted(_) => "inserted-id",
        }
    }

    /// Unwraps a row set.
    pub fn into_rows(self) -> Result<Vec<Row>> {
        match self {
            Self::Rows(rows) => Ok(rows),
            other => Err(QueryError::UnexpectedResult {
                expected: "rows",
                found: other.shape(),
            }),
        }
    }

    /// Unwraps an affected-row count.
    pub fn into_affected(self) -> Result<u64> {
        match self {
            Self::Affected(n) => Ok(n),
            other => Err(QueryError::UnexpectedResult {
                expected: "affected-count",
                found: other.shape(),
            }),
        }
    }

    /// Unwraps a generated identifier.
    pub fn into_inserted(self) -> Result<i64> {
        match self {
            Self::Inserted(id) => Ok(id),
            other => Err(QueryError::UnexpectedResult {
                expected: "inserted-id",
                found: other.shape(),
            }),
        }
    }
}

/// One result row: column name to value, in the order the store returned
/// the columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, SqlValue)>,
}

impl Row {
    /// Creates an empty row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Appends a column.
    pub fn push(&mut self, column: impl Into<String>, value: SqlValue) {
        self.columns.push((column.into(), value));
    }

    /// Looks a value up by column name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Looks a value up by position.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&SqlValue> {
        self.columns.get(index).map(|(_, value)| value)
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Values in column order.
    pub fn values(&self) -> impl Iterator<Item = &SqlValue> {
        self.columns.iter().map(|(_, value)| value)
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the row has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, SqlValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, SqlValue)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Rows returned by `fetch`, consumed front to back.
#[derive(Debug)]
pub struct Rows {
    inner: std::vec::IntoIter<Row>,
}

impl Rows {
    pub(crate) fn new(rows: Vec<Row>) -> Self {
        Self {
            inner: rows.into_iter(),
        }
    }
}

impl Iterator for Rows {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Rows {}
