//! In-memory description of one SQL operation before rendering.

use std::fmt;

use crate::error::{QueryError, Result};
use crate::ident;
use crate::value::SqlValue;

/// The four statement kinds the builders produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    /// SELECT.
    Select,
    /// INSERT.
    Insert,
    /// UPDATE.
    Update,
    /// DELETE.
    Delete,
}

impl StatementKind {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::Insert => "INSERT",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Parses a direction token, ignoring case.
    pub fn parse(token: &str) -> Result<Self> {
        if token.eq_ignore_ascii_case("asc") {
            Ok(Self::Asc)
        } else if token.eq_ignore_ascii_case("desc") {
            Ok(Self::Desc)
        } else {
            Err(QueryError::Validation(format!(
                "invalid sort direction `{token}`, expected ASC or DESC"
            )))
        }
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTerm {
    /// Column to order by.
    pub column: String,
    /// Direction.
    pub direction: SortDirection,
}

impl OrderTerm {
    /// Parses `"column"` or `"column ASC|DESC"`.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut parts = spec.split_whitespace();
        let column = parts
            .next()
            .ok_or_else(|| QueryError::validation("order-by spec must not be empty"))?;
        ident::validate_column(column)?;
        let direction = match parts.next() {
            Some(token) => SortDirection::parse(token)?,
            None => SortDirection::Asc,
        };
        if let Some(extra) = parts.next() {
            return Err(QueryError::Validation(format!(
                "unexpected `{extra}` in order-by spec `{spec}`"
            )));
        }
        Ok(Self {
            column: String::from(column),
            direction,
        })
    }
}

/// A (column, value) pair in an INSERT column list or UPDATE SET clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Target column.
    pub column: String,
    /// Value bound for the column.
    pub value: SqlValue,
}

/// A raw conditional fragment and the values bound to its placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    /// The fragment, with `?` placeholders.
    pub fragment: String,
    /// Values for the placeholders, in order.
    pub params: Vec<SqlValue>,
}

/// One query, as accumulated by a builder.
///
/// `kind` and `table` are fixed by [`Statement::new`]; every other part is
/// filled in by the builder that owns the statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    kind: StatementKind,
    table: String,
    pub(crate) fields: Vec<String>,
    pub(crate) assignments: Vec<Assignment>,
    pub(crate) predicate: Option<Predicate>,
    pub(crate) ordering: Vec<OrderTerm>,
    pub(crate) limit: Option<i64>,
}

impl Statement {
    /// Creates an empty statement of the given kind against `table`.
    pub fn new(kind: StatementKind, table: &str) -> Result<Self> {
        ident::validate_table(table)?;
        Ok(Self {
            kind,
            table: String::from(table),
            fields: Vec::new(),
            assignments: Vec::new(),
            predicate: None,
            ordering: Vec::new(),
            limit: None,
        })
    }

    /// Statement kind.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        self.kind
    }

    /// Target table.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Projected fields; empty means all columns.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Column/value pairs, in insertion order.
    #[must_use]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// WHERE fragment and its parameters.
    #[must_use]
    pub const fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    /// ORDER BY terms.
    #[must_use]
    pub fn ordering(&self) -> &[OrderTerm] {
        &self.ordering
    }

    /// Row cap.
    #[must_use]
    pub const fn limit(&self) -> Option<i64> {
        self.limit
    }

    /// Sets `column` to `value`. A column that is already assigned keeps its
    /// position and takes the new value.
    pub(crate) fn assign(&mut self, column: String, value: SqlValue) {
        if let Some(existing) = self.assignments.iter_mut().find(|a| a.column == column) {
            existing.value = value;
        } else {
            self.assignments.push(Assignment { column, value });
        }
    }

    pub(crate) fn set_predicate(&mut self, fragment: &str, params: Vec<SqlValue>) {
        self.predicate = Some(Predicate {
            fragment: String::from(fragment),
            params,
        });
    }
}
