//! UPDATE statement builder.

use tracing::warn;

use crate::error::Result;
use crate::executor::Executor;
use crate::render::{render, RenderedStatement};
use crate::statement::{Statement, StatementKind};
use crate::value::ToSqlValue;

/// Builds and runs an UPDATE.
///
/// **Warning**: without [`where_clause`](Self::where_clause) every row in
/// the table is updated. That is allowed; callers that expose it to users
/// should confirm first.
pub struct UpdateBuilder<'e, E: ?Sized> {
    executor: &'e mut E,
    statement: Statement,
}

impl<'e, E: Executor + ?Sized> UpdateBuilder<'e, E> {
    /// Starts a statement against `table`, bound to `executor`.
    pub fn new(executor: &'e mut E, table: &str) -> Result<Self> {
        Ok(Self {
            executor,
            statement: Statement::new(StatementKind::Update, table)?,
        })
    }

    /// Adds or overwrites a SET assignment.
    #[must_use]
    pub fn set<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        self.statement
            .assign(String::from(column), value.to_sql_value());
        self
    }

    /// Sets the WHERE fragment and its parameters, replacing any earlier one.
    ///
    /// Only anonymous `?` placeholders are accepted, bound in order; `?` inside
    /// quotes or comments is not a placeholder. For a fragment without
    /// placeholders pass `params![]`, since an empty array literal has no
    /// element type to infer.
    #[must_use]
    pub fn where_clause<I>(mut self, fragment: &str, params: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToSqlValue,
    {
        let params = params.into_iter().map(ToSqlValue::to_sql_value).collect();
        self.statement.set_predicate(fragment, params);
        self
    }

    /// Returns true if a WHERE clause is specified.
    #[must_use]
    pub const fn has_where_clause(&self) -> bool {
        self.statement.predicate().is_some()
    }

    /// The statement accumulated so far.
    #[must_use]
    pub const fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Renders without executing.
    pub fn to_sql(&self) -> Result<RenderedStatement> {
        render(&self.statement)
    }

    /// Runs the update and returns the number of rows changed.
    pub fn execute(self) -> Result<u64> {
        let rendered = self.to_sql()?;
        if !self.has_where_clause() {
            warn!(table = %self.statement.table(), "UPDATE without WHERE affects every row");
        }
        super::run(self.executor, &rendered)?.into_affected()
    }
}
