//! INSERT statement builder.

use crate::error::Result;
use crate::executor::Executor;
use crate::render::{render, RenderedStatement};
use crate::statement::{Statement, StatementKind};
use crate::value::ToSqlValue;

/// Builds and runs a single-row INSERT.
pub struct InsertBuilder<'e, E: ?Sized> {
    executor: &'e mut E,
    statement: Statement,
}

impl<'e, E: Executor + ?Sized> InsertBuilder<'e, E> {
    /// Starts a statement against `table`, bound to `executor`.
    pub fn new(executor: &'e mut E, table: &str) -> Result<Self> {
        Ok(Self {
            executor,
            statement: Statement::new(StatementKind::Insert, table)?,
        })
    }

    /// Sets one column. Setting a column twice keeps the last value.
    #[must_use]
    pub fn set<T: ToSqlValue>(mut self, column: &str, value: T) -> Self {
        self.statement
            .assign(String::from(column), value.to_sql_value());
        self
    }

    /// Sets every pair from `pairs`, in iteration order.
    #[must_use]
    pub fn values<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToSqlValue,
    {
        for (column, value) in pairs {
            self.statement.assign(column.into(), value.to_sql_value());
        }
        self
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

    /// Inserts the row and returns its generated identifier.
    pub fn execute(self) -> Result<i64> {
        let rendered = self.to_sql()?;
        super::run(self.executor, &rendered)?.into_inserted()
    }
}
