//! SELECT statement builder.

use crate::error::{QueryError, Result};
use crate::executor::{Executor, Row, Rows};
use crate::render::{render, RenderedStatement};
use crate::statement::{OrderTerm, Statement, StatementKind};
use crate::value::ToSqlValue;

/// Builds and runs a SELECT against one table.
///
/// Input problems found while chaining (a bad order-by spec, say) are held
/// back and reported by the terminal call, so the chain itself never
/// breaks.
pub struct SelectBuilder<'e, E: ?Sized> {
    executor: &'e mut E,
    statement: Statement,
    deferred: Option<QueryError>,
}

impl<'e, E: Executor + ?Sized> SelectBuilder<'e, E> {
    /// Starts a statement against `table`, bound to `executor`.
    pub fn new(executor: &'e mut E, table: &str) -> Result<Self> {
        Ok(Self {
            executor,
            statement: Statement::new(StatementKind::Select, table)?,
            deferred: None,
        })
    }

    /// Replaces the projected fields. An empty list selects all columns.
    #[must_use]
    pub fn fields(mut self, names: &[&str]) -> Self {
        self.statement.fields = names.iter().map(|s| String::from(*s)).collect();
        self
    }

    /// Sets the WHERE fragment and its parameters.
    ///
    /// A second call replaces the first; fragments are not combined.
    ///
    /// Only anonymous `?` placeholders are accepted, bound in order; `?` inside
    /// quotes or comments is not a placeholder. For a fragment without
    /// placeholders pass `params![]`, since an empty array literal has no
    /// element type to infer.
    ///
    /// ```rust
    /// use fluent_sql_core::{params, Executor, QueryBuilder, RawResult, RenderedStatement, Result};
    ///
    /// struct Nothing;
    ///
    /// impl Executor for Nothing {
    ///     fn run(&mut self, _: &RenderedStatement) -> Result<RawResult> {
    ///         Ok(RawResult::Rows(vec![]))
    ///     }
    /// }
    ///
    /// let rendered = QueryBuilder::new(&mut Nothing)
    ///     .select("users")?
    ///     .where_clause("age IS NULL", params![])
    ///     .to_sql()?;
    /// assert_eq!(rendered.sql, "SELECT * FROM users WHERE age IS NULL");
    /// # Ok::<(), fluent_sql_core::QueryError>(())
    /// ```
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

    /// Appends ORDER BY terms such as `"age"` or `"age DESC"`.
    #[must_use]
    pub fn order_by(mut self, specs: &[&str]) -> Self {
        for spec in specs {
            match OrderTerm::parse(spec) {
                Ok(term) => self.statement.ordering.push(term),
                Err(e) => {
                    self.deferred.get_or_insert(e);
                }
            }
        }
        self
    }

    /// Caps the number of rows. Negative values fail at the terminal call.
    #[must_use]
    pub fn limit(mut self, n: i64) -> Self {
        self.statement.limit = Some(n);
        self
    }

    /// The statement accumulated so far.
    #[must_use]
    pub const fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Renders without executing.
    pub fn to_sql(&self) -> Result<RenderedStatement> {
        if let Some(ref e) = self.deferred {
            return Err(e.clone());
        }
        render(&self.statement)
    }

    /// Runs the query and returns its rows in store order.
    pub fn fetch(self) -> Result<Rows> {
        let rendered = self.to_sql()?;
        let rows = super::run(self.executor, &rendered)?.into_rows()?;
        Ok(Rows::new(rows))
    }

    /// Runs the query with a limit of one and returns the first row, if any.
    pub fn fetch_one(self) -> Result<Option<Row>> {
        Ok(self.limit(1).fetch()?.next())
    }
}
