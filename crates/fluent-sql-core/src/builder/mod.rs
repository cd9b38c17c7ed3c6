//! Fluent statement builders.
//!
//! A [`QueryBuilder`] binds builders to an [`Executor`]. Each configuration
//! method consumes the builder and returns it with the clause added, so a
//! chain never shares mutable state with anything else. Terminal calls
//! (`fetch`, `fetch_one`, `execute`) render the statement once and run it.
//!
//! # Example
//!
//! ```rust
//! use fluent_sql_core::{QueryBuilder, RawResult, RenderedStatement, Executor, Result};
//!
//! struct DryRun(Vec<String>);
//!
//! impl Executor for DryRun {
//!     fn run(&mut self, statement: &RenderedStatement) -> Result<RawResult> {
//!         self.0.push(statement.sql.clone());
//!         Ok(RawResult::Rows(vec![]))
//!     }
//! }
//!
//! let mut dry = DryRun(vec![]);
//! let rows = QueryBuilder::new(&mut dry)
//!     .select("users")?
//!     .where_clause("age >= ?", [30])
//!     .order_by(&["age DESC"])
//!     .fetch()?;
//!
//! assert_eq!(rows.count(), 0);
//! assert_eq!(dry.0, ["SELECT * FROM users WHERE age >= ? ORDER BY age DESC"]);
//! # Ok::<(), fluent_sql_core::QueryError>(())
//! ```

mod delete;
mod insert;
mod select;
mod update;

use tracing::debug;

pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use update::UpdateBuilder;

use crate::error::Result;
use crate::executor::{Executor, RawResult};
use crate::render::RenderedStatement;

/// Entry point: hands out builders bound to one executor.
pub struct QueryBuilder<'e, E: ?Sized> {
    executor: &'e mut E,
}

impl<'e, E: Executor + ?Sized> QueryBuilder<'e, E> {
    /// Creates a factory over `executor`.
    pub fn new(executor: &'e mut E) -> Self {
        Self { executor }
    }

    /// Starts a SELECT against `table`.
    pub fn select(&mut self, table: &str) -> Result<SelectBuilder<'_, E>> {
        SelectBuilder::new(&mut *self.executor, table)
    }

    /// Starts an INSERT into `table`.
    pub fn insert(&mut self, table: &str) -> Result<InsertBuilder<'_, E>> {
        InsertBuilder::new(&mut *self.executor, table)
    }

    /// Starts an UPDATE of `table`.
    pub fn update(&mut self, table: &str) -> Result<UpdateBuilder<'_, E>> {
        UpdateBuilder::new(&mut *self.executor, table)
    }

    /// Starts a DELETE from `table`.
    pub fn delete(&mut self, table: &str) -> Result<DeleteBuilder<'_, E>> {
        DeleteBuilder::new(&mut *self.executor, table)
    }
}

fn run<E: Executor + ?Sized>(executor: &mut E, rendered: &RenderedStatement) -> Result<RawResult> {
    debug!(
        kind = %rendered.kind,
        sql = %rendered.sql,
        params = rendered.params.len(),
        "Executing statement"
    );
    executor.run(rendered)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use crate::error::Result;
    use crate::executor::{Executor, RawResult};
    use crate::render::RenderedStatement;

    /// Records every statement and replays canned results.
    #[derive(Default)]
    pub struct RecordingExecutor {
        pub statements: Vec<RenderedStatement>,
        pub responses: VecDeque<RawResult>,
    }

    impl RecordingExecutor {
        pub fn replying(response: RawResult) -> Self {
            Self {
                statements: Vec::new(),
                responses: VecDeque::from([response]),
            }
        }

        pub fn last(&self) -> &RenderedStatement {
            self.statements.last().expect("no statement executed")
        }
    }

    impl Executor for RecordingExecutor {
        fn run(&mut self, statement: &RenderedStatement) -> Result<RawResult> {
            self.statements.push(statement.clone());
            Ok(self
                .responses
                .pop_front()
                .unwrap_or(RawResult::Rows(Vec::new())))
        }
    }
}
