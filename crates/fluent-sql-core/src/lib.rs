//! # fluent-sql-core
//!
//! A fluent SQL statement builder that renders chained method calls into
//! parameterized SQL plus an ordered parameter list.
//!
//! This crate provides:
//! - [`Statement`], the in-memory description of one query
//! - [`render`], a pure function from statement to SQL text and parameters
//! - One builder per statement kind, handed out by [`QueryBuilder`]
//! - The [`Executor`] trait that a store backend implements
//!
//! ## SQL Injection Prevention
//!
//! Values only ever travel as bound parameters, and the names that are
//! spliced into SQL text (tables, columns) must be plain identifiers:
//!
//! ```rust
//! use fluent_sql_core::{render, Statement, StatementKind};
//!
//! assert!(Statement::new(StatementKind::Select, "users; DROP TABLE users").is_err());
//!
//! let stmt = Statement::new(StatementKind::Delete, "users")?;
//! assert_eq!(render(&stmt)?.sql, "DELETE FROM users");
//! # Ok::<(), fluent_sql_core::QueryError>(())
//! ```

pub mod builder;
pub mod error;
pub mod executor;
pub mod ident;
pub mod render;
pub mod statement;
pub mod value;

pub use builder::{DeleteBuilder, InsertBuilder, QueryBuilder, SelectBuilder, UpdateBuilder};
pub use error::{QueryError, Result};
pub use executor::{Executor, RawResult, Row, Rows};
pub use render::{render, RenderedStatement};
pub use statement::{Assignment, OrderTerm, Predicate, SortDirection, Statement, StatementKind};
pub use value::{SqlValue, ToSqlValue};
