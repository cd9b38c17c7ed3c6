//! # fluent-sql-sqlite
//!
//! SQLite backend for `fluent-sql-core`.
//!
//! A [`Session`] owns exactly one SQLite connection for its lifetime and
//! implements [`Executor`](fluent_sql_core::Executor), so every builder
//! handed out by the session runs on that connection.
//!
//! - Parameters are bound positionally to `?` placeholders.
//! - Every terminal call is its own auto-committed statement; there are no
//!   cross-call transactions.
//! - Calls block the current thread until SQLite answers.
//!
//! ## Example
//!
//! ```rust
//! use fluent_sql_sqlite::{schema, Session};
//!
//! let mut session = Session::open_in_memory()?;
//! schema::initialize(&mut session)?;
//!
//! let id = session
//!     .insert("users")?
//!     .set("name", "Alice")
//!     .set("email", "a@x.com")
//!     .set("age", 28)
//!     .execute()?;
//! assert_eq!(id, 1);
//!
//! let alice = session
//!     .select("users")?
//!     .where_clause("id = ?", [id])
//!     .fetch_one()?
//!     .expect("row was just inserted");
//! assert_eq!(alice.get("name").and_then(|v| v.as_str()), Some("Alice"));
//!
//! session.close()?;
//! # Ok::<(), fluent_sql_core::QueryError>(())
//! ```

pub mod config;
mod error;
pub mod schema;
mod session;

pub use config::SessionConfig;
pub use session::Session;
