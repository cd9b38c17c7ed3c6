//! Command-line user and product manager built on `fluent-sql`.
//!
//! Every command opens one session on the configured SQLite file, makes
//! sure the `users` and `products` tables exist, runs a single builder
//! chain, and closes the session.
//!
//! ```text
//! fluent-sql add-user --name Alice --email a@x.com --age 28
//! fluent-sql --json list-users
//! fluent-sql --dry-run update-user 1 --age 29
//! fluent-sql delete-user 1 --yes
//! ```

pub mod app;
pub mod error;
pub mod models;
mod output;

pub use app::{App, Options};
pub use error::{CliError, Result};
