//! A session: one SQLite connection, driven synchronously.
//!
//! `sqlx` is async; a session owns a current-thread Tokio runtime and
//! blocks on it for every call, so callers see plain blocking functions.

use std::str::FromStr;

use fluent_sql_core::{
    DeleteBuilder, Executor, InsertBuilder, QueryBuilder, QueryError, RawResult,
    RenderedStatement, Result, Row, SelectBuilder, SqlValue, StatementKind, UpdateBuilder,
};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, ConnectOptions, Connection, Row as _, Sqlite, TypeInfo, ValueRef};
use tokio::runtime::{Builder, Runtime};
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::error::{classify, connection};

/// Owns the single connection used by every builder in a session.
pub struct Session {
    conn: SqliteConnection,
    runtime: Runtime,
}

impl Session {
    /// Opens a connection as described by `config`.
    pub fn open(config: &SessionConfig) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| QueryError::Connection(e.to_string()))?;

        let options = if config.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(connection)?
        } else {
            SqliteConnectOptions::new()
                .filename(&config.path)
                .create_if_missing(config.create_if_missing)
        };
        let options = options
            .foreign_keys(config.foreign_keys)
            .busy_timeout(config.busy_timeout);

        let conn = runtime.block_on(options.connect()).map_err(connection)?;
        info!(path = %config.path.display(), "Opened session");

        Ok(Self { conn, runtime })
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::open(&SessionConfig::in_memory())
    }

    /// Opens a session, runs `f`, and closes the session on every return
    /// path. An error from `f` takes precedence over an error from closing.
    pub fn scoped<T, E, F>(config: &SessionConfig, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&mut Self) -> std::result::Result<T, E>,
        E: From<QueryError>,
    {
        let mut session = Self::open(config)?;
        let outcome = f(&mut session);
        let closed = session.close();
        let value = outcome?;
        closed?;
        Ok(value)
    }

    /// Closes the connection, waiting for SQLite to release the file.
    pub fn close(self) -> Result<()> {
        let Self { conn, runtime } = self;
        runtime.block_on(conn.close()).map_err(connection)?;
        info!("Closed session");
        Ok(())
    }

    /// Returns a builder factory bound to this session.
    pub fn query(&mut self) -> QueryBuilder<'_, Self> {
        QueryBuilder::new(self)
    }

    /// Starts a SELECT against `table`.
    pub fn select(&mut self, table: &str) -> Result<SelectBuilder<'_, Self>> {
        SelectBuilder::new(self, table)
    }

    /// Starts an INSERT into `table`.
    pub fn insert(&mut self, table: &str) -> Result<InsertBuilder<'_, Self>> {
        InsertBuilder::new(self, table)
    }

    /// Starts an UPDATE of `table`.
    pub fn update(&mut self, table: &str) -> Result<UpdateBuilder<'_, Self>> {
        UpdateBuilder::new(self, table)
    }

    /// Starts a DELETE from `table`.
    pub fn delete(&mut self, table: &str) -> Result<DeleteBuilder<'_, Self>> {
        DeleteBuilder::new(self, table)
    }

    /// Runs parameterless DDL. Used by schema setup, not by the builders.
    pub(crate) fn execute_ddl(&mut self, sql: &str) -> Result<()> {
        self.runtime
            .block_on(sqlx::query(sql).execute(&mut self.conn))
            .map_err(classify)?;
        Ok(())
    }
}

impl Executor for Session {
    fn run(&mut self, statement: &RenderedStatement) -> Result<RawResult> {
        let mut query = sqlx::query(&statement.sql);
        for param in &statement.params {
            query = bind_param(query, param.clone());
        }

        match statement.kind {
            StatementKind::Select => {
                let rows = self
                    .runtime
                    .block_on(query.fetch_all(&mut self.conn))
                    .map_err(classify)?;
                debug!(rows = rows.len(), "Fetched rows");
                let rows = rows.iter().map(convert_row).collect::<Result<Vec<_>>>()?;
                Ok(RawResult::Rows(rows))
            }
            StatementKind::Insert => {
                let done = self
                    .runtime
                    .block_on(query.execute(&mut self.conn))
                    .map_err(classify)?;
                Ok(RawResult::Inserted(done.last_insert_rowid()))
            }
            StatementKind::Update | StatementKind::Delete => {
                let done = self
                    .runtime
                    .block_on(query.execute(&mut self.conn))
                    .map_err(classify)?;
                debug!(affected = done.rows_affected(), "Statement applied");
                Ok(RawResult::Affected(done.rows_affected()))
            }
        }
    }
}

/// Binds a SqlValue parameter to a raw query.
fn bind_param<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Integer(i) => query.bind(i),
        SqlValue::Real(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
    }
}

/// Converts a SQLite row, reading each value by its storage class.
fn convert_row(row: &SqliteRow) -> Result<Row> {
    let mut out = Row::new();

    for column in row.columns() {
        let index = column.ordinal();
        let name = column.name();
        let raw = row.try_get_raw(index).map_err(classify)?;

        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            let type_name = raw.type_info().name().to_owned();
            match type_name.as_str() {
                "INTEGER" | "BOOLEAN" => SqlValue::Integer(row.try_get(index).map_err(classify)?),
                "REAL" => SqlValue::Real(row.try_get(index).map_err(classify)?),
                "TEXT" => SqlValue::Text(row.try_get(index).map_err(classify)?),
                _ => {
                    return Err(QueryError::UnsupportedType {
                        column: name.to_owned(),
                        type_name,
                    })
                }
            }
        };
        out.push(name, value);
    }

    Ok(out)
}
