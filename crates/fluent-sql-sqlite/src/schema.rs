//! Schema setup for the tables the command-line tool works with.

use fluent_sql_core::Result;
use tracing::info;

use crate::session::Session;

/// SQL to create the users table.
pub const CREATE_USERS_TABLE_SQL: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT UNIQUE NOT NULL,
    age INTEGER
)
";

/// SQL to create the products table.
pub const CREATE_PRODUCTS_TABLE_SQL: &str = r"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    price REAL NOT NULL,
    stock INTEGER DEFAULT 0
)
";

/// Creates the `users` and `products` tables if they do not exist yet.
pub fn initialize(session: &mut Session) -> Result<()> {
    session.execute_ddl(CREATE_USERS_TABLE_SQL)?;
    session.execute_ddl(CREATE_PRODUCTS_TABLE_SQL)?;
    info!("Schema ready");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_is_idempotent() {
        let mut session = Session::open_in_memory().unwrap();
        initialize(&mut session).unwrap();
        initialize(&mut session).unwrap();

        let tables: Vec<String> = session
            .select("sqlite_master")
            .unwrap()
            .fields(&["name"])
            .where_clause("type = ? AND name NOT LIKE ?", ["table", "sqlite_%"])
            .order_by(&["name"])
            .fetch()
            .unwrap()
            .filter_map(|row| row.get("name").and_then(|v| v.as_str().map(String::from)))
            .collect();

        assert_eq!(tables, ["products", "users"]);
    }
}
