#![allow(dead_code)]

use fluent_sql_core::{Row, SqlValue};
use fluent_sql_sqlite::{schema, Session};

/// Fresh in-memory session with the users/products schema.
pub fn session() -> Session {
    let mut session = Session::open_in_memory()
        .unwrap_or_else(|e| panic!("Failed to open in-memory session: {e}"));
    schema::initialize(&mut session).unwrap_or_else(|e| panic!("Failed to create schema: {e}"));
    session
}

pub fn add_user(session: &mut Session, name: &str, email: &str, age: Option<i64>) -> i64 {
    session
        .insert("users")
        .unwrap()
        .set("name", name)
        .set("email", email)
        .set("age", age)
        .execute()
        .unwrap_or_else(|e| panic!("Failed to insert {email}: {e}"))
}

pub fn all_users(session: &mut Session) -> Vec<Row> {
    session
        .select("users")
        .unwrap()
        .order_by(&["id"])
        .fetch()
        .unwrap()
        .collect()
}

pub fn count(session: &mut Session, table: &str) -> usize {
    session.select(table).unwrap().fetch().unwrap().len()
}

pub fn int(row: &Row, column: &str) -> i64 {
    row.get(column)
        .and_then(SqlValue::as_i64)
        .unwrap_or_else(|| panic!("Expected integer in `{column}`, got {:?}", row.get(column)))
}

pub fn text<'r>(row: &'r Row, column: &str) -> &'r str {
    row.get(column)
        .and_then(SqlValue::as_str)
        .unwrap_or_else(|| panic!("Expected text in `{column}`, got {:?}", row.get(column)))
}
