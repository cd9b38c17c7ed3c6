//! Typed views over `users` and `products` rows.

use fluent_sql_core::{Row, SqlValue};
use serde::Serialize;

use crate::error::{CliError, Result};

/// Columns selected for a [`User`], in display order.
pub const USER_COLUMNS: &[&str] = &["id", "name", "email", "age"];

/// Columns selected for a [`Product`], in display order.
pub const PRODUCT_COLUMNS: &[&str] = &["id", "name", "price", "stock"];

/// A row of the `users` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: Option<i64>,
}

/// A row of the `products` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: Option<i64>,
}

impl TryFrom<Row> for User {
    type Error = CliError;

    fn try_from(row: Row) -> Result<Self> {
        Ok(Self {
            id: integer(&row, "id")?,
            name: text(&row, "name")?,
            email: text(&row, "email")?,
            age: optional(&row, "age", integer)?,
        })
    }
}

impl TryFrom<Row> for Product {
    type Error = CliError;

    fn try_from(row: Row) -> Result<Self> {
        Ok(Self {
            id: integer(&row, "id")?,
            name: text(&row, "name")?,
            price: real(&row, "price")?,
            stock: optional(&row, "stock", integer)?,
        })
    }
}

fn value<'r>(row: &'r Row, column: &'static str) -> Result<&'r SqlValue> {
    row.get(column).ok_or(CliError::MissingColumn(column))
}

const fn mismatch(column: &'static str, expected: &'static str, found: &SqlValue) -> CliError {
    CliError::ColumnType {
        column,
        expected,
        found: found.type_name(),
    }
}

fn integer(row: &Row, column: &'static str) -> Result<i64> {
    let v = value(row, column)?;
    v.as_i64().ok_or_else(|| mismatch(column, "integer", v))
}

fn real(row: &Row, column: &'static str) -> Result<f64> {
    let v = value(row, column)?;
    v.as_f64().ok_or_else(|| mismatch(column, "real", v))
}

fn text(row: &Row, column: &'static str) -> Result<String> {
    let v = value(row, column)?;
    v.as_str()
        .map(str::to_owned)
        .ok_or_else(|| mismatch(column, "text", v))
}

fn optional<T>(
    row: &Row,
    column: &'static str,
    read: fn(&Row, &'static str) -> Result<T>,
) -> Result<Option<T>> {
    if value(row, column)?.is_null() {
        Ok(None)
    } else {
        read(row, column).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_row(age: SqlValue) -> Row {
        [
            ("id", SqlValue::Integer(1)),
            ("name", SqlValue::from("Alice")),
            ("email", SqlValue::from("a@x.com")),
            ("age", age),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_user_from_row() {
        let user = User::try_from(user_row(SqlValue::Integer(28))).unwrap();
        assert_eq!(
            user,
            User {
                id: 1,
                name: String::from("Alice"),
                email: String::from("a@x.com"),
                age: Some(28),
            }
        );
    }

    #[test]
    fn test_null_age_is_none() {
        let user = User::try_from(user_row(SqlValue::Null)).unwrap();
        assert_eq!(user.age, None);
    }

    #[test]
    fn test_wrong_type_is_reported() {
        let err = User::try_from(user_row(SqlValue::from("old"))).unwrap_err();
        assert!(matches!(
            err,
            CliError::ColumnType {
                column: "age",
                expected: "integer",
                found: "text"
            }
        ));
    }

    #[test]
    fn test_missing_column_is_reported() {
        let row: Row = [("id", SqlValue::Integer(1))].into_iter().collect();
        assert!(matches!(
            User::try_from(row),
            Err(CliError::MissingColumn("name"))
        ));
    }

    #[test]
    fn test_product_price_widens_integer() {
        let row: Row = [
            ("id", SqlValue::Integer(3)),
            ("name", SqlValue::from("Widget")),
            ("price", SqlValue::Integer(5)),
            ("stock", SqlValue::Null),
        ]
        .into_iter()
        .collect();
        let product = Product::try_from(row).unwrap();
        assert!((product.price - 5.0).abs() < f64::EPSILON);
        assert_eq!(product.stock, None);
    }

    #[test]
    fn test_user_serializes_with_field_names() {
        let user = User::try_from(user_row(SqlValue::Null)).unwrap();
        assert_eq!(
            serde_json::to_string(&user).unwrap(),
            r#"{"id":1,"name":"Alice","email":"a@x.com","age":null}"#
        );
    }
}
