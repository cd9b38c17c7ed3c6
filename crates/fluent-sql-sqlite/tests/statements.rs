//! Builders executed against a real SQLite database.

mod common;
use common::*;

use fluent_sql_core::{params, QueryError, SqlValue};

// ===================================================================
// INSERT / SELECT
// ===================================================================

#[test]
fn test_insert_returns_id_and_fetch_one_finds_row() {
    let mut s = session();
    let id = add_user(&mut s, "Alice", "a@x.com", Some(28));
    assert_eq!(id, 1);

    let row = s
        .select("users")
        .unwrap()
        .where_clause("id = ?", [1])
        .fetch_one()
        .unwrap()
        .expect("user 1 exists");

    assert_eq!(int(&row, "id"), 1);
    assert_eq!(text(&row, "name"), "Alice");
    assert_eq!(text(&row, "email"), "a@x.com");
    assert_eq!(int(&row, "age"), 28);
}

#[test]
fn test_insert_then_fetch_round_trip_with_values() {
    let mut s = session();
    let id = s
        .insert("products")
        .unwrap()
        .values([
            ("name", SqlValue::from("Widget")),
            ("price", SqlValue::from(9.99)),
            ("stock", SqlValue::from(12)),
        ])
        .execute()
        .unwrap();

    let row = s
        .select("products")
        .unwrap()
        .fields(&["name", "price", "stock"])
        .where_clause("id = ?", [id])
        .fetch_one()
        .unwrap()
        .unwrap();

    assert_eq!(row.columns().collect::<Vec<_>>(), ["name", "price", "stock"]);
    assert_eq!(row.get("name"), Some(&SqlValue::from("Widget")));
    assert_eq!(row.get("price"), Some(&SqlValue::Real(9.99)));
    assert_eq!(row.get("stock"), Some(&SqlValue::Integer(12)));
}

#[test]
fn test_column_default_applies_when_not_set() {
    let mut s = session();
    let id = s
        .insert("products")
        .unwrap()
        .set("name", "Gadget")
        .set("price", 1.5)
        .execute()
        .unwrap();

    let row = s
        .select("products")
        .unwrap()
        .where_clause("id = ?", [id])
        .fetch_one()
        .unwrap()
        .unwrap();
    assert_eq!(int(&row, "stock"), 0);
}

#[test]
fn test_null_round_trips() {
    let mut s = session();
    let id = add_user(&mut s, "Nobody", "n@x.com", None);
    let row = s
        .select("users")
        .unwrap()
        .where_clause("id = ? AND age IS NULL", [id])
        .fetch_one()
        .unwrap()
        .unwrap();
    assert_eq!(row.get("age"), Some(&SqlValue::Null));
}

#[test]
fn test_fetch_one_without_match_is_none() {
    let mut s = session();
    let row = s
        .select("users")
        .unwrap()
        .where_clause("id = ?", [42])
        .fetch_one()
        .unwrap();
    assert!(row.is_none());
}

#[test]
fn test_where_filters_by_age() {
    let mut s = session();
    add_user(&mut s, "Alice", "a@x.com", Some(28));
    add_user(&mut s, "Bob", "b@x.com", Some(35));

    let rows: Vec<_> = s
        .select("users")
        .unwrap()
        .where_clause("age >= ?", [30])
        .fetch()
        .unwrap()
        .collect();

    assert_eq!(rows.len(), 1);
    assert_eq!(int(&rows[0], "age"), 35);
    assert_eq!(text(&rows[0], "name"), "Bob");
}

#[test]
fn test_order_by_respects_direction() {
    let mut s = session();
    add_user(&mut s, "Alice", "a@x.com", Some(28));
    add_user(&mut s, "Bob", "b@x.com", Some(35));
    add_user(&mut s, "Cleo", "c@x.com", Some(31));

    let names: Vec<String> = s
        .select("users")
        .unwrap()
        .order_by(&["age DESC"])
        .fetch()
        .unwrap()
        .map(|row| text(&row, "name").to_owned())
        .collect();
    assert_eq!(names, ["Bob", "Cleo", "Alice"]);

    let names: Vec<String> = s
        .select("users")
        .unwrap()
        .order_by(&["age"])
        .fetch()
        .unwrap()
        .map(|row| text(&row, "name").to_owned())
        .collect();
    assert_eq!(names, ["Alice", "Cleo", "Bob"]);
}

#[test]
fn test_limit_caps_result_count() {
    let mut s = session();
    for i in 0..5 {
        add_user(&mut s, "U", &format!("u{i}@x.com"), Some(20 + i));
    }

    for n in 0..=7_i64 {
        let got = s.select("users").unwrap().limit(n).fetch().unwrap().len();
        let expected = usize::try_from(n.min(5)).unwrap();
        assert_eq!(got, expected, "limit({n})");
    }
}

#[test]
fn test_limit_counts_only_matching_rows() {
    let mut s = session();
    add_user(&mut s, "A", "a@x.com", Some(10));
    add_user(&mut s, "B", "b@x.com", Some(40));
    add_user(&mut s, "C", "c@x.com", Some(50));

    let got = s
        .select("users")
        .unwrap()
        .where_clause("age > ?", [30])
        .limit(5)
        .fetch()
        .unwrap()
        .len();
    assert_eq!(got, 2);
}

#[test]
fn test_heterogeneous_parameters() {
    let mut s = session();
    add_user(&mut s, "Alice", "a@x.com", Some(28));
    add_user(&mut s, "Alice", "alice2@x.com", Some(40));

    let rows: Vec<_> = s
        .select("users")
        .unwrap()
        .where_clause("name = ? AND age < ?", params!["Alice", 30])
        .fetch()
        .unwrap()
        .collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(text(&rows[0], "email"), "a@x.com");
}

#[test]
fn test_injection_attempt_is_just_a_value() {
    let mut s = session();
    add_user(&mut s, "Alice", "a@x.com", Some(28));

    let rows = s
        .select("users")
        .unwrap()
        .where_clause("name = ?", ["x' OR '1'='1"])
        .fetch()
        .unwrap();
    assert_eq!(rows.len(), 0);
    assert_eq!(count(&mut s, "users"), 1);
}

#[test]
fn test_question_mark_in_comment_is_not_a_parameter() {
    let mut s = session();
    add_user(&mut s, "Alice", "a@x.com", Some(28));

    let row = s
        .select("users")
        .unwrap()
        .where_clause("id = ? -- why?", [1])
        .fetch_one()
        .unwrap();
    assert!(row.is_some());
}

#[test]
fn test_numbered_placeholders_are_rejected_before_binding() {
    let mut s = session();
    add_user(&mut s, "Alice", "a@x.com", Some(28));

    let err = s
        .select("users")
        .unwrap()
        .where_clause("name = ?2 AND age = ?1", params!["Alice", 28])
        .fetch()
        .unwrap_err();
    assert!(matches!(err, QueryError::Validation(_)), "{err:?}");
}

#[test]
fn test_fragment_without_parameters() {
    let mut s = session();
    add_user(&mut s, "Alice", "a@x.com", Some(28));
    add_user(&mut s, "Nobody", "n@x.com", None);

    let rows: Vec<_> = s
        .select("users")
        .unwrap()
        .where_clause("age IS NULL", params![])
        .fetch()
        .unwrap()
        .collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(text(&rows[0], "name"), "Nobody");
}

// ===================================================================
// Constraints
// ===================================================================

#[test]
fn test_duplicate_unique_value_is_constraint_violation() {
    let mut s = session();
    add_user(&mut s, "Alice", "a@x.com", Some(28));
    let before = all_users(&mut s);

    let err = s
        .insert("users")
        .unwrap()
        .set("name", "Imposter")
        .set("email", "a@x.com")
        .execute()
        .unwrap_err();

    assert!(matches!(err, QueryError::ConstraintViolation(_)), "{err:?}");
    assert_eq!(all_users(&mut s), before);
}

#[test]
fn test_missing_not_null_column_is_constraint_violation() {
    let mut s = session();
    let err = s
        .insert("users")
        .unwrap()
        .set("name", "No Email")
        .execute()
        .unwrap_err();
    assert!(err.is_constraint_violation(), "{err:?}");
    assert_eq!(count(&mut s, "users"), 0);
}

#[test]
fn test_unknown_column_is_database_error() {
    let mut s = session();
    let err = s
        .select("users")
        .unwrap()
        .fields(&["nickname"])
        .fetch()
        .unwrap_err();
    assert!(matches!(err, QueryError::Database(_)), "{err:?}");
}

// ===================================================================
// UPDATE
// ===================================================================

#[test]
fn test_update_by_id_changes_one_row() {
    let mut s = session();
    add_user(&mut s, "Alice", "a@x.com", Some(28));
    add_user(&mut s, "Bob", "b@x.com", Some(35));

    let affected = s
        .update("users")
        .unwrap()
        .set("age", 29)
        .where_clause("id = ?", [1])
        .execute()
        .unwrap();
    assert_eq!(affected, 1);

    let users = all_users(&mut s);
    assert_eq!(int(&users[0], "age"), 29);
    assert_eq!(int(&users[1], "age"), 35);
}

#[test]
fn test_update_matching_nothing_changes_nothing() {
    let mut s = session();
    add_user(&mut s, "Alice", "a@x.com", Some(28));
    add_user(&mut s, "Bob", "b@x.com", Some(35));
    let before = all_users(&mut s);

    let affected = s
        .update("users")
        .unwrap()
        .set("name", "Ghost")
        .where_clause("id = ?", [999])
        .execute()
        .unwrap();

    assert_eq!(affected, 0);
    assert_eq!(all_users(&mut s), before);
}

#[test]
fn test_update_without_where_touches_every_row() {
    let mut s = session();
    add_user(&mut s, "Alice", "a@x.com", Some(28));
    add_user(&mut s, "Bob", "b@x.com", Some(35));

    let affected = s.update("users").unwrap().set("age", 1).execute().unwrap();
    assert_eq!(affected, 2);
    assert!(all_users(&mut s).iter().all(|row| int(row, "age") == 1));
}

#[test]
fn test_update_into_duplicate_is_constraint_violation() {
    let mut s = session();
    add_user(&mut s, "Alice", "a@x.com", Some(28));
    add_user(&mut s, "Bob", "b@x.com", Some(35));

    let err = s
        .update("users")
        .unwrap()
        .set("email", "a@x.com")
        .where_clause("id = ?", [2])
        .execute()
        .unwrap_err();
    assert!(err.is_constraint_violation());
    assert_eq!(text(&all_users(&mut s)[1], "email"), "b@x.com");
}

// ===================================================================
// DELETE
// ===================================================================

#[test]
fn test_delete_removes_exactly_matching_rows() {
    let mut s = session();
    add_user(&mut s, "A", "a@x.com", Some(10));
    add_user(&mut s, "B", "b@x.com", Some(40));
    add_user(&mut s, "C", "c@x.com", Some(50));
    let before = count(&mut s, "users");

    let affected = s
        .delete("users")
        .unwrap()
        .where_clause("age >= ?", [40])
        .execute()
        .unwrap();

    let after = count(&mut s, "users");
    assert_eq!(affected, 2);
    assert_eq!(u64::try_from(before - after).unwrap(), affected);
    assert_eq!(text(&all_users(&mut s)[0], "name"), "A");
}

#[test]
fn test_delete_matching_nothing_returns_zero() {
    let mut s = session();
    add_user(&mut s, "A", "a@x.com", Some(10));
    let affected = s
        .delete("users")
        .unwrap()
        .where_clause("id = ?", [7])
        .execute()
        .unwrap();
    assert_eq!(affected, 0);
    assert_eq!(count(&mut s, "users"), 1);
}

#[test]
fn test_delete_without_where_empties_table() {
    let mut s = session();
    add_user(&mut s, "A", "a@x.com", Some(10));
    add_user(&mut s, "B", "b@x.com", Some(20));

    assert_eq!(s.delete("users").unwrap().execute().unwrap(), 2);
    assert_eq!(count(&mut s, "users"), 0);
}

// ===================================================================
// Factory
// ===================================================================

#[test]
fn test_query_factory_shares_the_session() {
    let mut s = session();
    let mut qb = s.query();
    let id = qb
        .insert("users")
        .unwrap()
        .set("name", "Alice")
        .set("email", "a@x.com")
        .execute()
        .unwrap();
    let found = qb
        .select("users")
        .unwrap()
        .where_clause("id = ?", [id])
        .fetch_one()
        .unwrap();
    assert!(found.is_some());
}

#[test]
fn test_invalid_table_never_reaches_sqlite() {
    let mut s = session();
    assert!(matches!(
        s.delete("users; DROP TABLE products"),
        Err(QueryError::Validation(_))
    ));
    assert_eq!(count(&mut s, "products"), 0);
}
