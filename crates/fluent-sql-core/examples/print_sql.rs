//! Print SQL - builders without a database
//!
//! Implements [`Executor`] by printing each statement and its parameters,
//! then walks through one chain per statement kind.
//!
//! Run with: cargo run --example print_sql

use fluent_sql_core::{
    params, Executor, QueryBuilder, RawResult, RenderedStatement, Result, StatementKind,
};

/// Prints statements instead of running them.
struct Printer {
    next_id: i64,
}

impl Executor for Printer {
    fn run(&mut self, statement: &RenderedStatement) -> Result<RawResult> {
        println!("{statement}");
        for (i, param) in statement.params.iter().enumerate() {
            println!("    ?{} = {param:?}", i + 1);
        }
        println!();

        Ok(match statement.kind {
            StatementKind::Select => RawResult::Rows(Vec::new()),
            StatementKind::Insert => {
                self.next_id += 1;
                RawResult::Inserted(self.next_id)
            }
            _ => RawResult::Affected(0),
        })
    }
}

fn main() -> Result<()> {
    let mut printer = Printer { next_id: 0 };
    let mut qb = QueryBuilder::new(&mut printer);

    // =========================================================================
    // INSERT
    // =========================================================================

    let id = qb
        .insert("users")?
        .values([("name", "Alice"), ("email", "alice@example.com")])
        .set("age", 28)
        .execute()?;

    // =========================================================================
    // SELECT
    // =========================================================================

    let _ = qb
        .select("users")?
        .fields(&["id", "name", "email"])
        .where_clause("age >= ? AND name LIKE ?", params![18, "A%"])
        .order_by(&["age DESC", "name"])
        .limit(10)
        .fetch()?;

    // User input stays a parameter, never SQL text.
    let _ = qb
        .select("users")?
        .where_clause("name = ?", ["'; DROP TABLE users; --"])
        .fetch_one()?;

    // =========================================================================
    // UPDATE / DELETE
    // =========================================================================

    qb.update("users")?
        .set("age", 29)
        .where_clause("id = ?", [id])
        .execute()?;

    qb.delete("users")?.where_clause("id = ?", [id]).execute()?;

    // Rendering on its own, without running anything.
    let rendered = qb.select("products")?.order_by(&["price DESC"]).to_sql()?;
    println!("rendered only: {rendered}");

    Ok(())
}
