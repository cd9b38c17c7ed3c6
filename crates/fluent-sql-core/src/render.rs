//! Statement rendering.
//!
//! Rendering is a pure function from [`Statement`] to SQL text plus the
//! ordered parameter list. Values are never spliced into the text: every
//! value becomes a `?` placeholder, and the parameter list is assembled in
//! exactly the order the placeholders appear.

use std::fmt;

use crate::error::{QueryError, Result};
use crate::ident;
use crate::statement::{Predicate, SortDirection, Statement, StatementKind};
use crate::value::SqlValue;

/// SQL text and parameters ready to hand to an executor.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedStatement {
    /// Kind of the statement the text was rendered from.
    pub kind: StatementKind,
    /// SQL text with `?` placeholders.
    pub sql: String,
    /// Parameters, one per placeholder, in placeholder order.
    pub params: Vec<SqlValue>,
}

impl fmt::Display for RenderedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}

/// Renders a statement, validating it first.
pub fn render(stmt: &Statement) -> Result<RenderedStatement> {
    let mut sql = String::new();
    let mut params = vec![];

    match stmt.kind() {
        StatementKind::Select => {
            sql.push_str("SELECT ");
            if stmt.fields.is_empty() {
                sql.push('*');
            } else {
                for field in &stmt.fields {
                    ident::validate_column(field)?;
                }
                sql.push_str(&stmt.fields.join(", "));
            }
            sql.push_str(" FROM ");
            sql.push_str(stmt.table());

            push_where(&mut sql, &mut params, stmt.predicate())?;

            if !stmt.ordering.is_empty() {
                let terms: Vec<String> = stmt
                    .ordering
                    .iter()
                    .map(|term| match term.direction {
                        SortDirection::Asc => term.column.clone(),
                        SortDirection::Desc => format!("{} DESC", term.column),
                    })
                    .collect();
                sql.push_str(" ORDER BY ");
                sql.push_str(&terms.join(", "));
            }

            if let Some(n) = stmt.limit {
                if n < 0 {
                    return Err(QueryError::Validation(format!(
                        "limit must be non-negative, got {n}"
                    )));
                }
                sql.push_str(&format!(" LIMIT {n}"));
            }
        }

        StatementKind::Insert => {
            check_assignments(stmt)?;
            sql.push_str("INSERT INTO ");
            sql.push_str(stmt.table());

            let columns: Vec<&str> = stmt.assignments.iter().map(|a| a.column.as_str()).collect();
            let placeholders: Vec<&str> = stmt
                .assignments
                .iter()
                .map(|_| SqlValue::placeholder())
                .collect();
            sql.push_str(" (");
            sql.push_str(&columns.join(", "));
            sql.push_str(") VALUES (");
            sql.push_str(&placeholders.join(", "));
            sql.push(')');

            params.extend(stmt.assignments.iter().map(|a| a.value.clone()));
        }

        StatementKind::Update => {
            check_assignments(stmt)?;
            sql.push_str("UPDATE ");
            sql.push_str(stmt.table());
            sql.push_str(" SET ");

            let set_parts: Vec<String> = stmt
                .assignments
                .iter()
                .map(|a| format!("{} = ?", a.column))
                .collect();
            sql.push_str(&set_parts.join(", "));
            params.extend(stmt.assignments.iter().map(|a| a.value.clone()));

            push_where(&mut sql, &mut params, stmt.predicate())?;
        }

        StatementKind::Delete => {
            sql.push_str("DELETE FROM ");
            sql.push_str(stmt.table());
            push_where(&mut sql, &mut params, stmt.predicate())?;
        }
    }

    Ok(RenderedStatement {
        kind: stmt.kind(),
        sql,
        params,
    })
}

fn check_assignments(stmt: &Statement) -> Result<()> {
    if stmt.assignments.is_empty() {
        return Err(QueryError::Validation(format!(
            "{} on `{}` needs at least one column value",
            stmt.kind(),
            stmt.table()
        )));
    }
    for assignment in &stmt.assignments {
        ident::validate_column(&assignment.column)?;
    }
    Ok(())
}

fn push_where(
    sql: &mut String,
    params: &mut Vec<SqlValue>,
    predicate: Option<&Predicate>,
) -> Result<()> {
    let Some(predicate) = predicate else {
        return Ok(());
    };
    if predicate.fragment.trim().is_empty() {
        return Err(QueryError::validation("predicate fragment must not be empty"));
    }
    let scan = scan_fragment(&predicate.fragment)?;
    if scan.placeholders != predicate.params.len() {
        return Err(QueryError::Validation(format!(
            "predicate `{}` has {} placeholder(s) but {} parameter(s)",
            predicate.fragment,
            scan.placeholders,
            predicate.params.len()
        )));
    }
    sql.push_str(" WHERE ");
    sql.push_str(&predicate.fragment);
    if scan.ends_in_line_comment {
        // Keep ORDER BY / LIMIT out of the comment.
        sql.push('\n');
    }
    params.extend(predicate.params.iter().cloned());
    Ok(())
}

/// What [`scan_fragment`] learned about a WHERE fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FragmentScan {
    /// Anonymous `?` placeholders outside literals and comments.
    placeholders: usize,
    /// The fragment ends inside a `--` comment.
    ends_in_line_comment: bool,
}

#[derive(Clone, Copy)]
enum ScanState {
    Code,
    Quoted(char),
    LineComment,
    BlockComment,
}

/// Counts `?` placeholders, skipping quoted literals, quoted identifiers,
/// and comments.
///
/// Parameters bind strictly in order, so numbered (`?2`) and named
/// (`:name`, `@name`, `$name`) placeholders are rejected, as are
/// unterminated quotes and block comments.
fn scan_fragment(fragment: &str) -> Result<FragmentScan> {
    let reject = |what: &str| {
        Err(QueryError::Validation(format!(
            "predicate `{fragment}`: {what}"
        )))
    };

    let mut placeholders = 0;
    let mut state = ScanState::Code;
    let mut chars = fragment.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            ScanState::Code => match c {
                '\'' | '"' | '`' => state = ScanState::Quoted(c),
                '-' if chars.peek() == Some(&'-') => {
                    chars.next();
                    state = ScanState::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = ScanState::BlockComment;
                }
                '?' => {
                    if chars.peek().is_some_and(char::is_ascii_digit) {
                        return reject("numbered `?N` placeholders are not supported, use `?`");
                    }
                    placeholders += 1;
                }
                ':' | '@' | '$'
                    if chars
                        .peek()
                        .is_some_and(|n| n.is_alphanumeric() || *n == '_') =>
                {
                    return reject("named placeholders are not supported, use `?`");
                }
                _ => {}
            },
            // A doubled quote closes and reopens, which nets out the same.
            ScanState::Quoted(q) if c == q => state = ScanState::Code,
            ScanState::LineComment if c == '\n' => state = ScanState::Code,
            ScanState::BlockComment if c == '*' && chars.peek() == Some(&'/') => {
                chars.next();
                state = ScanState::Code;
            }
            ScanState::Quoted(_) | ScanState::LineComment | ScanState::BlockComment => {}
        }
    }

    match state {
        ScanState::Quoted(q) => reject(&format!("unterminated {q} quote")),
        ScanState::BlockComment => reject("unterminated /* comment"),
        ScanState::Code | ScanState::LineComment => Ok(FragmentScan {
            placeholders,
            ends_in_line_comment: matches!(state, ScanState::LineComment),
        }),
    }
}
