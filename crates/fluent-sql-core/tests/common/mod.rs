#![allow(dead_code)]

use std::collections::VecDeque;

use fluent_sql_core::{Executor, QueryError, RawResult, RenderedStatement, Result, Row, SqlValue};

/// Executor that records statements and answers from a script.
#[derive(Default)]
pub struct Script {
    pub seen: Vec<RenderedStatement>,
    replies: VecDeque<Result<RawResult>>,
}

impl Script {
    pub fn reply(mut self, reply: Result<RawResult>) -> Self {
        self.replies.push_back(reply);
        self
    }

    pub fn rows(self, rows: Vec<Row>) -> Self {
        self.reply(Ok(RawResult::Rows(rows)))
    }

    pub fn fail(self, error: QueryError) -> Self {
        self.reply(Err(error))
    }

    /// SQL of every statement run so far.
    pub fn sql(&self) -> Vec<&str> {
        self.seen.iter().map(|s| s.sql.as_str()).collect()
    }

    pub fn params(&self, index: usize) -> &[SqlValue] {
        &self.seen[index].params
    }
}

impl Executor for Script {
    fn run(&mut self, statement: &RenderedStatement) -> Result<RawResult> {
        self.seen.push(statement.clone());
        self.replies
            .pop_front()
            .unwrap_or_else(|| panic!("No scripted reply for: {}", statement.sql))
    }
}

pub fn user(id: i64, name: &str, age: i64) -> Row {
    [
        ("id", SqlValue::Integer(id)),
        ("name", SqlValue::from(name)),
        ("age", SqlValue::Integer(age)),
    ]
    .into_iter()
    .collect()
}
