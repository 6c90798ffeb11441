//! Scripted in-memory session for unit tests.

use super::SqlSession;
use crate::error::{DeployError, Result};
use async_trait::async_trait;

/// Records every statement and query in order, serves scripted catalog
/// results matched by substring, and fails statements containing a
/// configured pattern.
#[derive(Default)]
pub struct ScriptedSession {
    /// Every SQL string seen, statements and queries alike, in call order.
    pub seen: Vec<String>,
    results: Vec<(String, Vec<Vec<String>>)>,
    fail_on: Vec<String>,
}

impl ScriptedSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `rows` for any query whose SQL contains `pattern`.
    pub fn with_result(mut self, pattern: &str, rows: Vec<Vec<&str>>) -> Self {
        let rows = rows
            .into_iter()
            .map(|r| r.into_iter().map(String::from).collect())
            .collect();
        self.results.push((pattern.to_string(), rows));
        self
    }

    /// Fail any executed statement whose SQL contains `pattern`.
    pub fn fail_on(mut self, pattern: &str) -> Self {
        self.fail_on.push(pattern.to_string());
        self
    }

    /// Statements (not queries) that were executed, filtered by substring.
    pub fn executed_containing(&self, pattern: &str) -> Vec<&String> {
        self.seen.iter().filter(|s| s.contains(pattern)).collect()
    }

    /// Index of the first seen SQL string containing `pattern`.
    pub fn position_of(&self, pattern: &str) -> Option<usize> {
        self.seen.iter().position(|s| s.contains(pattern))
    }
}

#[async_trait]
impl SqlSession for ScriptedSession {
    async fn execute(&mut self, sql: &str) -> Result<()> {
        self.seen.push(sql.to_string());
        for pattern in &self.fail_on {
            if sql.contains(pattern.as_str()) {
                return Err(DeployError::Database(format!(
                    "scripted failure on '{}'",
                    pattern
                )));
            }
        }
        Ok(())
    }

    async fn query_rows(&mut self, sql: &str) -> Result<Vec<Vec<String>>> {
        self.seen.push(sql.to_string());
        for (pattern, rows) in &self.results {
            if sql.contains(pattern.as_str()) {
                return Ok(rows.clone());
            }
        }
        Ok(Vec::new())
    }
}
