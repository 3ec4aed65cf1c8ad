//! Rendered statements.

use crate::value::Value;
use serde::Serialize;
use std::fmt;

/// The kind of statement a render call produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementKind {
    Select,
    Insert,
    Replace,
    Update,
    Delete,
}

impl StatementKind {
    /// SQL keyword that starts the statement.
    pub fn keyword(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Replace => "REPLACE",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// SQL text plus the values for its `?` placeholders, in order.
///
/// `sql` holds exactly one `?` per entry of `params`, ready for a driver's
/// positional binding API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    /// Create a new statement.
    pub fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    /// The SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound values in placeholder order.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Split into `(sql, params)`.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

impl From<Statement> for (String, Vec<Value>) {
    fn from(stmt: Statement) -> Self {
        stmt.into_parts()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql)
    }
}
