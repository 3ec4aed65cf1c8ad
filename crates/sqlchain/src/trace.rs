//! `tracing` events for rendered statements.
//!
//! Enabled by the `tracing` crate feature (on by default). Events use the
//! `sqlchain.sql` target so they can be filtered on their own, e.g.
//! `RUST_LOG=sqlchain.sql=debug`.

use crate::error::SqlResult;
use crate::statement::{Statement, StatementKind};

/// Longest SQL text put into an event, in bytes.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
const MAX_SQL_LENGTH: usize = 200;

/// Cut `sql` to at most `max_bytes`, backing off to a char boundary.
#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn truncate_sql(sql: &str) -> String {
    if sql.len() > MAX_SQL_LENGTH {
        format!("{}...", truncate_sql_bytes(sql, MAX_SQL_LENGTH))
    } else {
        sql.to_string()
    }
}

/// Report a terminal render.
#[cfg(feature = "tracing")]
pub(crate) fn rendered(kind: StatementKind, result: &SqlResult<Statement>) {
    match result {
        Ok(stmt) => tracing::debug!(
            target: "sqlchain.sql",
            kind = %kind,
            param_count = stmt.params.len(),
            sql = %truncate_sql(&stmt.sql),
            "statement rendered"
        ),
        Err(err) => tracing::warn!(
            target: "sqlchain.sql",
            kind = %kind,
            error = %err,
            "statement render failed"
        ),
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn rendered(_kind: StatementKind, _result: &SqlResult<Statement>) {}

/// Report an insert row dropped for missing a column of the first row.
#[cfg(feature = "tracing")]
pub(crate) fn skipped_row(index: usize) {
    tracing::debug!(target: "sqlchain.sql", row = index, "insert row skipped: missing column");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn skipped_row(_index: usize) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_sql_is_untouched() {
        assert_eq!(truncate_sql("SELECT 1"), "SELECT 1");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let sql = "é".repeat(150);
        let cut = truncate_sql_bytes(&sql, 201);
        assert_eq!(cut.len(), 200);
        assert!(truncate_sql(&sql).ends_with("..."));
    }
}
