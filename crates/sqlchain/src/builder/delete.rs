//! DELETE rendering.

use super::Builder;
use crate::error::SqlResult;
use crate::statement::{Statement, StatementKind};
use crate::value::ClauseKind;

impl Builder {
    /// Render `DELETE FROM table WHERE ... ORDER BY ... LIMIT ...` and reset
    /// the builder.
    pub fn delete(&mut self) -> SqlResult<Statement> {
        let result = self.render_delete();
        self.finish(StatementKind::Delete, result)
    }

    fn render_delete(&self) -> SqlResult<Statement> {
        self.validate()?;

        let mut sql = format!("DELETE FROM {}", self.get_table());
        sql.push_str(&self.where_sql());
        sql.push_str(&self.order_sql());
        sql.push_str(self.limit_sql());

        let params = self
            .params
            .concat(&[ClauseKind::Table, ClauseKind::Where]);
        Ok(Statement::new(sql, params))
    }
}
