//! SELECT rendering.

use super::Builder;
use crate::error::SqlResult;
use crate::statement::{Statement, StatementKind};
use crate::value::ClauseKind;

/// Clause order of a SELECT, which is also its parameter order.
const SELECT_PARAMS: [ClauseKind; 4] = [
    ClauseKind::Table,
    ClauseKind::Join,
    ClauseKind::Where,
    ClauseKind::Having,
];

impl Builder {
    /// Render a SELECT and reset the builder.
    ///
    /// `SELECT {fields} FROM {table}{joins}{where}{group}{having}{order}{limit}`
    pub fn to_sql(&mut self) -> SqlResult<Statement> {
        let result = self.render_select();
        self.finish(StatementKind::Select, result)
    }

    /// Render a SELECT without touching the builder state.
    pub(crate) fn render_select(&self) -> SqlResult<Statement> {
        self.validate()?;

        let mut sql = String::with_capacity(128);
        sql.push_str("SELECT ");
        sql.push_str(&self.field_list());
        sql.push_str(" FROM ");
        sql.push_str(&self.get_table());
        sql.push_str(&self.join_sql());
        sql.push_str(&self.where_sql());
        sql.push_str(&self.group_sql());
        sql.push_str(&self.having_sql());
        sql.push_str(&self.order_sql());
        sql.push_str(self.limit_sql());

        Ok(Statement::new(sql, self.params.concat(&SELECT_PARAMS)))
    }
}
