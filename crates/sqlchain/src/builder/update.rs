//! UPDATE rendering.

use super::Builder;
use crate::error::{SqlError, SqlResult};
use crate::ident::escape_id;
use crate::record::Record;
use crate::statement::{Statement, StatementKind};
use crate::value::ClauseKind;

impl Builder {
    /// Render `UPDATE table SET a=?,b=? WHERE ...` and reset the builder.
    ///
    /// Columns follow the record's order. The WHERE conditions are whatever
    /// was added through `where_*`; none means every row.
    pub fn update(&mut self, values: impl Into<Record>) -> SqlResult<Statement> {
        let result = self.render_update(values.into());
        self.finish(StatementKind::Update, result)
    }

    fn render_update(&self, values: Record) -> SqlResult<Statement> {
        self.validate()?;
        if values.is_empty() {
            return Err(SqlError::invalid_argument("UPDATE needs at least one field"));
        }

        let assignments = values
            .fields()
            .map(|field| format!("{}=?", escape_id(field)))
            .collect::<Vec<_>>()
            .join(",");

        let mut sql = format!("UPDATE {} SET {assignments}", self.get_table());
        sql.push_str(&self.where_sql());

        let mut params = self.params.get(ClauseKind::Table).to_vec();
        params.extend(values.iter().map(|(_, value)| value.clone()));
        params.extend_from_slice(self.params.get(ClauseKind::Where));

        Ok(Statement::new(sql, params))
    }
}
