//! INSERT / REPLACE rendering, including INSERT ... SELECT and
//! ON DUPLICATE KEY UPDATE.

use super::{Builder, IntoRows, render_fields};
use crate::condition::placeholders;
use crate::error::{SqlError, SqlResult};
use crate::ident::{IntoFields, escape_id};
use crate::record::Record;
use crate::statement::{Statement, StatementKind};
use crate::trace;
use crate::value::{ClauseKind, Value};

impl Builder {
    /// Append `ON DUPLICATE KEY UPDATE` to the next INSERT.
    ///
    /// Keys are emitted verbatim (`age=?`), values are bound after the row
    /// values.
    pub fn duplicate_key(mut self, values: impl Into<Record>) -> Self {
        self.clauses.duplicate_key = Some(values.into());
        self
    }

    /// Render a multi-row INSERT and reset the builder.
    ///
    /// The column list comes from the first row. Later rows missing one of
    /// those columns are skipped; extra keys are ignored.
    ///
    /// # Example
    /// ```
    /// # use sqlchain::{Builder, record};
    /// # fn main() -> sqlchain::SqlResult<()> {
    /// let stmt = Builder::new("user").insert(vec![
    ///     record! { "name" => "a", "age" => 18 },
    ///     record! { "name" => "b", "age" => 20 },
    /// ])?;
    /// assert_eq!(stmt.sql, "INSERT INTO `user` (`name`,`age`) VALUES(?,?),(?,?)");
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert(&mut self, rows: impl IntoRows) -> SqlResult<Statement> {
        let result = self.render_insert(StatementKind::Insert, rows.into_rows());
        self.finish(StatementKind::Insert, result)
    }

    /// Same as [`Builder::insert`] with `REPLACE`.
    pub fn replace(&mut self, rows: impl IntoRows) -> SqlResult<Statement> {
        let result = self.render_insert(StatementKind::Replace, rows.into_rows());
        self.finish(StatementKind::Replace, result)
    }

    /// `INSERT INTO table (fields) SELECT ...`
    pub fn insert_select(
        &mut self,
        fields: impl IntoFields,
        query: Builder,
    ) -> SqlResult<Statement> {
        let result =
            self.render_insert_select(StatementKind::Insert, render_fields(fields), query);
        self.finish(StatementKind::Insert, result)
    }

    /// `REPLACE INTO table (fields) SELECT ...`
    pub fn replace_select(
        &mut self,
        fields: impl IntoFields,
        query: Builder,
    ) -> SqlResult<Statement> {
        let result =
            self.render_insert_select(StatementKind::Replace, render_fields(fields), query);
        self.finish(StatementKind::Replace, result)
    }

    fn render_insert(&self, kind: StatementKind, rows: Vec<Record>) -> SqlResult<Statement> {
        self.validate()?;

        let columns: Vec<&str> = match rows.first() {
            Some(first) if !first.is_empty() => first.fields().collect(),
            Some(_) => {
                return Err(SqlError::invalid_argument(format!(
                    "{kind} needs at least one field"
                )));
            }
            None => {
                return Err(SqlError::invalid_argument(format!(
                    "{kind} needs at least one row"
                )));
            }
        };

        let mut params = self.params.get(ClauseKind::Table).to_vec();
        let mut tuples = Vec::with_capacity(rows.len());
        let tuple = format!("({})", placeholders(columns.len()));

        for (index, row) in rows.iter().enumerate() {
            let values: Option<Vec<&Value>> = columns.iter().map(|c| row.get(c)).collect();
            match values {
                Some(values) => {
                    params.extend(values.into_iter().cloned());
                    tuples.push(tuple.as_str());
                }
                None => trace::skipped_row(index),
            }
        }

        let column_sql = columns
            .iter()
            .map(|c| escape_id(c))
            .collect::<Vec<_>>()
            .join(",");
        let mut sql = format!(
            "{} INTO {} ({column_sql}) VALUES{}",
            kind.keyword(),
            self.get_table(),
            tuples.join(",")
        );

        if let Some(update) = self.clauses.duplicate_key.as_ref().filter(|r| !r.is_empty()) {
            let assignments = update
                .iter()
                .map(|(field, _)| format!("{field}=?"))
                .collect::<Vec<_>>()
                .join(",");
            sql.push_str(" ON DUPLICATE KEY UPDATE ");
            sql.push_str(&assignments);
            params.extend(update.iter().map(|(_, value)| value.clone()));
        }

        Ok(Statement::new(sql, params))
    }

    fn render_insert_select(
        &self,
        kind: StatementKind,
        columns: String,
        mut query: Builder,
    ) -> SqlResult<Statement> {
        self.validate()?;

        let select = query
            .to_sql()
            .map_err(|err| SqlError::sub_query("insert select", err))?;

        let mut sql = format!("{} INTO {}", kind.keyword(), self.get_table());
        if !columns.is_empty() {
            sql.push_str(" (");
            sql.push_str(&columns);
            sql.push(')');
        }
        sql.push(' ');
        sql.push_str(&select.sql);

        let mut params = self.params.get(ClauseKind::Table).to_vec();
        params.extend(select.params);
        Ok(Statement::new(sql, params))
    }
}
