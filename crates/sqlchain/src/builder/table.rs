//! Table resolution: plain names, aliased names and sub-queries.

use super::Builder;
use crate::error::{SqlError, SqlResult};
use crate::ident::{escape_id, quote};
use crate::value::{ClauseKind, Value};

/// Table override for the current statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum TableSource {
    /// Name spec, escaped at render time (`users`, `users u`, `db.users`)
    Named(String),
    /// Rendered `(SELECT ...) as `tmpN``
    Query(String),
}

impl Builder {
    /// Use another table for the current statement.
    ///
    /// `name` may carry an alias (`"m_users u"`, `"m_users as u"`) or a
    /// qualifier (`"db.m_users"`). The override is cleared by the next
    /// render; the table given to [`Builder::new`] comes back afterwards.
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table = Some(TableSource::Named(name.into()));
        self.params.replace(ClauseKind::Table, Vec::new());
        self
    }

    /// Select from a sub-query aliased `tmp{n}`.
    ///
    /// `build` receives a fresh child builder that already knows its alias
    /// number, so sub-queries nested inside it are numbered after it.
    ///
    /// # Example
    /// ```
    /// # use sqlchain::Builder;
    /// # fn main() -> sqlchain::SqlResult<()> {
    /// let stmt = Builder::new("user")
    ///     .table_sub(|m| m.table("m_users").select("sex").group("sex"))
    ///     .to_sql()?;
    /// assert_eq!(
    ///     stmt.sql,
    ///     "SELECT * FROM (SELECT `sex` FROM `m_users` GROUP BY `sex`) as `tmp1`"
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn table_sub<F>(mut self, build: F) -> Self
    where
        F: FnOnce(Builder) -> Builder,
    {
        match self.nest(ClauseKind::Table, build) {
            Ok((sql, params)) => {
                self.table = Some(TableSource::Query(sql));
                self.params.replace(ClauseKind::Table, params);
            }
            Err(err) => self.fail(err),
        }
        self
    }

    /// Alias for plain-name tables: `` `user` as `u` ``.
    ///
    /// Ignored when the table name carries its own alias or is a sub-query.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.table_alias = Some(alias.into());
        self
    }

    /// The rendered table fragment for the current statement.
    pub fn get_table(&self) -> String {
        match &self.table {
            Some(TableSource::Query(sql)) => sql.clone(),
            Some(TableSource::Named(name)) => self.render_name(name),
            None if self.table_name.is_empty() => String::new(),
            None => self.render_name(&self.table_name),
        }
    }

    fn render_name(&self, name: &str) -> String {
        let mut out = escape_id(name);
        if let Some(alias) = &self.table_alias {
            if !name.trim().contains(' ') {
                out.push_str(" as ");
                out.push_str(&quote(alias));
            }
        }
        out
    }

    /// Render a child builder as `(sql) as `tmp{n}`` and take over its
    /// alias counter.
    pub(crate) fn nest<F>(&mut self, kind: ClauseKind, build: F) -> SqlResult<(String, Vec<Value>)>
    where
        F: FnOnce(Builder) -> Builder,
    {
        let seq = self.alias_seq + 1;
        let mut child = build(Builder::nested(seq));
        self.alias_seq = self.alias_seq.max(child.alias_seq);

        let stmt = child
            .to_sql()
            .map_err(|err| SqlError::sub_query(kind.as_str(), err))?;
        Ok((format!("({}) as `tmp{seq}`", stmt.sql), stmt.params))
    }
}
