//! WHERE and HAVING mutators.
//!
//! Every method compiles its condition right away. The first condition of a
//! clause gets no connector; later ones get `AND` (`where_*`, `having_*`) or
//! `OR` (`or_where_*`, `or_having_*`).

use super::Builder;
use crate::condition::{Condition, Connector};
use crate::ident::Field;
use crate::value::{ClauseKind, Value};

impl Builder {
    /// Compile `cond` into the WHERE or HAVING clause.
    fn push_condition(&mut self, kind: ClauseKind, or: bool, cond: Condition) {
        let fragments = match kind {
            ClauseKind::Having => &self.clauses.havings,
            _ => &self.clauses.wheres,
        };
        let connector = match (fragments.is_empty(), or) {
            (true, _) => Connector::None,
            (false, false) => Connector::And,
            (false, true) => Connector::Or,
        };

        match cond.compile(connector) {
            Ok(fragment) => {
                match kind {
                    ClauseKind::Having => self.clauses.havings.push(fragment.sql),
                    _ => self.clauses.wheres.push(fragment.sql),
                }
                self.params.extend(kind, fragment.params);
            }
            Err(err) => self.fail(err),
        }
    }

    // ==================== WHERE (AND) ====================

    /// Add a WHERE condition joined with AND.
    pub fn where_cond(mut self, cond: Condition) -> Self {
        self.push_condition(ClauseKind::Where, false, cond);
        self
    }

    /// WHERE field = value
    pub fn where_eq(self, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        self.where_cond(Condition::eq(field, value))
    }

    /// WHERE field {op} value
    pub fn where_op(
        self,
        field: impl Into<Field>,
        op: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.where_cond(Condition::op(field, op, value))
    }

    /// WHERE field {op} (values...), or `? AND ?` for BETWEEN operators
    pub fn where_op_list<V: Into<Value>>(
        self,
        field: impl Into<Field>,
        op: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.where_cond(Condition::op_list(field, op, values))
    }

    /// WHERE field IN (values...)
    pub fn where_in<V: Into<Value>>(
        self,
        field: impl Into<Field>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.where_cond(Condition::in_list(field, values))
    }

    /// WHERE field NOT IN (values...)
    pub fn where_not_in<V: Into<Value>>(
        self,
        field: impl Into<Field>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.where_cond(Condition::not_in(field, values))
    }

    /// WHERE field IN (sub-query)
    pub fn where_in_sub(self, field: impl Into<Field>, query: Builder) -> Self {
        self.where_cond(Condition::in_sub(field, query))
    }

    /// WHERE field NOT IN (sub-query)
    pub fn where_not_in_sub(self, field: impl Into<Field>, query: Builder) -> Self {
        self.where_cond(Condition::not_in_sub(field, query))
    }

    /// WHERE field {op} (sub-query)
    pub fn where_sub(self, field: impl Into<Field>, op: impl Into<String>, query: Builder) -> Self {
        self.where_cond(Condition::sub(field, op, query))
    }

    /// WHERE field BETWEEN from AND to
    pub fn where_between(
        self,
        field: impl Into<Field>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        self.where_cond(Condition::between(field, from, to))
    }

    /// WHERE field NOT BETWEEN from AND to
    pub fn where_not_between(
        self,
        field: impl Into<Field>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        self.where_cond(Condition::not_between(field, from, to))
    }

    /// WHERE field IS NULL
    pub fn where_null(self, field: impl Into<Field>) -> Self {
        self.where_cond(Condition::is_null(field))
    }

    /// WHERE field IS NOT NULL
    pub fn where_not_null(self, field: impl Into<Field>) -> Self {
        self.where_cond(Condition::is_not_null(field))
    }

    /// WHERE EXISTS (sub-query)
    pub fn where_exists(self, query: Builder) -> Self {
        self.where_cond(Condition::exists(query))
    }

    /// WHERE NOT EXISTS (sub-query)
    pub fn where_not_exists(self, query: Builder) -> Self {
        self.where_cond(Condition::not_exists(query))
    }

    /// Raw WHERE condition, emitted verbatim.
    pub fn where_raw(self, sql: impl Into<String>) -> Self {
        self.where_cond(Condition::raw(sql))
    }

    /// Parenthesized group of conditions.
    ///
    /// # Example
    /// ```ignore
    /// Builder::new("user")
    ///     .where_op("id", "<>", 1)
    ///     .or_where_group(|g| g.where_op("age", ">", 18).where_op("name", "like", "%q%"));
    /// // WHERE `id` <> ? OR (`age` > ? AND `name` like ?)
    /// ```
    pub fn where_group<F>(self, build: F) -> Self
    where
        F: FnOnce(Builder) -> Builder,
    {
        self.where_cond(Condition::group(build(Builder::default())))
    }

    // ==================== WHERE (OR) ====================

    /// Add a WHERE condition joined with OR.
    pub fn or_where_cond(mut self, cond: Condition) -> Self {
        self.push_condition(ClauseKind::Where, true, cond);
        self
    }

    /// OR field = value
    pub fn or_where_eq(self, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        self.or_where_cond(Condition::eq(field, value))
    }

    /// OR field {op} value
    pub fn or_where_op(
        self,
        field: impl Into<Field>,
        op: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.or_where_cond(Condition::op(field, op, value))
    }

    /// OR field {op} (values...)
    pub fn or_where_op_list<V: Into<Value>>(
        self,
        field: impl Into<Field>,
        op: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.or_where_cond(Condition::op_list(field, op, values))
    }

    /// OR field IN (values...)
    pub fn or_where_in<V: Into<Value>>(
        self,
        field: impl Into<Field>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.or_where_cond(Condition::in_list(field, values))
    }

    /// OR field NOT IN (values...)
    pub fn or_where_not_in<V: Into<Value>>(
        self,
        field: impl Into<Field>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.or_where_cond(Condition::not_in(field, values))
    }

    /// OR field IN (sub-query)
    pub fn or_where_in_sub(self, field: impl Into<Field>, query: Builder) -> Self {
        self.or_where_cond(Condition::in_sub(field, query))
    }

    /// OR field NOT IN (sub-query)
    pub fn or_where_not_in_sub(self, field: impl Into<Field>, query: Builder) -> Self {
        self.or_where_cond(Condition::not_in_sub(field, query))
    }

    /// OR field {op} (sub-query)
    pub fn or_where_sub(
        self,
        field: impl Into<Field>,
        op: impl Into<String>,
        query: Builder,
    ) -> Self {
        self.or_where_cond(Condition::sub(field, op, query))
    }

    /// OR field BETWEEN from AND to
    pub fn or_where_between(
        self,
        field: impl Into<Field>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        self.or_where_cond(Condition::between(field, from, to))
    }

    /// OR field NOT BETWEEN from AND to
    pub fn or_where_not_between(
        self,
        field: impl Into<Field>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        self.or_where_cond(Condition::not_between(field, from, to))
    }

    /// OR field IS NULL
    pub fn or_where_null(self, field: impl Into<Field>) -> Self {
        self.or_where_cond(Condition::is_null(field))
    }

    /// OR field IS NOT NULL
    pub fn or_where_not_null(self, field: impl Into<Field>) -> Self {
        self.or_where_cond(Condition::is_not_null(field))
    }

    /// OR EXISTS (sub-query)
    pub fn or_where_exists(self, query: Builder) -> Self {
        self.or_where_cond(Condition::exists(query))
    }

    /// OR NOT EXISTS (sub-query)
    pub fn or_where_not_exists(self, query: Builder) -> Self {
        self.or_where_cond(Condition::not_exists(query))
    }

    /// Raw condition joined with OR.
    pub fn or_where_raw(self, sql: impl Into<String>) -> Self {
        self.or_where_cond(Condition::raw(sql))
    }

    /// Parenthesized group joined with OR.
    pub fn or_where_group<F>(self, build: F) -> Self
    where
        F: FnOnce(Builder) -> Builder,
    {
        self.or_where_cond(Condition::group(build(Builder::default())))
    }

    // ==================== HAVING ====================

    /// Add a HAVING condition joined with AND.
    pub fn having_cond(mut self, cond: Condition) -> Self {
        self.push_condition(ClauseKind::Having, false, cond);
        self
    }

    /// Add a HAVING condition joined with OR.
    pub fn or_having_cond(mut self, cond: Condition) -> Self {
        self.push_condition(ClauseKind::Having, true, cond);
        self
    }

    /// HAVING field = value
    pub fn having_eq(self, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        self.having_cond(Condition::eq(field, value))
    }

    /// OR field = value, in HAVING
    pub fn or_having_eq(self, field: impl Into<Field>, value: impl Into<Value>) -> Self {
        self.or_having_cond(Condition::eq(field, value))
    }

    /// HAVING field {op} value
    pub fn having_op(
        self,
        field: impl Into<Field>,
        op: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.having_cond(Condition::op(field, op, value))
    }

    /// OR field {op} value, in HAVING
    pub fn or_having_op(
        self,
        field: impl Into<Field>,
        op: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.or_having_cond(Condition::op(field, op, value))
    }

    /// Raw HAVING condition.
    pub fn having_raw(self, sql: impl Into<String>) -> Self {
        self.having_cond(Condition::raw(sql))
    }

    /// Raw HAVING condition joined with OR.
    pub fn or_having_raw(self, sql: impl Into<String>) -> Self {
        self.or_having_cond(Condition::raw(sql))
    }

    /// Parenthesized HAVING group; the group is written with `where_*` calls.
    pub fn having_group<F>(self, build: F) -> Self
    where
        F: FnOnce(Builder) -> Builder,
    {
        self.having_cond(Condition::group(build(Builder::default())))
    }

    /// Parenthesized HAVING group joined with OR.
    pub fn or_having_group<F>(self, build: F) -> Self
    where
        F: FnOnce(Builder) -> Builder,
    {
        self.or_having_cond(Condition::group(build(Builder::default())))
    }
}
