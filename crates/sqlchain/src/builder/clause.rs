//! JOIN, GROUP BY, ORDER BY and LIMIT, plus the fragment assemblers the
//! terminal renders share.

use super::{Builder, render_fields};
use crate::ident::{IntoFields, escape_id};
use crate::value::{ClauseKind, Value};

/// Join flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    Right,
}

impl JoinKind {
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
        }
    }
}

/// The condition is emitted as written, so it carries its own `ON` / `USING`.
fn join_fragment(kind: JoinKind, table: &str, condition: &str) -> String {
    let condition = condition.trim();
    if condition.is_empty() {
        format!("{} JOIN {table}", kind.keyword())
    } else {
        format!("{} JOIN {table} {condition}", kind.keyword())
    }
}

impl Builder {
    // ==================== JOIN ====================

    /// `INNER JOIN table condition`, e.g. `join("order o", "ON o.user_id = u.id")`.
    pub fn join(self, table: &str, condition: &str) -> Self {
        self.join_with(JoinKind::Inner, table, condition, std::iter::empty::<Value>())
    }

    /// `LEFT JOIN table condition`
    pub fn left_join(self, table: &str, condition: &str) -> Self {
        self.join_with(JoinKind::Left, table, condition, std::iter::empty::<Value>())
    }

    /// `RIGHT JOIN table condition`
    pub fn right_join(self, table: &str, condition: &str) -> Self {
        self.join_with(JoinKind::Right, table, condition, std::iter::empty::<Value>())
    }

    /// Join with values bound by `?` placeholders inside the condition.
    pub fn join_with<V: Into<Value>>(
        mut self,
        kind: JoinKind,
        table: &str,
        condition: &str,
        params: impl IntoIterator<Item = V>,
    ) -> Self {
        self.clauses
            .joins
            .push(join_fragment(kind, &escape_id(table), condition));
        self.params
            .extend(ClauseKind::Join, params.into_iter().map(Into::into));
        self
    }

    /// Join a sub-query aliased `tmp{n}`.
    ///
    /// # Example
    /// ```
    /// # use sqlchain::{Builder, JoinKind};
    /// # fn main() -> sqlchain::SqlResult<()> {
    /// let stmt = Builder::new("user")
    ///     .alias("u")
    ///     .join_sub(
    ///         JoinKind::Inner,
    ///         |b| b.table("contacts").where_op("id", ">", 10),
    ///         "ON tmp1.user_id=u.user_id",
    ///     )
    ///     .to_sql()?;
    /// assert_eq!(
    ///     stmt.sql,
    ///     "SELECT * FROM `user` as `u` INNER JOIN (SELECT * FROM `contacts` WHERE `id` > ?) as `tmp1` ON tmp1.user_id=u.user_id"
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn join_sub<F>(mut self, kind: JoinKind, build: F, condition: &str) -> Self
    where
        F: FnOnce(Builder) -> Builder,
    {
        match self.nest(ClauseKind::Join, build) {
            Ok((table, params)) => {
                self.clauses.joins.push(join_fragment(kind, &table, condition));
                self.params.extend(ClauseKind::Join, params);
            }
            Err(err) => self.fail(err),
        }
        self
    }

    // ==================== GROUP / ORDER / LIMIT ====================

    /// Append GROUP BY fields.
    pub fn group(mut self, fields: impl IntoFields) -> Self {
        let rendered = render_fields(fields);
        if !rendered.is_empty() {
            self.clauses.groups.push(rendered);
        }
        self
    }

    /// `ORDER BY field DESC`
    pub fn order(self, field: &str) -> Self {
        self.order_desc(field)
    }

    /// `ORDER BY field {direction}`; the direction is uppercased.
    pub fn order_by(mut self, field: &str, direction: &str) -> Self {
        let direction = direction.trim().to_uppercase();
        let item = if direction.is_empty() {
            escape_id(field)
        } else {
            format!("{} {direction}", escape_id(field))
        };
        self.clauses.orders.push(item);
        self
    }

    pub fn order_asc(self, field: &str) -> Self {
        self.order_by(field, "ASC")
    }

    pub fn order_desc(self, field: &str) -> Self {
        self.order_by(field, "DESC")
    }

    /// Raw ORDER BY item, e.g. `FIELD(id, 3, 1, 2)`.
    pub fn order_raw(mut self, sql: impl Into<String>) -> Self {
        self.clauses.orders.push(sql.into());
        self
    }

    /// `LIMIT n`
    pub fn limit(mut self, n: i64) -> Self {
        self.clauses.limit = Some(format!(" LIMIT {n}"));
        self
    }

    /// `LIMIT offset,n`
    pub fn limit_offset(mut self, offset: i64, n: i64) -> Self {
        self.clauses.limit = Some(format!(" LIMIT {offset},{n}"));
        self
    }

    /// 1-based page: `LIMIT (page-1)*size,size`.
    ///
    /// The offset wraps on overflow instead of panicking.
    pub fn page(self, page: i64, size: i64) -> Self {
        self.limit_offset(page.wrapping_sub(1).wrapping_mul(size), size)
    }

    // ==================== Fragment assembly ====================

    pub(crate) fn join_sql(&self) -> String {
        if self.clauses.joins.is_empty() {
            return String::new();
        }
        format!(" {}", self.clauses.joins.join(" "))
    }

    pub(crate) fn where_sql(&self) -> String {
        let body = self.clauses.wheres.concat();
        let body = body.trim();
        if body.is_empty() {
            String::new()
        } else {
            format!(" WHERE {body}")
        }
    }

    pub(crate) fn group_sql(&self) -> String {
        if self.clauses.groups.is_empty() {
            return String::new();
        }
        format!(" GROUP BY {}", self.clauses.groups.join(","))
    }

    pub(crate) fn having_sql(&self) -> String {
        let body = self.clauses.havings.concat();
        let body = body.trim();
        if body.is_empty() {
            String::new()
        } else {
            format!(" HAVING {body}")
        }
    }

    pub(crate) fn order_sql(&self) -> String {
        if self.clauses.orders.is_empty() {
            return String::new();
        }
        format!(" ORDER BY {}", self.clauses.orders.join(","))
    }

    pub(crate) fn limit_sql(&self) -> &str {
        self.clauses.limit.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_fragments_keep_order() {
        let b = Builder::new("user")
            .join("contacts c", "ON c.user_id = user.id")
            .left_join("orders", "ON orders.user_id = user.id");
        assert_eq!(
            b.join_fragments(),
            [
                "INNER JOIN `contacts` as `c` ON c.user_id = user.id",
                "LEFT JOIN `orders` ON orders.user_id = user.id",
            ]
        );
        assert_eq!(
            b.join_sql(),
            " INNER JOIN `contacts` as `c` ON c.user_id = user.id LEFT JOIN `orders` ON orders.user_id = user.id"
        );
    }

    #[test]
    fn join_without_condition_has_no_trailing_space() {
        let b = Builder::new("user").right_join("roles", "  ");
        assert_eq!(b.join_fragments(), ["RIGHT JOIN `roles`"]);
    }

    #[test]
    fn join_condition_is_verbatim() {
        let b = Builder::new("user")
            .alias("u")
            .join("order o", "  USING (user_id) ")
            .left_join("order o", "o.user_id=u.user_id and o.type=?");
        assert_eq!(
            b.join_fragments(),
            [
                "INNER JOIN `order` as `o` USING (user_id)",
                "LEFT JOIN `order` as `o` o.user_id=u.user_id and o.type=?",
            ]
        );
    }

    #[test]
    fn join_params_go_to_join_bucket() {
        let b = Builder::new("user").join_with(
            JoinKind::Left,
            "orders o",
            "ON o.user_id = user.id AND o.status = ?",
            ["paid"],
        );
        assert_eq!(b.params(ClauseKind::Join), [Value::from("paid")]);
        assert!(b.params(ClauseKind::Where).is_empty());
    }

    #[test]
    fn order_directions() {
        let b = Builder::new("user")
            .order("id")
            .order_by("age", "asc")
            .order_raw("FIELD(id, 3, 1, 2)");
        assert_eq!(
            b.order_sql(),
            " ORDER BY `id` DESC,`age` ASC,FIELD(id, 3, 1, 2)"
        );
    }

    #[test]
    fn group_accumulates() {
        let b = Builder::new("user").group("age").group(["sex", "city"]);
        assert_eq!(b.group_fields(), ["`age`", "`sex`,`city`"]);
        assert_eq!(b.group_sql(), " GROUP BY `age`,`sex`,`city`");
    }

    #[test]
    fn limit_forms() {
        assert_eq!(Builder::new("user").limit(10).limit_sql(), " LIMIT 10");
        assert_eq!(
            Builder::new("user").limit_offset(1, 10).limit_sql(),
            " LIMIT 1,10"
        );
        assert_eq!(Builder::new("user").page(1, 10).limit_sql(), " LIMIT 0,10");
        assert_eq!(Builder::new("user").page(3, 20).limit_sql(), " LIMIT 40,20");
        assert_eq!(Builder::new("user").page(0, 10).limit_sql(), " LIMIT -10,10");
        assert_eq!(
            Builder::new("user").limit(5).limit(7).limit_fragment(),
            Some(" LIMIT 7")
        );
    }

    #[test]
    fn page_offset_wraps_instead_of_panicking() {
        assert_eq!(
            Builder::new("user").page(i64::MIN, 10).limit_sql(),
            " LIMIT -10,10"
        );
        assert_eq!(
            Builder::new("user").page(i64::MAX, 10).limit_sql(),
            " LIMIT -20,10"
        );
        assert_eq!(
            Builder::new("user").page(2, i64::MAX).limit_sql(),
            format!(" LIMIT {},{}", i64::MAX, i64::MAX)
        );
    }

    #[test]
    fn empty_clauses_render_nothing() {
        let b = Builder::new("user");
        assert_eq!(b.join_sql(), "");
        assert_eq!(b.where_sql(), "");
        assert_eq!(b.group_sql(), "");
        assert_eq!(b.having_sql(), "");
        assert_eq!(b.order_sql(), "");
        assert_eq!(b.limit_sql(), "");
    }
}
