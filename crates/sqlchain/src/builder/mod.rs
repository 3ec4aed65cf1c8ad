//! Fluent statement builder.
//!
//! One [`Builder`] describes one statement. Mutators consume and return the
//! builder so calls chain; every input is normalized as soon as it arrives
//! (fields escaped, conditions compiled, nested builders rendered), so the
//! builder only holds rendered fragments and their parameters.
//!
//! Terminal calls ([`Builder::to_sql`], [`Builder::insert`],
//! [`Builder::update`], [`Builder::delete`], ...) render a [`Statement`] and
//! then clear the statement state. The table name given to
//! [`Builder::new`] survives, so the same instance can start the next
//! statement.
//!
//! ## Design
//!
//! - Placeholders are `?`; the Nth `?` of the output binds the Nth value.
//! - Values are collected per clause (table, join, where, having) and
//!   concatenated in clause order at render time.
//! - Sub-queries used as tables are aliased `tmp1`, `tmp2`, ... The counter
//!   is handed to each child when it is created and read back when it is
//!   rendered.
//!
//! # Example
//! ```
//! use sqlchain::Builder;
//!
//! # fn main() -> sqlchain::SqlResult<()> {
//! let stmt = Builder::new("user")
//!     .select(["id", "name"])
//!     .where_eq("status", 1)
//!     .or_where_op("name", "like", "%q%")
//!     .limit(10)
//!     .to_sql()?;
//! assert_eq!(
//!     stmt.sql,
//!     "SELECT `id`,`name` FROM `user` WHERE `status` = ? OR `name` like ? LIMIT 10"
//! );
//! assert_eq!(stmt.params.len(), 2);
//! # Ok(())
//! # }
//! ```

pub mod clause;
pub mod delete;
pub mod insert;
pub mod select;
pub mod table;
pub mod traits;
pub mod update;
pub mod where_builder;

pub use clause::JoinKind;
pub use traits::IntoRows;

use crate::error::{SqlError, SqlResult};
use crate::ident::{IntoFields, escape_fields};
use crate::record::Record;
use crate::statement::{Statement, StatementKind};
use crate::trace;
use crate::value::{ClauseKind, ParamBuckets, Value};
use table::TableSource;

/// Rendered clause fragments of the statement being built.
#[derive(Clone, Debug, Default)]
struct Clauses {
    /// Escaped SELECT fields
    fields: Vec<String>,
    /// WHERE fragments, each with its leading connector
    wheres: Vec<String>,
    /// HAVING fragments, each with its leading connector
    havings: Vec<String>,
    /// JOIN fragments
    joins: Vec<String>,
    /// Escaped GROUP BY fields
    groups: Vec<String>,
    /// ORDER BY items
    orders: Vec<String>,
    /// LIMIT fragment, with its leading space
    limit: Option<String>,
    /// ON DUPLICATE KEY UPDATE values
    duplicate_key: Option<Record>,
}

/// Statement builder.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct Builder {
    /// Table given at construction; survives renders
    table_name: String,
    /// Alias of a plain-name table; survives renders
    table_alias: Option<String>,
    /// Table override for the current statement
    table: Option<TableSource>,
    /// Sub-query aliases issued so far (`tmp{n}`)
    alias_seq: u32,
    /// Counter value this builder was created with
    alias_base: u32,
    clauses: Clauses,
    params: ParamBuckets,
    /// First error hit by a mutator
    build_error: Option<SqlError>,
}

impl Builder {
    /// Create a builder for `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table_name: table.into(),
            ..Self::default()
        }
    }

    /// A child builder for a sub-query aliased `tmp{seq}`.
    pub(crate) fn nested(seq: u32) -> Self {
        Self {
            alias_seq: seq,
            alias_base: seq,
            ..Self::default()
        }
    }

    // ==================== SELECT fields ====================

    /// Set the SELECT field list, replacing any previous one.
    ///
    /// Accepts `"id,name"`, `["id", "name"]`, a [`Raw`](crate::Raw) fragment,
    /// or a mixed list built with [`fields!`](crate::fields).
    pub fn select(mut self, fields: impl IntoFields) -> Self {
        self.clauses.fields = fields.into_fields().iter().map(|f| f.to_sql()).collect();
        self
    }

    /// Append fields to the SELECT list.
    pub fn add_select(mut self, fields: impl IntoFields) -> Self {
        self.clauses
            .fields
            .extend(fields.into_fields().iter().map(|f| f.to_sql()));
        self
    }

    // ==================== Accessors ====================

    /// Table name given at construction.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Escaped SELECT fields.
    pub fn fields(&self) -> &[String] {
        &self.clauses.fields
    }

    /// WHERE fragments, each with its leading connector.
    pub fn where_fragments(&self) -> &[String] {
        &self.clauses.wheres
    }

    /// HAVING fragments, each with its leading connector.
    pub fn having_fragments(&self) -> &[String] {
        &self.clauses.havings
    }

    /// JOIN fragments.
    pub fn join_fragments(&self) -> &[String] {
        &self.clauses.joins
    }

    /// Escaped GROUP BY fields.
    pub fn group_fields(&self) -> &[String] {
        &self.clauses.groups
    }

    /// ORDER BY items.
    pub fn order_fragments(&self) -> &[String] {
        &self.clauses.orders
    }

    /// LIMIT fragment, if any.
    pub fn limit_fragment(&self) -> Option<&str> {
        self.clauses.limit.as_deref()
    }

    /// Parameters collected so far for one clause.
    pub fn params(&self, kind: ClauseKind) -> &[Value] {
        self.params.get(kind)
    }

    /// The first error recorded by a mutator.
    pub fn build_error(&self) -> Option<&SqlError> {
        self.build_error.as_ref()
    }

    // ==================== Lifecycle ====================

    /// Clear the statement state: clauses, parameters, table override, alias
    /// counter and any recorded error. The table name and alias stay.
    pub fn reset(&mut self) {
        self.table = None;
        self.alias_seq = self.alias_base;
        self.clauses = Clauses::default();
        self.params.clear();
        self.build_error = None;
    }

    /// Record the first mutator error; later ones are dropped.
    pub(crate) fn fail(&mut self, err: SqlError) {
        if self.build_error.is_none() {
            self.build_error = Some(err);
        }
    }

    /// Fail fast on a recorded mutator error.
    pub(crate) fn validate(&self) -> SqlResult<()> {
        match &self.build_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    /// Reset after a terminal render and report it.
    pub(crate) fn finish(
        &mut self,
        kind: StatementKind,
        result: SqlResult<Statement>,
    ) -> SqlResult<Statement> {
        self.reset();
        trace::rendered(kind, &result);
        result
    }

    /// The WHERE clause of a condition group: fragments joined and trimmed,
    /// plus the WHERE parameters.
    pub(crate) fn into_where_parts(self) -> SqlResult<(String, Vec<Value>)> {
        self.validate()?;
        let sql = self.clauses.wheres.concat();
        let sql = sql.trim();
        if sql.is_empty() {
            return Err(SqlError::invalid_argument(
                "condition group has no conditions",
            ));
        }
        Ok((sql.to_string(), self.params.get(ClauseKind::Where).to_vec()))
    }

    fn field_list(&self) -> String {
        if self.clauses.fields.is_empty() {
            "*".to_string()
        } else {
            self.clauses.fields.join(",")
        }
    }
}

/// Escape `fields` into a comma-joined fragment.
pub(crate) fn render_fields(fields: impl IntoFields) -> String {
    escape_fields(&fields.into_fields())
}
