//! Filter conditions for WHERE and HAVING clauses.
//!
//! A [`Condition`] is a closed set of tagged variants, each constructed
//! through a typed helper. [`Condition::compile`] turns one into a
//! [`Fragment`]: the SQL snippet (prefixed with its boolean [`Connector`])
//! plus the values it bound, in placeholder order.
//!
//! # Example
//! ```
//! use sqlchain::{Condition, Connector, Value};
//!
//! # fn main() -> sqlchain::SqlResult<()> {
//! let frag = Condition::op("age", ">", 18).compile(Connector::And)?;
//! assert_eq!(frag.sql, " AND `age` > ?");
//! assert_eq!(frag.params, [Value::Int(18)]);
//! # Ok(())
//! # }
//! ```

use crate::builder::Builder;
use crate::error::{SqlError, SqlResult};
use crate::ident::{Field, Raw};
use crate::value::Value;

/// Boolean keyword joining a condition to the ones before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connector {
    /// First condition of a clause.
    #[default]
    None,
    And,
    Or,
}

impl Connector {
    pub fn as_str(self) -> &'static str {
        match self {
            Connector::None => "",
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

/// Right-hand side of an operator condition.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// A single bound value.
    Value(Value),
    /// A list rendered as `(?,?,...)`, or the two ends of a `BETWEEN`.
    List(Vec<Value>),
}

/// A filter condition.
#[derive(Clone, Debug)]
pub enum Condition {
    /// `field = ?`
    Equals { field: Field, value: Value },
    /// `field {op} ?`, with `op` used verbatim.
    Operator {
        field: Field,
        op: String,
        value: Operand,
    },
    /// `field BETWEEN ? AND ?` or `field NOT BETWEEN ? AND ?`
    Between {
        field: Field,
        negated: bool,
        from: Value,
        to: Value,
    },
    /// `field IN (?,...)`
    In { field: Field, values: Vec<Value> },
    /// `field NOT IN (?,...)`
    NotIn { field: Field, values: Vec<Value> },
    /// `field IS NULL`
    Null { field: Field },
    /// `field IS NOT NULL`
    NotNull { field: Field },
    /// `EXISTS (sub-query)`
    Exists(Box<Builder>),
    /// `NOT EXISTS (sub-query)`
    NotExists(Box<Builder>),
    /// `field {op} (sub-query)`
    SubqueryCompare {
        field: Field,
        op: String,
        query: Box<Builder>,
    },
    /// SQL emitted verbatim, no parameters.
    RawFragment(String),
    /// The WHERE conditions of another builder, parenthesized.
    NestedGroup(Box<Builder>),
}

/// A compiled condition: SQL snippet and the values it consumed.
#[derive(Clone, Debug, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Condition {
    /// `field = value`
    pub fn eq(field: impl Into<Field>, value: impl Into<Value>) -> Self {
        Condition::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    /// `field {op} value`, e.g. `>`, `<>`, `like`.
    pub fn op(field: impl Into<Field>, op: impl Into<String>, value: impl Into<Value>) -> Self {
        Condition::Operator {
            field: field.into(),
            op: op.into(),
            value: Operand::Value(value.into()),
        }
    }

    /// `field {op} (values...)`, or `field {op} ? AND ?` when `op` is a BETWEEN.
    pub fn op_list<V: Into<Value>>(
        field: impl Into<Field>,
        op: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Condition::Operator {
            field: field.into(),
            op: op.into(),
            value: Operand::List(values.into_iter().map(Into::into).collect()),
        }
    }

    /// `field BETWEEN from AND to`
    pub fn between(field: impl Into<Field>, from: impl Into<Value>, to: impl Into<Value>) -> Self {
        Condition::Between {
            field: field.into(),
            negated: false,
            from: from.into(),
            to: to.into(),
        }
    }

    /// `field NOT BETWEEN from AND to`
    pub fn not_between(
        field: impl Into<Field>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        Condition::Between {
            field: field.into(),
            negated: true,
            from: from.into(),
            to: to.into(),
        }
    }

    /// `field IN (values...)`
    pub fn in_list<V: Into<Value>>(
        field: impl Into<Field>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Condition::In {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `field NOT IN (values...)`
    pub fn not_in<V: Into<Value>>(
        field: impl Into<Field>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Condition::NotIn {
            field: field.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// `field IS NULL`
    pub fn is_null(field: impl Into<Field>) -> Self {
        Condition::Null {
            field: field.into(),
        }
    }

    /// `field IS NOT NULL`
    pub fn is_not_null(field: impl Into<Field>) -> Self {
        Condition::NotNull {
            field: field.into(),
        }
    }

    /// `EXISTS (query)`
    pub fn exists(query: Builder) -> Self {
        Condition::Exists(Box::new(query))
    }

    /// `NOT EXISTS (query)`
    pub fn not_exists(query: Builder) -> Self {
        Condition::NotExists(Box::new(query))
    }

    /// `field {op} (query)`
    pub fn sub(field: impl Into<Field>, op: impl Into<String>, query: Builder) -> Self {
        Condition::SubqueryCompare {
            field: field.into(),
            op: op.into(),
            query: Box::new(query),
        }
    }

    /// `field IN (query)`
    pub fn in_sub(field: impl Into<Field>, query: Builder) -> Self {
        Self::sub(field, "IN", query)
    }

    /// `field NOT IN (query)`
    pub fn not_in_sub(field: impl Into<Field>, query: Builder) -> Self {
        Self::sub(field, "NOT IN", query)
    }

    /// Raw SQL condition.
    pub fn raw(sql: impl Into<String>) -> Self {
        Condition::RawFragment(sql.into())
    }

    /// Parenthesized group made of `group`'s WHERE conditions.
    pub fn group(group: Builder) -> Self {
        Condition::NestedGroup(Box::new(group))
    }

    /// Compile into a fragment prefixed with `connector`.
    pub fn compile(self, connector: Connector) -> SqlResult<Fragment> {
        let mut params = Vec::new();
        let body = self.compile_body(&mut params)?;
        let sql = match connector {
            Connector::None => format!(" {body}"),
            c => format!(" {} {body}", c.as_str()),
        };
        Ok(Fragment { sql, params })
    }

    fn compile_body(self, params: &mut Vec<Value>) -> SqlResult<String> {
        let sql = match self {
            Condition::RawFragment(sql) => sql,
            Condition::NestedGroup(group) => {
                let (sql, group_params) = (*group).into_where_parts()?;
                params.extend(group_params);
                format!("({sql})")
            }
            Condition::Equals { field, value } => {
                compare(&field, "=", Operand::Value(value), params)?
            }
            Condition::Operator { field, op, value } => compare(&field, &op, value, params)?,
            Condition::Between {
                field,
                negated,
                from,
                to,
            } => {
                let op = if negated { "NOT BETWEEN" } else { "BETWEEN" };
                params.push(from);
                params.push(to);
                format!("{} {op} ? AND ?", field.to_sql())
            }
            Condition::In { field, values } => list(&field, "IN", values, params),
            Condition::NotIn { field, values } => list(&field, "NOT IN", values, params),
            Condition::Null { field } => format!("{} IS NULL", field.to_sql()),
            Condition::NotNull { field } => format!("{} IS NOT NULL", field.to_sql()),
            Condition::Exists(query) => {
                format!("EXISTS ({})", sub_query(*query, params)?)
            }
            Condition::NotExists(query) => {
                format!("NOT EXISTS ({})", sub_query(*query, params)?)
            }
            Condition::SubqueryCompare { field, op, query } => {
                let sql = sub_query(*query, params)?;
                match field {
                    Field::Ident(kw) if kw == "EXISTS" || kw == "NOT EXISTS" => {
                        format!("{kw} ({sql})")
                    }
                    field => format!("{} {op} ({sql})", field.to_sql()),
                }
            }
        };
        Ok(sql)
    }
}

impl From<Raw> for Condition {
    fn from(r: Raw) -> Self {
        Condition::RawFragment(r.0)
    }
}

/// `?,?,?` with `n` placeholders.
pub(crate) fn placeholders(n: usize) -> String {
    let mut out = String::with_capacity(n * 2);
    for i in 0..n {
        if i > 0 {
            out.push(',');
        }
        out.push('?');
    }
    out
}

fn compare(field: &Field, op: &str, value: Operand, params: &mut Vec<Value>) -> SqlResult<String> {
    let column = field.to_sql();

    if op.contains("BETWEEN") {
        return match value {
            Operand::List(values) if values.len() == 2 => {
                params.extend(values);
                Ok(format!("{column} {op} ? AND ?"))
            }
            Operand::List(values) => Err(SqlError::invalid_argument(format!(
                "{op} on {column} needs exactly 2 values, got {}",
                values.len()
            ))),
            Operand::Value(_) => Err(SqlError::invalid_argument(format!(
                "{op} on {column} needs a list of 2 values, got a scalar"
            ))),
        };
    }

    match value {
        Operand::List(values) => Ok(list(field, op, values, params)),
        Operand::Value(value) => match value.null_keyword() {
            Some(kw) => Ok(format!("{column} IS {kw}")),
            None => {
                params.push(value);
                Ok(format!("{column} {op} ?"))
            }
        },
    }
}

fn list(field: &Field, op: &str, values: Vec<Value>, params: &mut Vec<Value>) -> String {
    let sql = format!("{} {op} ({})", field.to_sql(), placeholders(values.len()));
    params.extend(values);
    sql
}

fn sub_query(mut query: Builder, params: &mut Vec<Value>) -> SqlResult<String> {
    let stmt = query
        .to_sql()
        .map_err(|err| SqlError::sub_query("condition", err))?;
    params.extend(stmt.params);
    Ok(stmt.sql)
}
