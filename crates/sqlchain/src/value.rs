//! Bound parameter values and per-clause parameter buckets.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::Serialize;

/// An opaque value bound to one `?` placeholder.
///
/// The driver layer decides how each variant is sent to the server; this
/// crate only keeps them in placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Uuid(uuid::Uuid),
    #[cfg(feature = "rust_decimal")]
    Decimal(rust_decimal::Decimal),
}

impl Value {
    /// Whether this is the literal text `NULL` or `NOT NULL`.
    ///
    /// Conditions compare against these with `IS` instead of binding them.
    pub(crate) fn null_keyword(&self) -> Option<&str> {
        match self {
            Value::Text(s) if s == "NULL" || s == "NOT NULL" => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(<$target>::from(v))
                }
            }
        )*
    };
}

impl_from_int!(Int, i64: i8, i16, i32, i64);
impl_from_int!(UInt, u64: u8, u16, u32, u64);

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(v: DateTime<Tz>) -> Self {
        Value::DateTime(v.naive_utc())
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Value::Uuid(v)
    }
}

#[cfg(feature = "rust_decimal")]
impl From<rust_decimal::Decimal> for Value {
    fn from(v: rust_decimal::Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// The clause a bound parameter belongs to.
///
/// Rendering concatenates the buckets in declaration order, which is also the
/// order the clauses appear in a SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClauseKind {
    Table,
    Join,
    Where,
    Having,
}

impl ClauseKind {
    /// Lower-case clause name, used in error context.
    pub fn as_str(self) -> &'static str {
        match self {
            ClauseKind::Table => "table",
            ClauseKind::Join => "join",
            ClauseKind::Where => "where",
            ClauseKind::Having => "having",
        }
    }
}

/// Ordered parameter lists keyed by clause kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamBuckets {
    table: Vec<Value>,
    join: Vec<Value>,
    r#where: Vec<Value>,
    having: Vec<Value>,
}

impl ParamBuckets {
    /// Create empty buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters collected for one clause, in emission order.
    pub fn get(&self, kind: ClauseKind) -> &[Value] {
        match kind {
            ClauseKind::Table => &self.table,
            ClauseKind::Join => &self.join,
            ClauseKind::Where => &self.r#where,
            ClauseKind::Having => &self.having,
        }
    }

    /// Mutable access to one clause's list.
    pub fn get_mut(&mut self, kind: ClauseKind) -> &mut Vec<Value> {
        match kind {
            ClauseKind::Table => &mut self.table,
            ClauseKind::Join => &mut self.join,
            ClauseKind::Where => &mut self.r#where,
            ClauseKind::Having => &mut self.having,
        }
    }

    /// Append values to the end of one clause's list.
    pub fn extend(&mut self, kind: ClauseKind, values: impl IntoIterator<Item = Value>) {
        self.get_mut(kind).extend(values);
    }

    /// Replace one clause's list.
    pub fn replace(&mut self, kind: ClauseKind, values: Vec<Value>) {
        *self.get_mut(kind) = values;
    }

    /// The values of `kinds`, concatenated in the order given.
    pub fn concat(&self, kinds: &[ClauseKind]) -> Vec<Value> {
        let mut out = Vec::with_capacity(kinds.iter().map(|k| self.get(*k).len()).sum());
        for kind in kinds {
            out.extend_from_slice(self.get(*kind));
        }
        out
    }

    /// Remove every collected parameter.
    pub fn clear(&mut self) {
        self.table.clear();
        self.join.clear();
        self.r#where.clear();
        self.having.clear();
    }

    /// Total number of collected parameters.
    pub fn len(&self) -> usize {
        self.table.len() + self.join.len() + self.r#where.len() + self.having.len()
    }

    /// Check if no parameters were collected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_none_is_null() {
        let v: Value = Option::<i32>::None.into();
        assert!(v.is_null());
        assert_eq!(Value::from(Some(3u8)), Value::UInt(3));
    }

    #[test]
    fn null_keyword_only_matches_exact_text() {
        assert_eq!(Value::from("NULL").null_keyword(), Some("NULL"));
        assert_eq!(Value::from("NOT NULL").null_keyword(), Some("NOT NULL"));
        assert_eq!(Value::from("null").null_keyword(), None);
        assert_eq!(Value::Null.null_keyword(), None);
    }

    #[test]
    fn buckets_keep_clause_order_separate() {
        let mut buckets = ParamBuckets::new();
        buckets.extend(ClauseKind::Where, [Value::from(1), Value::from(2)]);
        buckets.extend(ClauseKind::Join, [Value::from("x")]);
        buckets.extend(ClauseKind::Where, [Value::from(3)]);

        assert_eq!(
            buckets.get(ClauseKind::Where),
            &[Value::Int(1), Value::Int(2), Value::Int(3)]
        );
        assert_eq!(buckets.get(ClauseKind::Join), &[Value::from("x")]);
        assert_eq!(buckets.len(), 4);
        assert_eq!(
            buckets.concat(&[ClauseKind::Join, ClauseKind::Where]),
            vec![Value::from("x"), Value::Int(1), Value::Int(2), Value::Int(3)]
        );

        buckets.clear();
        assert!(buckets.is_empty());
    }

    #[test]
    fn serializes_untagged() {
        let params = vec![Value::from(1), Value::from("a"), Value::Null];
        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(json, r#"[1,"a",null]"#);
    }
}
