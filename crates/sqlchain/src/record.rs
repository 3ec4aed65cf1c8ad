//! Ordered field/value lists for INSERT, UPDATE and upserts.

use crate::value::Value;
use std::collections::{BTreeMap, HashMap};

/// An ordered set of `field = value` pairs.
///
/// Column order in the rendered SQL is the insertion order, so output is
/// deterministic. Setting a field twice overwrites the value in place.
///
/// # Example
/// ```ignore
/// use sqlchain::Record;
///
/// let row = Record::new().set("name", "alice").set("age", 18);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    entries: Vec<(String, Value)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field (consuming form).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Look up a field's value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v)
    }

    /// Field names in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    /// `(field, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(f, v)| (f.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl<K: Into<String>, V: Into<Value>> From<Vec<(K, V)>> for Record {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Record {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Sorted by key.
impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Record {
    fn from(map: BTreeMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

/// Column order follows the map's iteration order, which is unspecified.
impl<K: Into<String>, V: Into<Value>, S> From<HashMap<K, V, S>> for Record {
    fn from(map: HashMap<K, V, S>) -> Self {
        map.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let row = Record::new().set("name", "a").set("age", 18).set("id", 1);
        assert_eq!(row.fields().collect::<Vec<_>>(), vec!["name", "age", "id"]);
    }

    #[test]
    fn overwrite_keeps_position() {
        let row = Record::new().set("name", "a").set("age", 18).set("name", "b");
        assert_eq!(row.len(), 2);
        assert_eq!(row.fields().next(), Some("name"));
        assert_eq!(row.get("name"), Some(&Value::from("b")));
    }

    #[test]
    fn from_btree_map_is_sorted() {
        let mut map = BTreeMap::new();
        map.insert("z", 1);
        map.insert("a", 2);
        let row = Record::from(map);
        assert_eq!(row.fields().collect::<Vec<_>>(), vec!["a", "z"]);
    }
}
