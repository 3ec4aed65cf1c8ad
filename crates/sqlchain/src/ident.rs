//! Identifier escaping.
//!
//! Column and table specs are quoted with backticks. A spec may carry:
//!
//! - a qualifier: `user.id` -> `` `user`.`id` ``
//! - an alias: `id uid` or `id as uid` -> `` `id` as `uid` ``
//! - a function call: `count(id)` -> `` count(`id`) ``, `count(*)` stays as is
//!
//! Anything wrapped in [`Raw`] is emitted verbatim.
//!
//! # Example
//! ```
//! use sqlchain::ident::escape_id;
//!
//! assert_eq!(escape_id("u.name as n"), "`u`.`name` as `n`");
//! ```

/// A SQL fragment inserted without escaping or parameterization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw(pub String);

/// Wrap a string so it bypasses identifier escaping.
pub fn raw(sql: impl Into<String>) -> Raw {
    Raw(sql.into())
}

/// A field reference: an identifier spec or a raw fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// Escaped through [`escape_id`].
    Ident(String),
    /// Emitted verbatim.
    Raw(String),
}

impl Field {
    /// Render the field as SQL.
    pub fn to_sql(&self) -> String {
        match self {
            Field::Ident(spec) => escape_id(spec),
            Field::Raw(sql) => sql.clone(),
        }
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Ident(s.to_string())
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Field::Ident(s)
    }
}

impl From<&String> for Field {
    fn from(s: &String) -> Self {
        Field::Ident(s.clone())
    }
}

impl From<Raw> for Field {
    fn from(r: Raw) -> Self {
        Field::Raw(r.0)
    }
}

/// Convert an input into an ordered list of [`Field`]s.
///
/// A plain string is split on `,`; each piece is trimmed and escaped on its own.
pub trait IntoFields {
    fn into_fields(self) -> Vec<Field>;
}

fn split_fields(s: &str) -> Vec<Field> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Field::from)
        .collect()
}

impl IntoFields for &str {
    fn into_fields(self) -> Vec<Field> {
        split_fields(self)
    }
}

impl IntoFields for String {
    fn into_fields(self) -> Vec<Field> {
        split_fields(&self)
    }
}

impl IntoFields for Raw {
    fn into_fields(self) -> Vec<Field> {
        vec![Field::Raw(self.0)]
    }
}

impl IntoFields for Field {
    fn into_fields(self) -> Vec<Field> {
        vec![self]
    }
}

impl<T: Into<Field>> IntoFields for Vec<T> {
    fn into_fields(self) -> Vec<Field> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Field>, const N: usize> IntoFields for [T; N] {
    fn into_fields(self) -> Vec<Field> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<T: Into<Field> + Clone> IntoFields for &[T] {
    fn into_fields(self) -> Vec<Field> {
        self.iter().cloned().map(Into::into).collect()
    }
}

/// Quote one name, doubling embedded backticks.
pub(crate) fn quote(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push('`');
    for ch in name.chars() {
        if ch == '`' {
            out.push('`');
        }
        out.push(ch);
    }
    out.push('`');
    out
}

/// Split `base alias` / `base as alias` into its parts.
fn split_alias(spec: &str) -> (&str, Option<&str>) {
    let mut parts: Vec<&str> = if spec.contains(" as ") {
        spec.split(" as ").collect()
    } else if spec.contains(' ') {
        spec.split(' ').collect()
    } else {
        return (spec, None);
    };

    let base = parts.remove(0).trim();
    let alias = parts.into_iter().map(str::trim).find(|a| !a.is_empty());
    (base, alias)
}

/// Escape a single identifier spec.
pub fn escape_id(spec: &str) -> String {
    let (base, alias) = split_alias(spec.trim());

    let open = base.find('(');

    // Only a dot in front of the call parens qualifies the name.
    let (table, field) = match base.find('.') {
        Some(dot) if open.is_none_or(|o| dot < o) => {
            let rest = &base[dot + 1..];
            let rest = rest.split('.').next().unwrap_or(rest);
            (Some(base[..dot].trim()), rest.trim())
        }
        _ => (None, base),
    };

    let mut out = String::new();
    if let Some(table) = table {
        out.push_str(&quote(table));
        out.push('.');
    }

    match (field.find('('), field.find(')')) {
        (Some(o), Some(c)) if c > o => {
            let param = field[o + 1..c].trim_matches(|ch: char| ch == ' ' || ch == '`');
            out.push_str(&field[..o]);
            out.push('(');
            if param.is_empty() || param == "*" {
                out.push_str(param);
            } else {
                out.push_str(&escape_id(param));
            }
            out.push(')');
        }
        _ => out.push_str(&quote(field)),
    }

    if let Some(alias) = alias {
        out.push_str(" as ");
        out.push_str(&quote(alias));
    }
    out
}

/// Escape a field list into a comma-joined fragment.
pub fn escape_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::to_sql)
        .collect::<Vec<_>>()
        .join(",")
}
