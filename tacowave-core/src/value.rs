use std::fmt;

use serde::{Deserialize, Serialize};

/// A dynamically typed hyperparameter value.
///
/// Overrides arrive as `Value`s and every field can be read back as one.
/// Deserializes from plain JSON (`null`, booleans, numbers, strings, arrays).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    None,
}

impl Value {
    /// Short name of the value's shape, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::None => "none",
        }
    }

    pub(crate) fn describe(&self) -> String {
        format!("{} `{self}`", self.type_name())
    }

    /// Infer a value from an override literal such as `2048`, `0.5`, `true`,
    /// `none`, `[16, 16]`, `(5,)` or `'mulaw'`.
    ///
    /// Anything that is not recognised as another shape is taken as a string.
    pub fn parse_literal(raw: &str) -> Value {
        let raw = raw.trim();
        match raw {
            "none" | "None" | "null" => return Value::None,
            "true" | "True" => return Value::Bool(true),
            "false" | "False" => return Value::Bool(false),
            _ => {}
        }
        if let Ok(v) = raw.parse::<i64>() {
            return Value::Int(v);
        }
        if let Ok(v) = raw.parse::<f64>() {
            // `nan` and `inf` stay strings and fail the float type check.
            if v.is_finite() {
                return Value::Float(v);
            }
        }
        if let Some(inner) = strip_delimiters(raw, '[', ']').or_else(|| strip_delimiters(raw, '(', ')'))
        {
            return Value::List(
                split_top_level(inner)
                    .into_iter()
                    .filter(|item| !item.trim().is_empty())
                    .map(Value::parse_literal)
                    .collect(),
            );
        }
        if let Some(inner) =
            strip_delimiters(raw, '\'', '\'').or_else(|| strip_delimiters(raw, '"', '"'))
        {
            return Value::Str(inner.to_string());
        }
        Value::Str(raw.to_string())
    }
}

fn strip_delimiters(raw: &str, open: char, close: char) -> Option<&str> {
    if raw.len() >= 2 && raw.starts_with(open) && raw.ends_with(close) {
        Some(&raw[open.len_utf8()..raw.len() - close.len_utf8()])
    } else {
        None
    }
}

/// Split on commas that are not nested inside brackets, parentheses or quotes.
pub(crate) fn split_top_level(raw: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in raw.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '[' | '(') => depth += 1,
            (None, ']' | ')') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&raw[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&raw[start..]);
    parts
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            // Debug formatting is the shortest representation that round-trips.
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Str(v) => f.write_str(v),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::None => f.write_str("none"),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v.into())
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Int(v.into())
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}
