//! Typed plumbing between Rust field types and dynamic [`Value`]s.

use crate::Value;

/// A Rust type that can back a hyperparameter.
///
/// `Ref` is what the generated getter returns: copyable scalars by value,
/// strings and sequences as borrows.
pub trait Field: Sized {
    type Ref<'a>
    where
        Self: 'a;

    /// Human-readable description of the accepted shape.
    fn kind() -> String;

    fn get(&self) -> Self::Ref<'_>;

    fn to_value(&self) -> Value;

    /// Type-checked conversion; `None` when the value has the wrong shape.
    fn from_value(value: &Value) -> Option<Self>;
}

/// How a field is treated by [`HParams::debug_string`](crate::HParams::debug_string).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Render {
    /// Rendered as a `name: value` line.
    Scalar,
    /// Reference data; left out of summaries.
    Bulk,
}

/// Where a field's final value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Default or caller override.
    Input,
    /// Nullable input that is filled in from other fields when unset.
    Derived,
    /// Always computed during construction; overrides are rejected.
    Computed,
}

/// One row of the hyperparameter schema.
#[derive(Debug)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: fn() -> String,
    pub render: Render,
    pub origin: Origin,
    pub doc: &'static [&'static str],
}

impl FieldSpec {
    /// The doc comment of the field, one line per entry, trimmed.
    pub fn doc_lines(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.doc.iter().map(|line| line.trim())
    }
}

impl Field for usize {
    type Ref<'a> = usize;

    fn kind() -> String {
        "non-negative int".to_string()
    }

    fn get(&self) -> usize {
        *self
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => usize::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl Field for u64 {
    type Ref<'a> = u64;

    fn kind() -> String {
        "non-negative int".to_string()
    }

    fn get(&self) -> u64 {
        *self
    }

    // Values only enter through `from_value`, which admits `0..=i64::MAX`, so
    // the saturation below never triggers.
    fn to_value(&self) -> Value {
        Value::Int(i64::try_from(*self).unwrap_or(i64::MAX))
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => u64::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl Field for i64 {
    type Ref<'a> = i64;

    fn kind() -> String {
        "int".to_string()
    }

    fn get(&self) -> i64 {
        *self
    }

    fn to_value(&self) -> Value {
        Value::Int(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl Field for f64 {
    type Ref<'a> = f64;

    fn kind() -> String {
        "float".to_string()
    }

    fn get(&self) -> f64 {
        *self
    }

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) if v.is_finite() => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }
}

impl Field for bool {
    type Ref<'a> = bool;

    fn kind() -> String {
        "bool".to_string()
    }

    fn get(&self) -> bool {
        *self
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl Field for String {
    type Ref<'a> = &'a str;

    fn kind() -> String {
        "str".to_string()
    }

    fn get(&self) -> &str {
        self
    }

    fn to_value(&self) -> Value {
        Value::Str(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(v) => Some(v.clone()),
            _ => None,
        }
    }
}

/// Fixed-size tuples, one entry per layer group.
impl<const N: usize> Field for [usize; N] {
    type Ref<'a> = [usize; N];

    fn kind() -> String {
        format!("tuple of {N} non-negative int")
    }

    fn get(&self) -> [usize; N] {
        *self
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Field::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };
        let items = items
            .iter()
            .map(usize::from_value)
            .collect::<Option<Vec<_>>>()?;
        items.try_into().ok()
    }
}

impl Field for Vec<usize> {
    type Ref<'a> = &'a [usize];

    fn kind() -> String {
        "list of non-negative int".to_string()
    }

    fn get(&self) -> &[usize] {
        self
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Field::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(usize::from_value).collect(),
            _ => None,
        }
    }
}

impl Field for Vec<String> {
    type Ref<'a> = &'a [String];

    fn kind() -> String {
        "list of str".to_string()
    }

    fn get(&self) -> &[String] {
        self
    }

    fn to_value(&self) -> Value {
        Value::List(self.iter().map(Field::to_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::List(items) => items.iter().map(String::from_value).collect(),
            _ => None,
        }
    }
}

impl<T: Field + Copy> Field for Option<T> {
    type Ref<'a> = Option<T> where Self: 'a;

    fn kind() -> String {
        format!("optional {}", T::kind())
    }

    fn get(&self) -> Option<T> {
        *self
    }

    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::None, Field::to_value)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::None => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}
