use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{value::split_top_level, HParamsError, Result, Value};

/// An ordered set of caller-supplied field values.
///
/// Names are not checked here; [`HParams::from_overrides`](crate::HParams::from_overrides)
/// rejects unknown names and mistyped values. Assigning a name twice keeps the
/// original position and the latest value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Overrides(IndexMap<String, Value>);

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Overrides::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `self` with every entry of `other` applied on top.
    pub fn merge(&self, other: &Overrides) -> Overrides {
        let mut merged = self.clone();
        for (name, value) in other.iter() {
            merged.insert(name, value.clone());
        }
        merged
    }

    /// Parse a comma-separated `name=value` list, e.g.
    /// `n_fft=2048,upsample_scales=[16, 32],input_type=mulaw`.
    ///
    /// Values are inferred with [`Value::parse_literal`]. Commas inside brackets,
    /// parentheses or quotes do not split entries. Empty entries are skipped.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut overrides = Self::new();
        for entry in split_top_level(spec) {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let Some((name, raw)) = entry.split_once('=') else {
                return Err(HParamsError::Parse(format!(
                    "expected `name=value`, got `{entry}`"
                )));
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(HParamsError::Parse(format!("missing name in `{entry}`")));
            }
            overrides.insert(name, Value::parse_literal(raw));
        }
        Ok(overrides)
    }

    /// Decode a JSON object of field name to value.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Overrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (name, value) in iter {
            overrides.insert(name, value);
        }
        overrides
    }
}
