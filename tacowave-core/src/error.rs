//! Error types for building and querying hyperparameters.

use std::fmt;

use thiserror::Error;

/// A cross-field relation that does not hold for a resolved hyperparameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The fields taking part in the relation.
    pub fields: Vec<&'static str>,
    /// Human-readable statement of the relation, including the offending values.
    pub relation: String,
}

impl Violation {
    pub(crate) fn new(fields: &[&'static str], relation: impl Into<String>) -> Self {
        Self {
            fields: fields.to_vec(),
            relation: relation.into(),
        }
    }

    /// Whether `field` takes part in this relation.
    pub fn involves(&self, field: &str) -> bool {
        self.fields.iter().any(|f| *f == field)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.fields.join(", "), self.relation)
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error type for hyperparameter construction and access.
///
/// Every variant is raised before a [`HParams`](crate::HParams) value exists
/// (or, for [`ImmutableField`](Self::ImmutableField), without touching the
/// existing one), so a failed construction never leaves a partial object behind.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HParamsError {
    /// An override or lookup names a field that is not part of the schema.
    #[error("unknown hyperparameter `{name}`")]
    Schema { name: String },

    /// An override value does not have the shape the field declares.
    #[error("hyperparameter `{name}` expects {expected}, got {found}")]
    TypeMismatch {
        name: &'static str,
        expected: String,
        found: String,
    },

    /// One or more cross-field relations are violated after derivation.
    #[error("invalid hyperparameters: {}", join_violations(.0))]
    Configuration(Vec<Violation>),

    /// A field write was attempted on a constructed set.
    #[error("hyperparameter `{name}` is immutable; build a new set with `with_overrides`")]
    ImmutableField { name: &'static str },

    /// An override targets a field that is always computed during construction.
    #[error("hyperparameter `{name}` is computed during construction and cannot be overridden")]
    DerivedField { name: &'static str },

    /// A `name=value` override string is malformed.
    #[error("malformed override: {0}")]
    Parse(String),

    /// JSON overrides could not be decoded.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HParamsError {
    /// The violated relations of a [`Configuration`](Self::Configuration) error.
    ///
    /// Returns an empty slice for all other variants.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Configuration(violations) => violations,
            _ => &[],
        }
    }
}

/// Convenience type alias for `std::result::Result<T, HParamsError>`.
pub type Result<T> = std::result::Result<T, HParamsError>;
