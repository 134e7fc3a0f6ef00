//! Event argument encodings
//!
//! Older project files store every argument as a bare JSON scalar. Newer ones
//! wrap fields that may reference a variable in a tagged union
//! `{"type": "variable", "value": "V0"}`. Both encodings coexist inside a
//! single document while it is being migrated, so the argument type accepts
//! either and serializes back exactly what it read.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prefix marking a custom event's local variable slot (`"0"` becomes `"V0"`).
pub const LOCAL_VARIABLE_PREFIX: &str = "V";

/// A single event argument value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    /// Tagged union `{type, value}`
    Union(UnionValue),
    /// Bare JSON value (legacy scalar, object, list...)
    Raw(Value),
}

impl ArgValue {
    /// `{"type": "variable", "value": id}`
    pub fn variable(id: impl Into<String>) -> Self {
        Self::Union(UnionValue::new(UnionKind::Variable, Value::String(id.into())))
    }

    /// A bare string argument
    pub fn raw_str(value: impl Into<String>) -> Self {
        Self::Raw(Value::String(value.into()))
    }

    /// Returns the scalar payload of a bare string/number argument as text.
    ///
    /// Numbers are rendered the way a legacy file would have spelled the
    /// variable id (`0` and `"0"` both give `"0"`).
    pub fn as_raw_scalar(&self) -> Option<String> {
        match self {
            Self::Raw(value) => scalar_to_string(value),
            Self::Union(_) => None,
        }
    }

    /// Returns the union payload when this argument is a variable reference
    pub fn as_variable_union(&self) -> Option<&UnionValue> {
        match self {
            Self::Union(union) if union.kind == UnionKind::Variable => Some(union),
            _ => None,
        }
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Self::Union(_))
    }
}

impl From<UnionValue> for ArgValue {
    fn from(value: UnionValue) -> Self {
        Self::Union(value)
    }
}

/// The tagged-union argument form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnionValue {
    #[serde(rename = "type")]
    pub kind: UnionKind,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,
    /// Fields the engine does not interpret are carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UnionValue {
    pub fn new(kind: UnionKind, value: Value) -> Self {
        Self {
            kind,
            value,
            extra: Map::new(),
        }
    }

    /// The payload as text, when it is a string or number
    pub fn value_str(&self) -> Option<String> {
        scalar_to_string(&self.value)
    }
}

/// Discriminator of a [`UnionValue`]
///
/// Unknown discriminators are preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UnionKind {
    Variable,
    Number,
    Property,
    Expression,
    Direction,
    Literal,
    Other(String),
}

impl UnionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Variable => "variable",
            Self::Number => "number",
            Self::Property => "property",
            Self::Expression => "expression",
            Self::Direction => "direction",
            Self::Literal => "literal",
            Self::Other(other) => other,
        }
    }
}

impl From<String> for UnionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "variable" => Self::Variable,
            "number" => Self::Number,
            "property" => Self::Property,
            "expression" => Self::Expression,
            "direction" => Self::Direction,
            "literal" => Self::Literal,
            _ => Self::Other(value),
        }
    }
}

impl From<UnionKind> for String {
    fn from(kind: UnionKind) -> Self {
        match kind {
            UnionKind::Other(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for UnionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// True when `id` already names a custom event local slot (`V` + digits)
pub fn is_local_variable_id(id: &str) -> bool {
    id.strip_prefix(LOCAL_VARIABLE_PREFIX)
        .is_some_and(|slot| !slot.is_empty() && slot.bytes().all(|b| b.is_ascii_digit()))
}

/// Prefixes a raw slot id with `V`, leaving already-prefixed ids alone
pub fn to_local_variable_id(id: &str) -> String {
    if is_local_variable_id(id) {
        id.to_string()
    } else {
        format!("{}{}", LOCAL_VARIABLE_PREFIX, id)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
