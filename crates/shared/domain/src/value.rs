use crate::schema::FieldKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single typed value held by a configuration field.
///
/// The [`fmt::Display`] form is the stable string identity of the value: it is what cache keys
/// are built from, so `FieldValue::from("left")` and `FieldValue::Text("left".to_owned())`
/// always produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Text(String),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Coerces a loosely typed JSON value into the value a field of `kind` holds.
    ///
    /// Strings are accepted for booleans and integers (form-style payloads), numbers and
    /// booleans are accepted for text. Returns `None` when no sensible conversion exists.
    #[must_use]
    pub fn coerce(kind: FieldKind, raw: &Value) -> Option<Self> {
        match (kind, raw) {
            (FieldKind::Boolean, Value::Bool(b)) => Some(Self::Bool(*b)),
            (FieldKind::Boolean, Value::String(s)) => match s.to_ascii_lowercase().as_str() {
                "true" | "1" | "on" => Some(Self::Bool(true)),
                "false" | "0" | "off" => Some(Self::Bool(false)),
                _ => None,
            },
            (FieldKind::Integer, Value::Number(n)) => n.as_i64().map(Self::Integer),
            (FieldKind::Integer, Value::String(s)) => s.trim().parse().ok().map(Self::Integer),
            (FieldKind::Text, Value::String(s)) => Some(Self::Text(s.clone())),
            (FieldKind::Text, Value::Number(n)) => Some(Self::Text(n.to_string())),
            (FieldKind::Text, Value::Bool(b)) => Some(Self::Text(b.to_string())),
            (FieldKind::ManyToMany, Value::Array(items)) => {
                Some(Self::List(items.iter().map(Self::from_json).collect()))
            },
            _ => None,
        }
    }

    /// Untyped conversion, used where no schema information is available.
    #[must_use]
    pub fn from_json(raw: &Value) -> Self {
        match raw {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n.as_i64().map_or_else(|| Self::Text(n.to_string()), Self::Integer),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from_json).collect()),
            Value::Object(_) => Self::Text(raw.to_string()),
        }
    }

    /// Whether this value can be stored in a field of `kind`.
    #[must_use]
    pub const fn fits(&self, kind: FieldKind) -> bool {
        matches!(
            (kind, self),
            (FieldKind::Boolean, Self::Bool(_))
                | (FieldKind::Integer, Self::Integer(_))
                | (FieldKind::Text, Self::Text(_))
                | (FieldKind::ManyToMany, Self::List(_))
        )
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Integer(n) => Value::from(*n),
            Self::Text(s) => Value::String(s.clone()),
            Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("None"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            },
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}
