use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::{ModelError, ModelResult};

/// A flat attribute mapping: the persisted form of one entity.
pub type Record = BTreeMap<String, AttrValue>;

/// A single attribute value.
///
/// Serialized untagged so the backing file holds plain JSON scalars and
/// arrays. Integers are tried before floats, so `3` stays an `Int` and `3.0`
/// stays a `Float` across a save/reload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<AttrValue>),
    Null,
}

impl AttrValue {
    /// Returns the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a numeric payload as `f64` (integers widen).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Parses `raw` into a value of the same variant as `self`.
    ///
    /// Used to coerce free-form text onto a declared attribute. Returns
    /// `None` when the text does not fit the variant, or for list/null
    /// templates which have no text form. Non-finite floats do not fit: the
    /// backing file has no representation for them.
    pub fn coerce_like(&self, raw: &str) -> Option<AttrValue> {
        match self {
            Self::Str(_) => Some(Self::Str(raw.to_owned())),
            Self::Int(_) => raw.trim().parse().ok().map(Self::Int),
            Self::Float(_) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .map(Self::Float),
            Self::Bool(_) => match raw.trim() {
                "true" | "True" => Some(Self::Bool(true)),
                "false" | "False" => Some(Self::Bool(false)),
                _ => None,
            },
            Self::List(_) | Self::Null => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) if x.fract() == 0.0 && x.is_finite() => write!(f, "{x:.1}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => write!(f, "'{}'", s.replace('\'', "\\'")),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for AttrValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(items: Vec<AttrValue>) -> Self {
        Self::List(items)
    }
}

impl TryFrom<serde_json::Value> for AttrValue {
    type Error = ModelError;

    /// Converts a JSON value. Nested objects are rejected since records are
    /// flat.
    fn try_from(value: serde_json::Value) -> ModelResult<Self> {
        use serde_json::Value;
        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Str(s),
            Value::Array(items) => Self::List(
                items
                    .into_iter()
                    .map(Self::try_from)
                    .collect::<ModelResult<_>>()?,
            ),
            Value::Object(_) => return Err(ModelError::NestedObject),
        })
    }
}
