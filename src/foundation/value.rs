use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque value stored in variables and set-variable actions.
///
/// Decoding policy: JSON `null` becomes [`Value::Null`], strings and booleans decode
/// verbatim, integer literals land in the narrowest signed type that holds them exactly
/// (`i32`, then `i64`), any other number becomes `f64`, and arrays/objects are preserved
/// as [`Value::Structured`] without being interpreted.
///
/// An absent field is modelled one level up as `Option<Value>::None`.
///
/// Equality is by meaning, not representation: integers compare by value whatever their
/// width, and a [`Value::Structured`] scalar equals the value it decodes to.
#[derive(Clone, Debug)]
pub enum Value {
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Integer that fits in 32 bits.
    I32(i32),
    /// Integer outside the 32-bit range.
    I64(i64),
    /// Floating point number (or an integer literal beyond `i64`).
    F64(f64),
    /// UTF-8 text.
    String(String),
    /// Composite JSON node, kept for round-tripping only.
    Structured(serde_json::Value),
}

impl Value {
    /// Build an integer value in its narrowest exact-fit representation.
    pub fn int(v: i64) -> Self {
        match i32::try_from(v) {
            Ok(small) => Self::I32(small),
            Err(_) => Self::I64(v),
        }
    }

    /// Canonical representation: integers in their narrowest type and structured scalars
    /// unwrapped into the matching variant.
    pub fn normalized(self) -> Self {
        match self {
            Self::I64(v) => Self::int(v),
            Self::Structured(v) if !v.is_array() && !v.is_object() => Self::from(v),
            other => other,
        }
    }

    /// Short name of the value's type, used in diagnostics and faults.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::I32(_) | Self::I64(_) | Self::F64(_) => "number",
            Self::String(_) => "text",
            Self::Structured(_) => "structured",
        }
    }

    /// `true` for the three numeric variants.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::I32(_) | Self::I64(_) | Self::F64(_))
    }

    /// Boolean payload, if any.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer payload, if the value is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I32(v) => Some(i64::from(*v)),
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric payload widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::I32(v) => Some(f64::from(*v)),
            Self::I64(v) => Some(*v as f64),
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Text payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Add two numbers, widening `i32 -> i64 -> f64` instead of overflowing.
    pub fn checked_add(&self, rhs: &Value) -> Option<Value> {
        match (self.as_i64(), rhs.as_i64()) {
            (Some(a), Some(b)) => Some(match a.checked_add(b) {
                Some(sum) => Value::int(sum),
                None => Value::F64(a as f64 + b as f64),
            }),
            _ => Some(Value::F64(self.as_f64()? + rhs.as_f64()?)),
        }
    }

    /// Subtract two numbers with the same widening rules as [`Value::checked_add`].
    pub fn checked_sub(&self, rhs: &Value) -> Option<Value> {
        match (self.as_i64(), rhs.as_i64()) {
            (Some(a), Some(b)) => Some(match a.checked_sub(b) {
                Some(diff) => Value::int(diff),
                None => Value::F64(a as f64 - b as f64),
            }),
            _ => Some(Value::F64(self.as_f64()? - rhs.as_f64()?)),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Structured(a), Self::Structured(b)) => a == b,
            (Self::Structured(s), v) | (v, Self::Structured(s)) => {
                !s.is_array() && !s.is_object() && Self::from(s.clone()) == *v
            }
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::F64(a), Self::F64(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (a, b) => matches!((a.as_i64(), b.as_i64()), (Some(x), Some(y)) if x == y),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::int(i)
                } else {
                    // u64 beyond i64::MAX and non-integral literals.
                    Self::F64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            composite @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Self::Structured(composite)
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::F64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Structured(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::I32(v) => serializer.serialize_i32(*v),
            Self::I64(v) => serializer.serialize_i64(*v),
            Self::F64(v) => serializer.serialize_f64(*v),
            Self::String(s) => serializer.serialize_str(s),
            Self::Structured(v) => v.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

/// Serde helper for `Option<Value>` fields that keeps `null` distinct from "absent".
///
/// Use together with `#[serde(default)]`: a missing field stays `None`, while an explicit
/// `null` decodes as `Some(Value::Null)`.
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/value.rs"]
mod tests;
