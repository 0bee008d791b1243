//! Decoded payloads.
//!
//! Every payload reaches the tree as a [`Value`]. Parsing JSON text only
//! ever produces the JSON kinds; `Bytes` and non-finite floats can be built
//! in code but have no node form, so [`Document`](crate::Document)
//! construction and [`Value::to_json`] reject them with
//! [`Error::UnsupportedValueKind`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A decoded payload.
///
/// Equality is structural. Ints and floats never compare equal to each
/// other, and floats compare by IEEE-754 rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    /// JSON `null`; stored as an empty node
    Null,
    /// Boolean leaf
    Bool(bool),
    /// Integer leaf
    Int(i64),
    /// Float leaf; must be finite to be stored
    Float(f64),
    /// String leaf
    String(String),
    /// Raw bytes; never stored
    Bytes(Vec<u8>),
    /// Array-shaped node, children keyed by index
    Array(Vec<Value>),
    /// Object-shaped node
    Object(HashMap<String, Value>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (String(a), String(b)) => a == b,
            (Bytes(a), Bytes(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Object(a), Object(b)) => a == b,
            _ => false,
        }
    }
}

impl Value {
    /// Variant name, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    /// The string, for `String` values
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The entries, for `Object` values
    pub fn as_object(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Convert to a `serde_json::Value` for encoding.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::UnsupportedValueKind`] for `Bytes` and for
    /// non-finite floats, neither of which has a JSON representation.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        use serde_json::Value as JV;

        match self {
            Value::Null => Ok(JV::Null),
            Value::Bool(b) => Ok(JV::Bool(*b)),
            Value::Int(i) => Ok(JV::Number((*i).into())),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(JV::Number)
                .ok_or_else(|| Error::unsupported(format!("Float({})", f))),
            Value::String(s) => Ok(JV::String(s.clone())),
            Value::Bytes(_) => Err(Error::unsupported("Bytes")),
            Value::Array(arr) => Ok(JV::Array(
                arr.iter().map(Value::to_json).collect::<Result<Vec<_>>>()?,
            )),
            Value::Object(obj) => {
                let mut map = serde_json::Map::with_capacity(obj.len());
                for (k, v) in obj {
                    map.insert(k.clone(), v.to_json()?);
                }
                Ok(JV::Object(map))
            }
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    // u64 beyond i64::MAX falls back to a float
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::Array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl FromStr for Value {
    type Err = serde_json::Error;

    /// Parse a JSON text (value, array, or object) into a Value.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        serde_json::from_str::<serde_json::Value>(s).map(Value::from)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            Ok(json) => write!(f, "{}", json),
            Err(_) => write!(f, "<{}>", self.type_name()),
        }
    }
}
