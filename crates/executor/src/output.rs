//! Output enum for command execution results.
//!
//! Every command produces exactly one output type. This mapping is
//! deterministic: the same command always produces the same output variant.

use serde::{Deserialize, Serialize};

use firetest_core::Value;

use crate::{Error, Result};

/// Successful command execution results.
///
/// # Example
///
/// ```text
/// match executor.execute(Command::Push { path, value })? {
///     Output::Name(key) => println!("stored under {}", key),
///     _ => unreachable!("Push always returns Name"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    /// No return value (set, update, delete)
    Unit,

    /// Projection of a node (get)
    Value(Value),

    /// Generated child key (push)
    Name(String),
}

impl Output {
    /// The projected value, if this is a `Value` output
    pub fn into_value(self) -> Option<Value> {
        match self {
            Output::Value(v) => Some(v),
            _ => None,
        }
    }

    /// The generated key, if this is a `Name` output
    pub fn into_name(self) -> Option<String> {
        match self {
            Output::Name(n) => Some(n),
            _ => None,
        }
    }

    /// Wire form of the output.
    ///
    /// | Output | JSON |
    /// |--------|------|
    /// | `Unit` | `null` |
    /// | `Value(v)` | `v` |
    /// | `Name(n)` | `{"name": n}` |
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the value has no JSON form.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        match self {
            Output::Unit => Ok(serde_json::Value::Null),
            Output::Value(v) => v.to_json().map_err(|e| Error::Serialization {
                reason: e.to_string(),
            }),
            Output::Name(n) => Ok(serde_json::json!({ "name": n })),
        }
    }

    /// Encode the wire form followed by a newline, as a stream encoder
    /// would frame it.
    pub fn to_json_line(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec(&self.to_json()?)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
