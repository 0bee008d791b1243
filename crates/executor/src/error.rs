//! Error types for command execution.
//!
//! All errors from command execution are represented by the [`Error`] enum.
//! These errors are:
//! - **Structured**: Each variant has typed fields for error details
//! - **Serializable**: Can be converted to/from JSON
//!
//! Tree operations do not fail on well-formed input, so every variant here
//! comes from turning values into nodes or nodes back into JSON.

use serde::{Deserialize, Serialize};

/// Command execution errors.
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Validation | `UnsupportedValueKind` | Payload cannot be stored |
/// | System | `Serialization` | Result cannot be encoded |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
pub enum Error {
    /// Payload holds a kind the tree cannot store
    #[error("unsupported value kind: {kind}")]
    UnsupportedValueKind {
        /// Rejected kind
        kind: String,
    },

    /// Serialization error
    #[error("serialization error: {reason}")]
    Serialization {
        /// Underlying cause
        reason: String,
    },
}

impl Error {
    /// True for errors caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::UnsupportedValueKind { .. })
    }
}

impl From<firetest_core::Error> for Error {
    fn from(e: firetest_core::Error) -> Self {
        match e {
            firetest_core::Error::UnsupportedValueKind { kind } => {
                Error::UnsupportedValueKind { kind }
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization {
            reason: e.to_string(),
        }
    }
}
