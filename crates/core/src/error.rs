//! Error types for the tree model
//!
//! Tree operations themselves never fail on well-formed input: a missing
//! path is a normal outcome, not an error. The only failure in this crate is
//! building a node from a value the tree cannot represent.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use thiserror::Error;

/// Result type alias for tree model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the tree model
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The value has a kind that cannot be stored as a node
    #[error("unsupported value kind: {kind}")]
    UnsupportedValueKind {
        /// Name of the rejected kind (e.g. "Bytes", "Float(NaN)")
        kind: String,
    },
}

impl Error {
    pub(crate) fn unsupported(kind: impl Into<String>) -> Self {
        Error::UnsupportedValueKind { kind: kind.into() }
    }
}
