//! Command enum defining all store operations.
//!
//! Commands are:
//! - **Self-contained**: All parameters needed for execution are in the variant
//! - **Serializable**: Can be converted to/from JSON for cross-language use
//! - **Pure data**: No closures or executable code

use serde::{Deserialize, Serialize};

use firetest_core::{Path, Value};

/// A command is a self-contained, serializable store operation.
///
/// Paths are already sanitized: transport suffixes such as `.json` are the
/// caller's business. Empty segments are ignored and the empty path is the
/// root.
///
/// # Example
///
/// ```
/// use firetest_executor::{Command, Value};
///
/// let cmd = Command::Update {
///     path: "users/alice".into(),
///     value: r#"{"age": 31}"#.parse().unwrap(),
/// };
/// assert_eq!(cmd.name(), "Update");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum Command {
    /// Replace the subtree at `path`.
    /// Returns: `Output::Unit`
    Set {
        /// Target path
        path: Path,
        /// New subtree
        value: Value,
    },

    /// Merge `value`'s children into the node at `path` and overwrite its
    /// scalar with `value`'s scalar (cleared when `value` has none).
    /// Returns: `Output::Unit`
    Update {
        /// Target path
        path: Path,
        /// Children to merge
        value: Value,
    },

    /// Store `value` under a freshly generated child key of `path`.
    /// Returns: `Output::Name` (the generated key)
    Push {
        /// Parent path
        path: Path,
        /// New child subtree
        value: Value,
    },

    /// Read the projection of the node at `path`.
    /// Returns: `Output::Value` (`Null` if absent)
    Get {
        /// Target path
        path: Path,
    },

    /// Remove the node at `path` and prune emptied ancestors.
    /// Returns: `Output::Unit`
    Delete {
        /// Target path
        path: Path,
    },
}

impl Command {
    /// Variant name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Command::Set { .. } => "Set",
            Command::Update { .. } => "Update",
            Command::Push { .. } => "Push",
            Command::Get { .. } => "Get",
            Command::Delete { .. } => "Delete",
        }
    }

    /// Target path
    pub fn path(&self) -> &Path {
        match self {
            Command::Set { path, .. }
            | Command::Update { path, .. }
            | Command::Push { path, .. }
            | Command::Get { path }
            | Command::Delete { path } => path,
        }
    }

    /// True for commands that modify the tree
    pub fn is_write(&self) -> bool {
        !matches!(self, Command::Get { .. })
    }
}
