//! # Firetest Executor
//!
//! Command layer over the shared tree store. It provides:
//! - [`Executor`] - the shared store handle: one tree behind one lock
//! - [`Command`]/[`Output`] - the instruction set and its typed results
//! - [`Error`] - structured execution errors
//!
//! ## Quick Start
//!
//! ```
//! use firetest_executor::{Command, Executor, Output, Value};
//!
//! let executor = Executor::new();
//!
//! executor.execute(Command::Set {
//!     path: "users/alice".into(),
//!     value: r#"{"age": 30}"#.parse().unwrap(),
//! })?;
//!
//! let output = executor.execute(Command::Get { path: "users/alice/age".into() })?;
//! assert_eq!(output, Output::Value(Value::Int(30)));
//! # Ok::<(), firetest_executor::Error>(())
//! ```
//!
//! ## Commands
//!
//! | Command | Tree operation | Output |
//! |---------|----------------|--------|
//! | `Set` | add (replace) | `Unit` |
//! | `Update` | update (merge) | `Unit` |
//! | `Push` | add under a generated key | `Name` |
//! | `Get` | get + projection | `Value` |
//! | `Delete` | delete + prune | `Unit` |

#![warn(missing_docs)]

mod command;
mod error;
mod executor;
mod output;

// Handler modules
mod handlers;

pub use command::Command;
pub use error::Error;
pub use executor::Executor;
pub use output::Output;

// Re-export the tree model so users don't need firetest-core directly
pub use firetest_core::{Document, Path, PushKeyGenerator, Tree, Value};

/// Result type for executor operations
pub type Result<T> = std::result::Result<T, Error>;
