//! Core tree model for firetest
//!
//! This crate defines the in-memory document tree behind the emulator:
//! - Value: Closed tagged variant for decoded payloads
//! - Path: Slash-separated path addressing a node from the root
//! - Node / NodeArena: Arena-allocated tree cells with parent back-references
//! - Document: A detached subtree built from a Value (construction + projection)
//! - Tree: The path-addressed store (add, update, get, delete with prune)
//! - PushKeyGenerator: Monotonic auto-key generation for create operations
//! - Error: Error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod key;
pub mod node;
pub mod path;
pub mod projection;
pub mod tree;
pub mod value;

pub use error::{Error, Result};
pub use key::{decode_key, encode_key, Clock, PushKeyGenerator, SystemClock, PUSH_KEY_MARKER};
pub use node::{Node, NodeArena, NodeId, Scalar};
pub use path::Path;
pub use projection::Document;
pub use tree::{Resolution, Tree};
pub use value::Value;
