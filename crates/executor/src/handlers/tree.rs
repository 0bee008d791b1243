//! Tree command handlers.
//!
//! Payloads are turned into detached documents before the lock is taken;
//! each handler then holds the tree lock for its whole resolve, mutate and
//! prune step.

use parking_lot::Mutex;

use firetest_core::{Document, Path, PushKeyGenerator, Tree, Value};

use crate::{Output, Result};

/// Handle Set command.
pub fn set(tree: &Mutex<Tree>, path: Path, value: Value) -> Result<Output> {
    let doc = Document::from_value(&value)?;
    tree.lock().add(&path, doc);
    Ok(Output::Unit)
}

/// Handle Update command.
pub fn update(tree: &Mutex<Tree>, path: Path, value: Value) -> Result<Output> {
    let doc = Document::from_value(&value)?;
    tree.lock().update(&path, doc);
    Ok(Output::Unit)
}

/// Handle Push command.
///
/// Draws a key only after the payload converts, then stores the payload at
/// `path/<key>` and returns the key.
pub fn push(
    tree: &Mutex<Tree>,
    keys: &PushKeyGenerator,
    path: Path,
    value: Value,
) -> Result<Output> {
    let doc = Document::from_value(&value)?;
    let name = keys.next_key();
    tree.lock().add(&path.child(name.as_str()), doc);
    Ok(Output::Name(name))
}

/// Handle Get command.
pub fn get(tree: &Mutex<Tree>, path: Path) -> Result<Output> {
    Ok(Output::Value(tree.lock().project(&path)))
}

/// Handle Delete command.
pub fn delete(tree: &Mutex<Tree>, path: Path) -> Result<Output> {
    let found = tree.lock().delete(&path);
    if !found {
        tracing::trace!(target: "firetest::executor", path = %path, "delete of missing path");
    }
    Ok(Output::Unit)
}
