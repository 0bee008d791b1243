//! Construction of nodes from values, and projection back to values
//!
//! A [`Document`] is a detached subtree: the form a decoded payload takes
//! before [`Tree::add`](crate::Tree::add) or [`Tree::update`](crate::Tree::update)
//! grafts it into the store, and the form [`Tree::get`](crate::Tree::get)
//! hands back.
//!
//! ## Construction
//!
//! | Input | Node |
//! |-------|------|
//! | String, Int, finite Float, Bool | leaf |
//! | Null | empty |
//! | Array | array-shaped, child `"i"` per element |
//! | Object | object-shaped, one child per entry |
//! | Bytes, non-finite Float | [`Error::UnsupportedValueKind`] |
//!
//! ## Projection
//!
//! An empty node projects to `Null` and a scalar wins over any children.
//! Array-shaped nodes project to a sequence sized by the number of
//! children; each child key is parsed as a slot index and keys that do not
//! parse, or that land past the end, are dropped. Unfilled slots stay
//! `Null`. So an array whose middle element was deleted keeps a hole and
//! loses its last element.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::node::{Node, NodeArena, NodeId, Scalar};
use crate::value::Value;

/// A detached subtree with its own arena
#[derive(Debug, Clone)]
pub struct Document {
    arena: NodeArena,
    root: NodeId,
}

impl Document {
    /// A document whose root is an empty node (projects to `Null`)
    pub fn empty() -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::empty());
        Document { arena, root }
    }

    /// Build a document from a value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedValueKind`] if any part of `value` is
    /// `Bytes` or a non-finite float.
    ///
    /// # Examples
    ///
    /// ```
    /// use firetest_core::{Document, Value};
    ///
    /// let value: Value = r#"{"scores": [55, 21]}"#.parse().unwrap();
    /// let doc = Document::from_value(&value).unwrap();
    /// assert_eq!(doc.objectify(), value);
    ///
    /// assert!(Document::from_value(&Value::Bytes(vec![1])).is_err());
    /// ```
    pub fn from_value(value: &Value) -> Result<Self> {
        let mut arena = NodeArena::new();
        let root = build(&mut arena, value)?;
        Ok(Document { arena, root })
    }

    /// The root node
    pub fn root(&self) -> &Node {
        &self.arena[self.root]
    }

    /// The arena holding the subtree
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Id of the root node within [`arena`](Self::arena)
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// True when the root has no value and no children
    pub fn is_empty(&self) -> bool {
        self.root().is_empty()
    }

    /// Project the subtree to a value
    pub fn objectify(&self) -> Value {
        objectify(&self.arena, self.root)
    }

    /// Project the subtree to a `serde_json::Value` for encoding
    pub fn to_json(&self) -> Result<serde_json::Value> {
        self.objectify().to_json()
    }

    pub(crate) fn from_parts(arena: NodeArena, root: NodeId) -> Self {
        Document { arena, root }
    }

    pub(crate) fn into_parts(self) -> (NodeArena, NodeId) {
        (self.arena, self.root)
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::empty()
    }
}

impl TryFrom<Value> for Document {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Document::from_value(&value)
    }
}

impl TryFrom<&Value> for Document {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        Document::from_value(value)
    }
}

/// Build the subtree for `value` in `arena` and return its detached root.
pub(crate) fn build(arena: &mut NodeArena, value: &Value) -> Result<NodeId> {
    let node = match value {
        Value::Null => Node::empty(),
        Value::Bool(b) => Node::leaf(Scalar::Bool(*b)),
        Value::Int(i) => Node::leaf(Scalar::Int(*i)),
        Value::Float(f) if f.is_finite() => Node::leaf(Scalar::Float(*f)),
        Value::Float(f) => return Err(Error::unsupported(format!("Float({})", f))),
        Value::String(s) => Node::leaf(Scalar::String(s.clone())),
        Value::Bytes(_) => return Err(Error::unsupported("Bytes")),
        Value::Array(items) => {
            let id = arena.alloc(Node::container(true));
            for (index, item) in items.iter().enumerate() {
                let child = build(arena, item)?;
                arena.attach(id, index.to_string(), child);
            }
            return Ok(id);
        }
        Value::Object(entries) => {
            let id = arena.alloc(Node::container(false));
            for (key, item) in entries {
                let child = build(arena, item)?;
                arena.attach(id, key.clone(), child);
            }
            return Ok(id);
        }
    };
    Ok(arena.alloc(node))
}

/// Project the node `id` of `arena` to a value.
pub fn objectify(arena: &NodeArena, id: NodeId) -> Value {
    let node = &arena[id];

    if node.is_empty() {
        return Value::Null;
    }

    if let Some(scalar) = node.value() {
        return Value::from(scalar.clone());
    }

    if node.is_array() {
        let mut items = vec![Value::Null; node.child_count()];
        for (key, child) in node.children() {
            let Ok(index) = key.parse::<usize>() else {
                continue;
            };
            if let Some(slot) = items.get_mut(index) {
                *slot = objectify(arena, child);
            }
        }
        return Value::Array(items);
    }

    let entries: HashMap<String, Value> = node
        .children()
        .map(|(key, child)| (key.to_string(), objectify(arena, child)))
        .collect();
    Value::Object(entries)
}
