//! Tree cells and the arena that owns them
//!
//! Every [`Node`] lives in a [`NodeArena`] slot and is addressed by a
//! [`NodeId`]. Children are held as `key -> NodeId` entries owned by the
//! arena; the `parent` field is a plain index used only to walk upward when
//! pruning, never for ownership.
//!
//! ## Node shapes
//!
//! | Shape | `value` | `children` | `is_array` |
//! |-------|---------|------------|------------|
//! | Empty | `None` | empty | either |
//! | Leaf | `Some(_)` | empty | `false` |
//! | Object | `None` | string keys | `false` |
//! | Array | `None` | decimal index keys | `true` |
//!
//! A merge may leave a node with both a scalar and children for a while;
//! projection then reports the scalar.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::value::Value;

// =============================================================================
// Scalar
// =============================================================================

/// Leaf value stored in a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Scalar {
    /// UTF-8 string
    String(String),
    /// 64-bit signed integer
    Int(i64),
    /// Finite 64-bit float
    Float(f64),
    /// Boolean
    Bool(bool),
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::String(s) => Value::String(s),
            Scalar::Int(i) => Value::Int(i),
            Scalar::Float(f) => Value::Float(f),
            Scalar::Bool(b) => Value::Bool(b),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Int(i)
    }
}

impl From<f64> for Scalar {
    fn from(f: f64) -> Self {
        Scalar::Float(f)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

// =============================================================================
// Node
// =============================================================================

/// Stable identifier of a node inside its arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw slot index
    pub fn index(self) -> usize {
        self.0
    }
}

/// One position in the tree
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub(crate) value: Option<Scalar>,
    pub(crate) children: FxHashMap<String, NodeId>,
    pub(crate) is_array: bool,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    /// A node with no value and no children
    pub fn empty() -> Self {
        Node::default()
    }

    /// A leaf node holding `value`
    pub fn leaf(value: Scalar) -> Self {
        Node {
            value: Some(value),
            ..Node::default()
        }
    }

    /// An empty container; `is_array` selects the projection shape
    pub fn container(is_array: bool) -> Self {
        Node {
            is_array,
            ..Node::default()
        }
    }

    /// Scalar value, if this is a leaf
    pub fn value(&self) -> Option<&Scalar> {
        self.value.as_ref()
    }

    /// Child id under `key`
    pub fn child(&self, key: &str) -> Option<NodeId> {
        self.children.get(key).copied()
    }

    /// Iterate over `(key, child)` entries in arbitrary order
    pub fn children(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.children.iter().map(|(k, id)| (k.as_str(), *id))
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// True if built from an ordered sequence
    pub fn is_array(&self) -> bool {
        self.is_array
    }

    /// Parent id; `None` for a root or a detached node
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// No scalar and no children
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }
}

// =============================================================================
// NodeArena
// =============================================================================

/// Slot storage for nodes with free-list reuse
///
/// Indexing with a released [`NodeId`] panics, like indexing a slab with a
/// stale key. Use [`NodeArena::get`] when the id may be stale.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
}

impl NodeArena {
    /// Create an empty arena
    pub fn new() -> Self {
        NodeArena::default()
    }

    /// Store a node and return its id
    pub fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Get a node by id
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Get a mutable node by id
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// True when no node is live
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove a single slot without touching its children
    fn take(&mut self, id: NodeId) -> Option<Node> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id.0);
        Some(node)
    }

    /// Insert `child` under `parent` at `key`, setting its parent link.
    ///
    /// Returns the child previously stored under `key`, now detached. The
    /// caller decides whether to [`release`](Self::release) it.
    pub fn attach(&mut self, parent: NodeId, key: String, child: NodeId) -> Option<NodeId> {
        self[child].parent = Some(parent);
        let displaced = self[parent].children.insert(key, child);
        if let Some(old) = displaced.filter(|old| *old != child) {
            if let Some(node) = self.get_mut(old) {
                node.parent = None;
            }
        }
        displaced
    }

    /// Remove the entry `key` from `parent` and clear the child's parent link.
    pub fn detach(&mut self, parent: NodeId, key: &str) -> Option<NodeId> {
        let child = self.get_mut(parent)?.children.remove(key)?;
        if let Some(node) = self.get_mut(child) {
            node.parent = None;
        }
        Some(child)
    }

    /// Free `id` and every node below it.
    pub fn release(&mut self, id: NodeId) {
        let mut pending = vec![id];
        while let Some(id) = pending.pop() {
            if let Some(node) = self.take(id) {
                pending.extend(node.children.into_values());
            }
        }
    }

    /// Free every child of `id`, leaving the node itself in place.
    pub fn release_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self[id].children);
        for child in children.into_values() {
            self.release(child);
        }
    }

    /// Move the subtree rooted at `src` out of `source` into this arena.
    ///
    /// The moved root comes back detached (no parent). `source` slots are
    /// freed as they are moved.
    pub fn adopt(&mut self, source: &mut NodeArena, src: NodeId) -> NodeId {
        let node = source.take(src).unwrap_or_default();
        let (root, children) = self.alloc_shell(node);

        let mut pending: Vec<(NodeId, String, NodeId)> = children
            .into_iter()
            .map(|(key, child)| (root, key, child))
            .collect();

        while let Some((parent, key, src)) = pending.pop() {
            let Some(node) = source.take(src) else {
                continue;
            };
            let (id, children) = self.alloc_shell(node);
            self.attach(parent, key, id);
            pending.extend(children.into_iter().map(|(key, child)| (id, key, child)));
        }

        root
    }

    /// Allocate `node` without its children; return the new id and the
    /// children still pointing into the source arena.
    fn alloc_shell(&mut self, node: Node) -> (NodeId, FxHashMap<String, NodeId>) {
        let Node {
            value,
            children,
            is_array,
            ..
        } = node;
        let id = self.alloc(Node {
            value,
            children: FxHashMap::default(),
            is_array,
            parent: None,
        });
        (id, children)
    }
}

impl Index<NodeId> for NodeArena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        match self.get(id) {
            Some(node) => node,
            None => panic!("stale node id {}", id.0),
        }
    }
}

impl IndexMut<NodeId> for NodeArena {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        match self.get_mut(id) {
            Some(node) => node,
            None => panic!("stale node id {}", id.0),
        }
    }
}
