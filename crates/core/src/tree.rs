//! The path-addressed store
//!
//! [`Tree`] owns a root node and implements the four store operations:
//!
//! | Operation | Resolution | Effect |
//! |-----------|------------|--------|
//! | [`add`](Tree::add) | resolve-or-create | replace the target wholesale |
//! | [`update`](Tree::update) | resolve-or-create | merge children, then overwrite the scalar |
//! | [`get`](Tree::get) | resolve-only | copy of the target, empty if missing |
//! | [`delete`](Tree::delete) | resolve-only | detach the target, then prune empty ancestors |
//!
//! A `Tree` is plain data with `&mut self` mutators. Sharing it between
//! concurrent callers is the owner's job: wrap it in one lock and hold the
//! lock for the whole operation.
//!
//! # Examples
//!
//! ```
//! use firetest_core::{Document, Path, Tree, Value};
//!
//! let mut tree = Tree::new();
//! let doc = |json: &str| Document::from_value(&json.parse().unwrap()).unwrap();
//!
//! tree.add(&Path::from("a/b/c"), doc("1"));
//! tree.add(&Path::from("a/b/d"), doc("2"));
//! tree.delete(&Path::from("a/b/c"));
//!
//! assert_eq!(tree.project(&Path::from("a")), r#"{"b": {"d": 2}}"#.parse::<Value>().unwrap());
//! ```

use crate::node::{Node, NodeArena, NodeId};
use crate::path::Path;
use crate::projection::{objectify, Document};
use crate::value::Value;

/// Outcome of a resolve-only walk
///
/// A path that reaches an existing node is `Found`, even when that node is
/// empty. `NotFound` means some segment was missing. Both project to `Null`
/// at the [`Tree::get`] boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The path addresses an existing node
    Found(NodeId),
    /// Some segment of the path does not exist
    NotFound,
}

/// Hierarchical JSON store addressed by slash-separated paths
#[derive(Debug, Clone)]
pub struct Tree {
    arena: NodeArena,
    root: NodeId,
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl Tree {
    /// Create an empty tree (root with no value and no children)
    pub fn new() -> Self {
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::empty());
        Tree { arena, root }
    }

    /// Id of the root node
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// The root node
    pub fn root(&self) -> &Node {
        &self.arena[self.root]
    }

    /// Read access to the node storage
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// True when the root has no value and no children
    pub fn is_empty(&self) -> bool {
        self.root().is_empty()
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Walk `path` without creating anything.
    pub fn resolve(&self, path: &Path) -> Resolution {
        let mut current = self.root;
        for segment in path.segments() {
            match self.arena[current].child(segment) {
                Some(child) => current = child,
                None => return Resolution::NotFound,
            }
        }
        Resolution::Found(current)
    }

    /// Walk `path`, creating missing nodes as empty children.
    ///
    /// A node that receives a new child loses its scalar, since it now holds
    /// children.
    fn resolve_or_create(&mut self, path: &Path) -> NodeId {
        let mut current = self.root;
        for segment in path.segments() {
            current = match self.arena[current].child(segment) {
                Some(child) => child,
                None => {
                    let child = self.arena.alloc(Node::empty());
                    self.arena.attach(current, segment.clone(), child);
                    self.arena[current].value = None;
                    child
                }
            };
        }
        current
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Replace the node at `path` with `doc` (set semantics).
    ///
    /// The previous value, children and shape are discarded.
    pub fn add(&mut self, path: &Path, doc: Document) {
        let target = self.resolve_or_create(path);
        let incoming = self.graft(doc);

        self.arena.release_children(target);
        let children = std::mem::take(&mut self.arena[incoming].children);
        for (key, child) in children {
            self.arena.attach(target, key, child);
        }

        let value = self.arena[incoming].value.take();
        let is_array = self.arena[incoming].is_array;
        let node = &mut self.arena[target];
        node.value = value;
        node.is_array = is_array;

        self.arena.release(incoming);
    }

    /// Merge `doc` into the node at `path` (update semantics).
    ///
    /// Each child of `doc` overwrites or inserts the same key in the target;
    /// other keys are kept. The target's scalar is then set to `doc`'s
    /// scalar, which clears it when `doc` has none. The target keeps its
    /// array/object shape.
    pub fn update(&mut self, path: &Path, doc: Document) {
        let target = self.resolve_or_create(path);
        let incoming = self.graft(doc);

        let children = std::mem::take(&mut self.arena[incoming].children);
        for (key, child) in children {
            if let Some(old) = self.arena.attach(target, key, child) {
                self.arena.release(old);
            }
        }

        let value = self.arena[incoming].value.take();
        self.arena[target].value = value;

        self.arena.release(incoming);
    }

    /// Copy of the node at `path`; an empty document when the path is missing.
    pub fn get(&self, path: &Path) -> Document {
        match self.resolve(path) {
            Resolution::Found(id) => self.copy_out(id),
            Resolution::NotFound => Document::empty(),
        }
    }

    /// Projection of the node at `path`; `Null` when the path is missing.
    pub fn project(&self, path: &Path) -> Value {
        match self.resolve(path) {
            Resolution::Found(id) => objectify(&self.arena, id),
            Resolution::NotFound => Value::Null,
        }
    }

    /// Remove the node at `path`, then prune ancestors left empty.
    ///
    /// Missing paths are a no-op. Deleting the root clears it in place; the
    /// root itself is never detached. Returns whether a node was found.
    pub fn delete(&mut self, path: &Path) -> bool {
        let Resolution::Found(target) = self.resolve(path) else {
            return false;
        };

        let (Some(parent), Some(key)) = (self.arena[target].parent(), path.last_segment()) else {
            self.arena.release_children(self.root);
            self.arena[self.root].value = None;
            return true;
        };

        self.arena.detach(parent, key);
        self.arena.release(target);
        self.prune(parent, path);
        true
    }

    /// Walk upward from `start`, detaching each empty node until a non-empty
    /// ancestor or the root is reached.
    ///
    /// `start` is the node addressed by all but the last segment of `path`,
    /// so the key of each ancestor under its own parent is read off `path`.
    fn prune(&mut self, start: NodeId, path: &Path) {
        let segments = path.segments();
        let mut current = start;
        let mut depth = segments.len() - 1;

        while depth > 0 && self.arena[current].is_empty() {
            let Some(parent) = self.arena[current].parent() else {
                break;
            };
            self.arena.detach(parent, &segments[depth - 1]);
            self.arena.release(current);
            tracing::trace!(target: "firetest::tree", key = %segments[depth - 1], "pruned empty node");
            current = parent;
            depth -= 1;
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    /// Move a detached document into this tree's arena.
    fn graft(&mut self, doc: Document) -> NodeId {
        let (mut source, root) = doc.into_parts();
        self.arena.adopt(&mut source, root)
    }

    /// Copy the subtree at `id` into a new detached document.
    fn copy_out(&self, id: NodeId) -> Document {
        let shell = |node: &Node| Node {
            value: node.value.clone(),
            is_array: node.is_array,
            ..Node::default()
        };

        let mut arena = NodeArena::new();
        let root = arena.alloc(shell(&self.arena[id]));
        let mut pending = vec![(id, root)];

        while let Some((src, dst)) = pending.pop() {
            for (key, child) in self.arena[src].children() {
                let copy = arena.alloc(shell(&self.arena[child]));
                arena.attach(dst, key.to_string(), copy);
                pending.push((child, copy));
            }
        }

        Document::from_parts(arena, root)
    }
}
