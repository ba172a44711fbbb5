//! Element tree for Draglist.
//!
//! Provides the arena-backed tree of visual nodes with:
//! - Unique node identifiers via arena-based storage
//! - Parent-child links with explicit sibling ordering
//! - Automatic drop cascade when a node is destroyed
//! - Node naming for debugging and lookup
//!
//! The child order of a container node is the visual order of its items.
//! `NodeId`s are stable handles: once a node is destroyed its id never
//! resolves again, which is what makes ids safe to keep in side tables
//! (a stale id can never be mistaken for a live node).
//!
//! # Key Types
//!
//! - [`Node`] - Trait implemented by anything that owns a tree node
//! - [`NodeBase`] - Helper struct for implementing [`Node`]
//! - [`NodeId`] - Unique stable identifier for each node
//! - [`NodeTree`] - The tree itself
//! - [`SharedNodeTree`] - Thread-safe wrapper around [`NodeTree`]

use std::fmt;
use std::sync::OnceLock;

use parking_lot::RwLock;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a node in the element tree.
    ///
    /// `NodeId`s remain valid while the node is attached or detached, and
    /// become permanently invalid when the node is destroyed. Ids are never
    /// reused for a different node.
    pub struct NodeId;
}

/// Errors that can occur during element tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    /// The node id is invalid or the node has been destroyed.
    InvalidNodeId,
    /// Attempted to attach a node under itself or one of its descendants.
    CircularParentage,
    /// The element tree has not been initialized.
    TreeNotInitialized,
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNodeId => write!(f, "Invalid or destroyed node id"),
            Self::CircularParentage => {
                write!(f, "Cannot attach a node under itself or a descendant")
            }
            Self::TreeNotInitialized => write!(f, "Element tree not initialized"),
        }
    }
}

impl std::error::Error for NodeError {}

/// Result type for element tree operations.
pub type NodeResult<T> = std::result::Result<T, NodeError>;

/// Internal data stored for each node.
struct NodeData {
    /// Human-readable name for debugging and lookup.
    name: String,
    /// Parent node (if attached).
    parent: Option<NodeId>,
    /// Child nodes, in visual order.
    children: Vec<NodeId>,
}

impl NodeData {
    fn new() -> Self {
        Self {
            name: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }
}

/// The element tree managing all visual nodes and their ordering.
///
/// Uses arena-based storage via `SlotMap` for stable ids. Sibling order is
/// explicit: children are kept in a vector, and the attach operations say
/// where in that vector the node lands.
pub struct NodeTree {
    nodes: SlotMap<NodeId, NodeData>,
}

impl NodeTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    /// Register a new detached node and return its id.
    pub fn register(&mut self) -> NodeId {
        let id = self.nodes.insert(NodeData::new());
        tracing::trace!(target: "draglist_core::node", ?id, "registered node");
        id
    }

    /// Destroy a node and all of its children.
    pub fn destroy(&mut self, id: NodeId) -> NodeResult<()> {
        let descendants = self.collect_descendants(id)?;
        tracing::trace!(
            target: "draglist_core::node",
            ?id,
            descendant_count = descendants.len(),
            "destroying node"
        );

        // Unlink from the parent's child list.
        let parent_id = self.nodes.get(id).and_then(|d| d.parent);
        if let Some(parent_id) = parent_id
            && let Some(parent) = self.nodes.get_mut(parent_id)
        {
            parent.children.retain(|&child| child != id);
        }

        for child in descendants {
            self.nodes.remove(child);
        }
        self.nodes.remove(id);
        Ok(())
    }

    fn collect_descendants(&self, id: NodeId) -> NodeResult<Vec<NodeId>> {
        let mut result = Vec::new();
        self.collect_descendants_recursive(id, &mut result)?;
        Ok(result)
    }

    fn collect_descendants_recursive(
        &self,
        id: NodeId,
        result: &mut Vec<NodeId>,
    ) -> NodeResult<()> {
        let data = self.nodes.get(id).ok_or(NodeError::InvalidNodeId)?;
        for &child in &data.children {
            self.collect_descendants_recursive(child, result)?;
            result.push(child);
        }
        Ok(())
    }

    /// Check whether a node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> NodeResult<Option<NodeId>> {
        self.nodes
            .get(id)
            .map(|d| d.parent)
            .ok_or(NodeError::InvalidNodeId)
    }

    /// Get the children of a node, in visual order.
    pub fn children(&self, id: NodeId) -> NodeResult<&[NodeId]> {
        self.nodes
            .get(id)
            .map(|d| d.children.as_slice())
            .ok_or(NodeError::InvalidNodeId)
    }

    /// Get the number of children of a node.
    pub fn child_count(&self, id: NodeId) -> NodeResult<usize> {
        self.children(id).map(|c| c.len())
    }

    /// Attach a node as the last child of a parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> NodeResult<()> {
        let count = self.child_count(parent)?;
        self.insert_child_at(parent, child, count)
    }

    /// Attach a node as a child of `parent` at the given position.
    ///
    /// The node is detached from its previous parent first. `index` is
    /// clamped to the child count.
    pub fn insert_child_at(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> NodeResult<()> {
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            return Err(NodeError::InvalidNodeId);
        }
        if child == parent || self.is_ancestor_of(child, parent) {
            return Err(NodeError::CircularParentage);
        }

        self.unlink(child);

        if let Some(data) = self.nodes.get_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(parent_data) = self.nodes.get_mut(parent) {
            let index = index.min(parent_data.children.len());
            parent_data.children.insert(index, child);
        }
        Ok(())
    }

    /// Move a node to a new position among its current siblings.
    pub fn move_child_to(&mut self, parent: NodeId, child: NodeId, index: usize) -> NodeResult<()> {
        let parent_data = self.nodes.get_mut(parent).ok_or(NodeError::InvalidNodeId)?;
        let Some(from) = parent_data.children.iter().position(|&c| c == child) else {
            return Err(NodeError::InvalidNodeId);
        };
        parent_data.children.remove(from);
        let index = index.min(parent_data.children.len());
        parent_data.children.insert(index, child);
        Ok(())
    }

    /// Detach a node from its parent, keeping it alive as a root.
    pub fn detach(&mut self, id: NodeId) -> NodeResult<()> {
        if !self.nodes.contains_key(id) {
            return Err(NodeError::InvalidNodeId);
        }
        self.unlink(id);
        if let Some(data) = self.nodes.get_mut(id) {
            data.parent = None;
        }
        Ok(())
    }

    fn unlink(&mut self, id: NodeId) {
        let parent_id = self.nodes.get(id).and_then(|d| d.parent);
        if let Some(parent_id) = parent_id
            && let Some(parent) = self.nodes.get_mut(parent_id)
        {
            parent.children.retain(|&child| child != id);
        }
    }

    fn is_ancestor_of(&self, potential_ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.nodes.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    /// Get the index of a node among its siblings.
    ///
    /// Returns `None` for detached (root) nodes.
    pub fn sibling_index(&self, id: NodeId) -> NodeResult<Option<usize>> {
        let data = self.nodes.get(id).ok_or(NodeError::InvalidNodeId)?;
        if let Some(parent_id) = data.parent {
            let parent = self.nodes.get(parent_id).ok_or(NodeError::InvalidNodeId)?;
            Ok(parent.children.iter().position(|&c| c == id))
        } else {
            Ok(None)
        }
    }

    /// Get a node's name.
    pub fn node_name(&self, id: NodeId) -> NodeResult<&str> {
        self.nodes
            .get(id)
            .map(|d| d.name.as_str())
            .ok_or(NodeError::InvalidNodeId)
    }

    /// Set a node's name.
    pub fn set_node_name(&mut self, id: NodeId, name: String) -> NodeResult<()> {
        self.nodes
            .get_mut(id)
            .map(|d| d.name = name)
            .ok_or(NodeError::InvalidNodeId)
    }

    /// Get the number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

/// A thread-safe wrapper around [`NodeTree`].
///
/// Provides concurrent read access with exclusive write access via `RwLock`.
pub struct SharedNodeTree {
    inner: RwLock<NodeTree>,
}

impl SharedNodeTree {
    /// Create a new shared tree.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(NodeTree::new()),
        }
    }

    /// Register a new detached node.
    pub fn register(&self) -> NodeId {
        self.inner.write().register()
    }

    /// Destroy a node and its children.
    pub fn destroy(&self, id: NodeId) -> NodeResult<()> {
        self.inner.write().destroy(id)
    }

    /// Check whether a node exists.
    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.read().contains(id)
    }

    /// Get the parent of a node.
    pub fn parent(&self, id: NodeId) -> NodeResult<Option<NodeId>> {
        self.inner.read().parent(id)
    }

    /// Get the children of a node (owned copy, in visual order).
    pub fn children(&self, id: NodeId) -> NodeResult<Vec<NodeId>> {
        self.inner.read().children(id).map(|c| c.to_vec())
    }

    /// Get the number of children of a node.
    pub fn child_count(&self, id: NodeId) -> NodeResult<usize> {
        self.inner.read().child_count(id)
    }

    /// Attach a node as the last child of a parent.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> NodeResult<()> {
        self.inner.write().append_child(parent, child)
    }

    /// Attach a node as a child at the given position.
    pub fn insert_child_at(&self, parent: NodeId, child: NodeId, index: usize) -> NodeResult<()> {
        self.inner.write().insert_child_at(parent, child, index)
    }

    /// Move a node among its current siblings.
    pub fn move_child_to(&self, parent: NodeId, child: NodeId, index: usize) -> NodeResult<()> {
        self.inner.write().move_child_to(parent, child, index)
    }

    /// Detach a node from its parent.
    pub fn detach(&self, id: NodeId) -> NodeResult<()> {
        self.inner.write().detach(id)
    }

    /// Get the index of a node among its siblings.
    pub fn sibling_index(&self, id: NodeId) -> NodeResult<Option<usize>> {
        self.inner.read().sibling_index(id)
    }

    /// Get a node's name.
    pub fn node_name(&self, id: NodeId) -> NodeResult<String> {
        self.inner.read().node_name(id).map(|s| s.to_string())
    }

    /// Set a node's name.
    pub fn set_node_name(&self, id: NodeId, name: String) -> NodeResult<()> {
        self.inner.write().set_node_name(id, name)
    }

    /// Get the number of live nodes.
    pub fn node_count(&self) -> usize {
        self.inner.read().node_count()
    }

    /// Access the tree with a read lock for compound queries.
    pub fn with_read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&NodeTree) -> R,
    {
        f(&self.inner.read())
    }
}

impl Default for SharedNodeTree {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(SharedNodeTree: Send, Sync);

/// Global element tree (lazy initialized).
static GLOBAL_TREE: OnceLock<SharedNodeTree> = OnceLock::new();

/// Initialize the global element tree. Safe to call more than once.
pub fn init_node_tree() {
    let _ = GLOBAL_TREE.set(SharedNodeTree::new());
}

/// Get a reference to the global element tree.
pub fn node_tree() -> NodeResult<&'static SharedNodeTree> {
    GLOBAL_TREE.get().ok_or(NodeError::TreeNotInitialized)
}

/// The trait implemented by anything that owns a node in the element tree.
pub trait Node: Send + Sync {
    /// Get this node's unique identifier.
    fn node_id(&self) -> NodeId;
}

/// Helper for implementing the [`Node`] trait.
///
/// Include this as a field in your node types to handle registration and
/// provide the node id. On construction it registers with the global tree;
/// on drop it destroys the node (and any children still attached to it).
///
/// # Example
///
/// ```
/// use draglist_core::{Node, NodeBase, NodeId};
///
/// struct Card {
///     node: NodeBase,
/// }
///
/// impl Node for Card {
///     fn node_id(&self) -> NodeId {
///         self.node.id()
///     }
/// }
///
/// let card = Card { node: NodeBase::new() };
/// assert!(draglist_core::node_tree().unwrap().contains(card.node_id()));
/// ```
#[derive(Debug)]
pub struct NodeBase {
    id: NodeId,
}

impl NodeBase {
    /// Create a new node base, registering a node in the global tree.
    ///
    /// Initializes the global tree on first use.
    pub fn new() -> Self {
        init_node_tree();
        let tree = node_tree().expect("element tree initialized above");
        Self {
            id: tree.register(),
        }
    }

    /// Get the node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Get the node's name from the tree.
    pub fn name(&self) -> String {
        node_tree()
            .and_then(|t| t.node_name(self.id))
            .unwrap_or_default()
    }

    /// Set the node's name in the tree.
    pub fn set_name(&self, name: impl Into<String>) {
        if let Ok(tree) = node_tree() {
            let _ = tree.set_node_name(self.id, name.into());
        }
    }

    /// Get the parent node id.
    pub fn parent(&self) -> Option<NodeId> {
        node_tree().and_then(|t| t.parent(self.id)).ok().flatten()
    }

    /// Get child node ids, in visual order.
    pub fn children(&self) -> Vec<NodeId> {
        node_tree()
            .and_then(|t| t.children(self.id))
            .unwrap_or_default()
    }

    /// Get this node's index among its siblings.
    pub fn sibling_index(&self) -> Option<usize> {
        node_tree()
            .and_then(|t| t.sibling_index(self.id))
            .ok()
            .flatten()
    }
}

impl Default for NodeBase {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NodeBase {
    fn drop(&mut self) {
        if let Ok(tree) = node_tree() {
            let _ = tree.destroy(self.id);
        }
    }
}

impl Node for NodeBase {
    fn node_id(&self) -> NodeId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_contains() {
        let mut tree = NodeTree::new();
        let id = tree.register();
        assert!(tree.contains(id));
        assert_eq!(tree.parent(id), Ok(None));
    }

    #[test]
    fn test_append_preserves_order() {
        let mut tree = NodeTree::new();
        let parent = tree.register();
        let a = tree.register();
        let b = tree.register();
        let c = tree.register();

        tree.append_child(parent, a).unwrap();
        tree.append_child(parent, b).unwrap();
        tree.append_child(parent, c).unwrap();

        assert_eq!(tree.children(parent).unwrap(), &[a, b, c]);
        assert_eq!(tree.sibling_index(b), Ok(Some(1)));
    }

    #[test]
    fn test_insert_child_at() {
        let mut tree = NodeTree::new();
        let parent = tree.register();
        let a = tree.register();
        let b = tree.register();
        let c = tree.register();

        tree.append_child(parent, a).unwrap();
        tree.append_child(parent, c).unwrap();
        tree.insert_child_at(parent, b, 1).unwrap();

        assert_eq!(tree.children(parent).unwrap(), &[a, b, c]);

        // Index past the end clamps to append.
        let d = tree.register();
        tree.insert_child_at(parent, d, 99).unwrap();
        assert_eq!(tree.children(parent).unwrap(), &[a, b, c, d]);
    }

    #[test]
    fn test_move_child_to() {
        let mut tree = NodeTree::new();
        let parent = tree.register();
        let a = tree.register();
        let b = tree.register();
        let c = tree.register();
        tree.append_child(parent, a).unwrap();
        tree.append_child(parent, b).unwrap();
        tree.append_child(parent, c).unwrap();

        tree.move_child_to(parent, c, 0).unwrap();
        assert_eq!(tree.children(parent).unwrap(), &[c, a, b]);

        tree.move_child_to(parent, c, 2).unwrap();
        assert_eq!(tree.children(parent).unwrap(), &[a, b, c]);
    }

    #[test]
    fn test_reparent_detaches_from_old_parent() {
        let mut tree = NodeTree::new();
        let first = tree.register();
        let second = tree.register();
        let child = tree.register();

        tree.append_child(first, child).unwrap();
        tree.append_child(second, child).unwrap();

        assert!(tree.children(first).unwrap().is_empty());
        assert_eq!(tree.children(second).unwrap(), &[child]);
        assert_eq!(tree.parent(child), Ok(Some(second)));
    }

    #[test]
    fn test_circular_parentage_rejected() {
        let mut tree = NodeTree::new();
        let a = tree.register();
        let b = tree.register();
        tree.append_child(a, b).unwrap();

        assert_eq!(tree.append_child(b, a), Err(NodeError::CircularParentage));
        assert_eq!(tree.append_child(a, a), Err(NodeError::CircularParentage));
    }

    #[test]
    fn test_destroy_cascades_and_invalidates_ids() {
        let mut tree = NodeTree::new();
        let parent = tree.register();
        let child = tree.register();
        tree.append_child(parent, child).unwrap();

        tree.destroy(parent).unwrap();
        assert!(!tree.contains(parent));
        assert!(!tree.contains(child));

        // A destroyed id never resolves again.
        assert_eq!(tree.parent(child), Err(NodeError::InvalidNodeId));
    }

    #[test]
    fn test_destroy_unlinks_from_parent() {
        let mut tree = NodeTree::new();
        let parent = tree.register();
        let a = tree.register();
        let b = tree.register();
        tree.append_child(parent, a).unwrap();
        tree.append_child(parent, b).unwrap();

        tree.destroy(a).unwrap();
        assert_eq!(tree.children(parent).unwrap(), &[b]);
    }

    #[test]
    fn test_detach_keeps_node_alive() {
        let mut tree = NodeTree::new();
        let parent = tree.register();
        let child = tree.register();
        tree.append_child(parent, child).unwrap();

        tree.detach(child).unwrap();
        assert!(tree.contains(child));
        assert_eq!(tree.parent(child), Ok(None));
        assert!(tree.children(parent).unwrap().is_empty());
    }

    #[test]
    fn test_node_base_registers_and_cleans_up() {
        let id = {
            let base = NodeBase::new();
            base.set_name("probe");
            assert_eq!(base.name(), "probe");
            base.id()
        };
        // Dropped: the id is gone from the global tree.
        assert!(!node_tree().unwrap().contains(id));
    }
}
