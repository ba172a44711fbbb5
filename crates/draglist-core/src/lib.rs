//! Core systems for Draglist.
//!
//! This crate provides the foundational components of the Draglist widget:
//!
//! - **Element Tree**: arena-backed visual nodes with stable ids, parent-child
//!   links, and explicit sibling ordering (the visual order of a list is the
//!   child order of its container node)
//! - **Signal/Slot System**: type-safe change notification
//! - **Property System**: reactive value cells with change detection
//! - **Logging**: `tracing` targets and element tree debug dumps
//!
//! # Signal/Slot Example
//!
//! ```
//! use draglist_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("value changed to: {value}");
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Element Tree Example
//!
//! ```
//! use draglist_core::{init_node_tree, node_tree};
//!
//! init_node_tree();
//! let tree = node_tree().unwrap();
//!
//! let container = tree.register();
//! let item = tree.register();
//! tree.append_child(container, item).unwrap();
//! assert_eq!(tree.children(container).unwrap(), vec![item]);
//! ```

pub mod logging;
pub mod node;
pub mod property;
pub mod signal;

pub use logging::{TreeFormatOptions, format_node_tree};
pub use node::{
    Node, NodeBase, NodeError, NodeId, NodeResult, NodeTree, SharedNodeTree, init_node_tree,
    node_tree,
};
pub use property::Property;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
