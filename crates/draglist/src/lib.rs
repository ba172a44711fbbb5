//! Draglist: a draggable, reorderable list widget.
//!
//! The widget renders caller data as visual item elements, keeps the ordered
//! value collection synchronized with the visual order, and supports
//! drag-and-drop reordering within one list and item transfer across
//! cooperating lists. It exposes a form-field-like contract
//! (name/value/validity/reset).
//!
//! # Quick start
//!
//! ```
//! use draglist::{DragContext, DragList, ItemElement, ListConfig};
//!
//! // Two lists sharing a context can exchange items when both are
//! // shareable and their type tags match.
//! let context = DragContext::new();
//! let config = ListConfig {
//!     type_tag: "cards".to_string(),
//!     draggable: true,
//!     shareable: true,
//!     ..Default::default()
//! };
//!
//! let render = |card: &String| Some(ItemElement::new().with_caption(card.clone()));
//! let mut backlog = DragList::with_config(config.clone(), context.clone(), render);
//! let done = DragList::with_config(config, context, render);
//!
//! backlog.add_item("write docs".to_string());
//! assert_eq!(backlog.len(), 1);
//! assert!(done.is_empty());
//! ```
//!
//! # Architecture
//!
//! - [`DragList`] owns the container node, the configuration, and the ordered
//!   item store; every mutation keeps the value order equal to the element
//!   tree's child order.
//! - [`DragContext`] is the explicitly shared coordinator for the single
//!   active drag session and cross-list element resolution.
//! - [`ItemElement`] is what the render collaborator produces per value;
//!   [`events`] defines the gesture events the host delivers.

pub mod context;
pub mod element;
pub mod error;
pub mod events;
pub mod form;
pub mod geometry;
pub mod list;
pub mod mirror;
pub mod registry;

pub use context::DragContext;
pub use element::{DEFAULT_ITEM_HEIGHT, ItemElement};
pub use error::{ListError, ListResult};
pub use events::{
    DragEndEvent, DragEnterEvent, DragOverEvent, DragStartEvent, DropEvent, EventBase, ListEvent,
    PointerMoveEvent,
};
pub use form::{ListConfig, ValidityState};
pub use geometry::{Point, Rect, Size};
pub use list::{DragList, ListValue, RenderItem};
pub use mirror::RenderMirror;
pub use registry::{ItemEntry, ItemStore};

// Re-export the core handles callers interact with.
pub use draglist_core::{Node, NodeId, Signal};
