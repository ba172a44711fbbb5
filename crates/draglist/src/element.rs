//! Rendered item elements.
//!
//! An [`ItemElement`] is the visual node produced by the caller's render
//! collaborator for one data value. Exactly one element exists per value
//! currently present in a list. The element owns a node in the global element
//! tree; dropping the element destroys the node, and its id never resolves
//! again (which is what keeps stale ids in side tables harmless).

use draglist_core::{Node, NodeBase, NodeId};

use crate::geometry::{Rect, Size};

/// Default height for elements whose renderer does not choose one.
pub const DEFAULT_ITEM_HEIGHT: f32 = 24.0;

/// A rendered item element.
///
/// Built by the render collaborator and handed to the list, which attaches it
/// under its item slot and assigns its layout rect. The renderer controls the
/// element's size, optional caption (used in debug tree dumps), and
/// self-reported validity.
#[derive(Debug)]
pub struct ItemElement {
    node: NodeBase,
    size: Size,
    rect: Rect,
    caption: Option<String>,
    draggable: bool,
    dragging: bool,
    valid: bool,
}

impl ItemElement {
    /// Create a new element with the default height.
    pub fn new() -> Self {
        Self {
            node: NodeBase::new(),
            size: Size::new(0.0, DEFAULT_ITEM_HEIGHT),
            rect: Rect::ZERO,
            caption: None,
            draggable: false,
            dragging: false,
            valid: true,
        }
    }

    /// Set the element's height (builder pattern).
    pub fn with_height(mut self, height: f32) -> Self {
        self.size.height = height;
        self
    }

    /// Set the element's caption (builder pattern).
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        let caption = caption.into();
        self.node.set_name(caption.clone());
        self.caption = Some(caption);
        self
    }

    /// Mark the element as self-reporting invalid (builder pattern).
    ///
    /// An invalid item makes its list fail validity checks.
    pub fn with_validity(mut self, valid: bool) -> Self {
        self.valid = valid;
        self
    }

    /// The element's stable node id.
    pub fn id(&self) -> NodeId {
        self.node.id()
    }

    /// The element's intrinsic size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Set the element's intrinsic size.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// The element's caption, if any.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// The layout rect last assigned by the list, in list-local coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Whether the element is stamped draggable.
    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub(crate) fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    /// Whether the element is the one currently being dragged.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub(crate) fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Whether the element reports itself valid.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Set the element's self-reported validity.
    pub fn set_valid(&mut self, valid: bool) {
        self.valid = valid;
    }

    /// Clone the element's visual for use as a drag mirror.
    ///
    /// The clone is a fresh node: same size, caption and validity, never
    /// draggable, never marked dragging.
    pub(crate) fn clone_visual(&self) -> ItemElement {
        let mut clone = ItemElement::new();
        clone.size = self.size;
        if let Some(caption) = &self.caption {
            clone.node.set_name(caption.clone());
            clone.caption = Some(caption.clone());
        }
        clone.valid = self.valid;
        clone
    }
}

impl Default for ItemElement {
    fn default() -> Self {
        Self::new()
    }
}

impl Node for ItemElement {
    fn node_id(&self) -> NodeId {
        self.node.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draglist_core::node_tree;

    #[test]
    fn test_builder() {
        let element = ItemElement::new()
            .with_height(32.0)
            .with_caption("alpha")
            .with_validity(false);
        assert_eq!(element.size().height, 32.0);
        assert_eq!(element.caption(), Some("alpha"));
        assert!(!element.is_valid());
        assert!(!element.is_draggable());
    }

    #[test]
    fn test_clone_visual_gets_fresh_node() {
        let element = ItemElement::new().with_caption("alpha");
        let clone = element.clone_visual();
        assert_ne!(element.id(), clone.id());
        assert_eq!(clone.caption(), Some("alpha"));
        assert!(!clone.is_draggable());
        assert!(!clone.is_dragging());
    }

    #[test]
    fn test_drop_destroys_node() {
        let id = {
            let element = ItemElement::new();
            element.id()
        };
        assert!(!node_tree().unwrap().contains(id));
    }
}
