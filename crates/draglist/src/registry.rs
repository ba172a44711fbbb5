//! Per-instance item bookkeeping.
//!
//! [`ItemStore`] keeps the two structures the widget must never let drift
//! apart: the ordered value sequence and the rendered elements, held as one
//! sequence of pairs so every mutation moves both sides atomically. The
//! element tree's child order under the list's item slot is kept in lockstep
//! by the same operations.
//!
//! Lookups in both directions are instance-scoped and silent on absence;
//! cross-instance element resolution lives in the shared drag context.

use draglist_core::{NodeId, node_tree};

use crate::element::ItemElement;
use crate::geometry::{Point, Rect};

/// One rendered item: a data value and its visual element.
#[derive(Debug)]
pub struct ItemEntry<T> {
    /// The caller's data value.
    pub value: T,
    /// The rendered element for that value.
    pub element: ItemElement,
}

/// The ordered collection of a single list instance.
///
/// Invariant: the entry order equals the child order of the list's item slot
/// in the element tree, at all times. All mutation goes through the methods
/// here; nothing else touches the sequence.
#[derive(Debug)]
pub struct ItemStore<T> {
    entries: Vec<ItemEntry<T>>,
    width: f32,
    spacing: f32,
}

impl<T> ItemStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            width: 0.0,
            spacing: 0.0,
        }
    }

    /// Set the layout metrics and re-run layout.
    pub(crate) fn set_metrics(&mut self, width: f32, spacing: f32) {
        self.width = width;
        self.spacing = spacing;
        self.relayout();
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemEntry<T>> {
        self.entries.iter()
    }

    /// Position of the element with the given id, if present.
    pub fn position_of_element(&self, id: NodeId) -> Option<usize> {
        self.entries.iter().position(|e| e.element.id() == id)
    }

    /// The value rendered as the given element, if present.
    pub fn value_for(&self, id: NodeId) -> Option<&T> {
        self.entries
            .iter()
            .find(|e| e.element.id() == id)
            .map(|e| &e.value)
    }

    /// The element at the given position.
    pub fn element_at(&self, index: usize) -> Option<&ItemElement> {
        self.entries.get(index).map(|e| &e.element)
    }

    /// Hit-test a list-local point against the laid-out items.
    ///
    /// Only the vertical band matters; items span the full width.
    pub fn item_at(&self, point: Point) -> Option<(usize, NodeId)> {
        self.entries
            .iter()
            .position(|e| e.element.rect().contains_y(point.y))
            .map(|i| (i, self.entries[i].element.id()))
    }

    /// Whether any rendered element reports itself invalid.
    pub fn any_invalid(&self) -> bool {
        self.entries.iter().any(|e| !e.element.is_valid())
    }

    /// Append an item, attaching its element as the last child of `slot`.
    pub(crate) fn push(&mut self, slot: NodeId, value: T, element: ItemElement) {
        if let Ok(tree) = node_tree() {
            let _ = tree.append_child(slot, element.id());
        }
        self.entries.push(ItemEntry { value, element });
        self.relayout();
    }

    /// Insert an item at `index`, attaching its element at the same position
    /// under `slot`.
    pub(crate) fn insert(&mut self, slot: NodeId, index: usize, value: T, element: ItemElement) {
        let index = index.min(self.entries.len());
        if let Ok(tree) = node_tree() {
            let _ = tree.insert_child_at(slot, element.id(), index);
        }
        self.entries.insert(index, ItemEntry { value, element });
        self.relayout();
    }

    /// Remove and return the entry at `index`.
    ///
    /// Dropping the returned entry detaches and destroys its element.
    pub(crate) fn remove_at(&mut self, index: usize) -> Option<ItemEntry<T>> {
        if index >= self.entries.len() {
            return None;
        }
        let entry = self.entries.remove(index);
        self.relayout();
        Some(entry)
    }

    /// Remove every entry, destroying the elements.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Move the entry at `from` to position `to`, moving the element among
    /// its tree siblings identically.
    pub(crate) fn move_entry(&mut self, slot: NodeId, from: usize, to: usize) {
        if from >= self.entries.len() || to >= self.entries.len() || from == to {
            return;
        }
        let entry = self.entries.remove(from);
        if let Ok(tree) = node_tree() {
            let _ = tree.move_child_to(slot, entry.element.id(), to);
        }
        self.entries.insert(to, entry);
        self.relayout();
    }

    /// Set or clear the dragging marker on the element with the given id.
    ///
    /// Returns `false` when the element is not in this store; callers on the
    /// cleanup path treat that as a no-op.
    pub(crate) fn set_dragging(&mut self, id: NodeId, dragging: bool) -> bool {
        match self.entries.iter_mut().find(|e| e.element.id() == id) {
            Some(entry) => {
                entry.element.set_dragging(dragging);
                true
            }
            None => false,
        }
    }

    /// Restamp the draggable flag on every element.
    pub(crate) fn set_draggable_all(&mut self, draggable: bool) {
        for entry in &mut self.entries {
            entry.element.set_draggable(draggable);
        }
    }

    /// Recompute item rects by stacking elements vertically.
    pub(crate) fn relayout(&mut self) {
        let mut y = 0.0;
        for entry in &mut self.entries {
            let height = entry.element.size().height;
            entry.element.set_rect(Rect::new(0.0, y, self.width, height));
            y += height + self.spacing;
        }
    }
}

impl<T: Clone> ItemStore<T> {
    /// Snapshot of the value sequence, in order.
    pub fn values(&self) -> Vec<T> {
        self.entries.iter().map(|e| e.value.clone()).collect()
    }
}

impl<T: PartialEq> ItemStore<T> {
    /// Position of the first entry whose value equals `value`.
    pub fn position_of_value(&self, value: &T) -> Option<usize> {
        self.entries.iter().position(|e| e.value == *value)
    }

    /// The element rendered for `value`, if present.
    pub fn element_for(&self, value: &T) -> Option<&ItemElement> {
        self.entries
            .iter()
            .find(|e| e.value == *value)
            .map(|e| &e.element)
    }
}

impl<T> Default for ItemStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use draglist_core::{NodeBase, init_node_tree};

    fn slot() -> NodeBase {
        init_node_tree();
        NodeBase::new()
    }

    fn tree_children(slot: NodeId) -> Vec<NodeId> {
        node_tree().unwrap().children(slot).unwrap()
    }

    #[test]
    fn test_push_keeps_store_and_tree_in_lockstep() {
        let slot = slot();
        let mut store = ItemStore::new();
        store.push(slot.id(), "a", ItemElement::new());
        store.push(slot.id(), "b", ItemElement::new());
        store.push(slot.id(), "c", ItemElement::new());

        let order: Vec<NodeId> = store.iter().map(|e| e.element.id()).collect();
        assert_eq!(order, tree_children(slot.id()));
        assert_eq!(store.values(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_insert_and_remove_keep_order() {
        let slot = slot();
        let mut store = ItemStore::new();
        store.push(slot.id(), "a", ItemElement::new());
        store.push(slot.id(), "c", ItemElement::new());
        store.insert(slot.id(), 1, "b", ItemElement::new());

        assert_eq!(store.values(), vec!["a", "b", "c"]);
        let order: Vec<NodeId> = store.iter().map(|e| e.element.id()).collect();
        assert_eq!(order, tree_children(slot.id()));

        let removed = store.remove_at(1).unwrap();
        assert_eq!(removed.value, "b");
        let removed_id = removed.element.id();
        drop(removed);

        assert_eq!(store.values(), vec!["a", "c"]);
        assert!(!node_tree().unwrap().contains(removed_id));
        let order: Vec<NodeId> = store.iter().map(|e| e.element.id()).collect();
        assert_eq!(order, tree_children(slot.id()));
    }

    #[test]
    fn test_move_entry_reorders_both_structures() {
        let slot = slot();
        let mut store = ItemStore::new();
        store.push(slot.id(), "a", ItemElement::new());
        store.push(slot.id(), "b", ItemElement::new());
        store.push(slot.id(), "c", ItemElement::new());

        store.move_entry(slot.id(), 2, 0);
        assert_eq!(store.values(), vec!["c", "a", "b"]);
        let order: Vec<NodeId> = store.iter().map(|e| e.element.id()).collect();
        assert_eq!(order, tree_children(slot.id()));
    }

    #[test]
    fn test_lookups_are_silent_on_absence() {
        let slot = slot();
        let mut store = ItemStore::new();
        store.push(slot.id(), "a", ItemElement::new());

        let stray = ItemElement::new();
        assert!(store.value_for(stray.id()).is_none());
        assert!(store.element_for(&"zzz").is_none());
        assert!(store.position_of_value(&"zzz").is_none());
    }

    #[test]
    fn test_layout_and_hit_test() {
        let slot = slot();
        let mut store = ItemStore::new();
        store.set_metrics(200.0, 0.0);
        store.push(slot.id(), "a", ItemElement::new().with_height(24.0));
        store.push(slot.id(), "b", ItemElement::new().with_height(40.0));
        store.push(slot.id(), "c", ItemElement::new().with_height(24.0));

        assert_eq!(store.element_at(0).unwrap().rect(), Rect::new(0.0, 0.0, 200.0, 24.0));
        assert_eq!(store.element_at(1).unwrap().rect(), Rect::new(0.0, 24.0, 200.0, 40.0));
        assert_eq!(store.element_at(2).unwrap().rect(), Rect::new(0.0, 64.0, 200.0, 24.0));

        assert_eq!(store.item_at(Point::new(5.0, 10.0)).map(|(i, _)| i), Some(0));
        assert_eq!(store.item_at(Point::new(5.0, 30.0)).map(|(i, _)| i), Some(1));
        assert_eq!(store.item_at(Point::new(5.0, 70.0)).map(|(i, _)| i), Some(2));
        assert_eq!(store.item_at(Point::new(5.0, 300.0)), None);
    }

    #[test]
    fn test_spacing_in_layout() {
        let slot = slot();
        let mut store = ItemStore::new();
        store.set_metrics(100.0, 4.0);
        store.push(slot.id(), 1, ItemElement::new().with_height(24.0));
        store.push(slot.id(), 2, ItemElement::new().with_height(24.0));

        assert_eq!(store.element_at(1).unwrap().rect().top(), 28.0);
        // The gap between items belongs to neither.
        assert_eq!(store.item_at(Point::new(0.0, 25.0)), None);
    }

    #[test]
    fn test_dragging_marker_is_defensive() {
        let slot = slot();
        let mut store: ItemStore<&str> = ItemStore::new();
        store.push(slot.id(), "a", ItemElement::new());

        let stray = ItemElement::new();
        assert!(!store.set_dragging(stray.id(), true));

        let id = store.element_at(0).unwrap().id();
        assert!(store.set_dragging(id, true));
        assert!(store.element_at(0).unwrap().is_dragging());
    }
}
