//! The draggable list widget.
//!
//! [`DragList`] renders arbitrary data items as visual elements inside a
//! container node, lets the user reorder them by dragging within one list or
//! across cooperating lists, and keeps the ordered value collection
//! synchronized with the visual order under every gesture outcome. It exposes
//! a form-field-like contract (name/value/validity/reset).
//!
//! # Example
//!
//! ```
//! use draglist::{DragList, ItemElement, ListConfig, DragContext};
//!
//! let config = ListConfig {
//!     name: "tags".to_string(),
//!     draggable: true,
//!     ..Default::default()
//! };
//! let mut list = DragList::with_config(config, DragContext::new(), |tag: &String| {
//!     Some(ItemElement::new().with_caption(tag.clone()))
//! });
//!
//! list.add_item("alpha".to_string());
//! list.add_item("beta".to_string());
//! assert_eq!(list.value(), vec!["alpha".to_string(), "beta".to_string()]);
//! ```
//!
//! # Driving the widget
//!
//! The host delivers gesture events ([`crate::events`]) to whichever list the
//! pointer is over; all collection mutation happens inside those callbacks.
//! Lists built from the same [`DragContext`] exchange items when both are
//! shareable and their type tags match.

use std::sync::Arc;

use parking_lot::RwLock;

use draglist_core::{Node, NodeBase, NodeId, Property, Signal, node_tree};

use crate::context::{DragContext, DragSession};
use crate::element::ItemElement;
use crate::error::{ListError, ListResult};
use crate::events::{
    DragEndEvent, DragEnterEvent, DragOverEvent, DragStartEvent, DropEvent, ListEvent,
    PointerMoveEvent,
};
use crate::form::{FormState, ListConfig, ValidityState};
use crate::geometry::{Point, Rect};
use crate::mirror::{Mirror, RenderMirror};
use crate::registry::ItemStore;

/// Bounds required of list item values.
///
/// Values are compared by equality when looked up and cloned when they cross
/// list boundaries or are snapshotted out.
pub trait ListValue: Clone + PartialEq + Send + Sync + 'static {}

impl<T: Clone + PartialEq + Send + Sync + 'static> ListValue for T {}

/// Render collaborator: builds the visual element for one value, or vetoes.
pub type RenderItem<T> = Box<dyn Fn(&T) -> Option<ItemElement> + Send + Sync>;

/// A draggable, reorderable list of values.
pub struct DragList<T: ListValue> {
    /// Container node; the mirror attaches here during a drag.
    root: NodeBase,
    /// Slot node holding the item elements, in visual order.
    item_slot: NodeBase,
    geometry: Rect,
    spacing: f32,

    form: FormState,
    type_tag: String,
    drag_enabled: Property<bool>,
    shareable: Property<bool>,
    default_value: Vec<T>,

    store: Arc<RwLock<ItemStore<T>>>,
    context: DragContext<T>,
    render_item: RenderItem<T>,
    render_mirror: Option<RenderMirror>,

    /// Ghost element, present while this instance's drag is in flight.
    mirror: Option<Mirror>,
    /// Container-level marker while a drag started here is active.
    active: bool,
    /// Whether this instance wants document-wide pointer moves.
    tracking_pointer: bool,

    /// Emitted after every successful mutation of the ordered collection.
    pub changed: Arc<Signal<()>>,
}

impl<T: ListValue> DragList<T> {
    /// Create a list with default configuration and a private drag context.
    ///
    /// A list with a private context can still reorder itself; use
    /// [`with_config`](Self::with_config) with a shared [`DragContext`] to
    /// allow transfers between lists.
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&T) -> Option<ItemElement> + Send + Sync + 'static,
    {
        Self::with_config(ListConfig::default(), DragContext::new(), render)
    }

    /// Create a list from configuration, a (possibly shared) drag context,
    /// and a render collaborator.
    ///
    /// The configured `value` becomes the default sequence and is rendered
    /// immediately, without change notifications.
    pub fn with_config<F>(config: ListConfig<T>, context: DragContext<T>, render: F) -> Self
    where
        F: Fn(&T) -> Option<ItemElement> + Send + Sync + 'static,
    {
        let root = NodeBase::new();
        if !config.name.is_empty() {
            root.set_name(config.name.clone());
        }
        let item_slot = NodeBase::new();
        item_slot.set_name("items");
        if let Ok(tree) = node_tree() {
            let _ = tree.append_child(root.id(), item_slot.id());
        }

        let mut list = Self {
            root,
            item_slot,
            geometry: Rect::ZERO,
            spacing: config.spacing,
            form: FormState::new(
                config.name,
                config.required,
                config.read_only,
                config.disabled,
            ),
            type_tag: config.type_tag,
            drag_enabled: Property::new(config.draggable),
            shareable: Property::new(config.shareable),
            default_value: config.value,
            store: Arc::new(RwLock::new(ItemStore::new())),
            context,
            render_item: Box::new(render),
            render_mirror: None,
            mirror: None,
            active: false,
            tracking_pointer: false,
            changed: Arc::new(Signal::new()),
        };

        list.store.write().set_metrics(0.0, list.spacing);

        let defaults = list.default_value.clone();
        list.changed.set_blocked(true);
        for value in defaults {
            list.add_item(value);
        }
        list.changed.set_blocked(false);
        list
    }

    /// Set the mirror-render collaborator (builder pattern).
    pub fn with_mirror_render<F>(mut self, render: F) -> Self
    where
        F: Fn(ItemElement) -> Option<ItemElement> + Send + Sync + 'static,
    {
        self.render_mirror = Some(Box::new(render));
        self
    }

    // =========================================================================
    // Identity & geometry
    // =========================================================================

    /// The id of the slot node holding the item elements.
    pub fn item_slot_id(&self) -> NodeId {
        self.item_slot.id()
    }

    /// The list's geometry in its host surface.
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Set the list's geometry and re-run item layout.
    pub fn set_geometry(&mut self, rect: Rect) {
        self.geometry = rect;
        self.store.write().set_metrics(rect.width(), self.spacing);
    }

    /// Vertical gap between items.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Set the vertical gap between items.
    pub fn set_spacing(&mut self, spacing: f32) {
        self.spacing = spacing;
        self.store
            .write()
            .set_metrics(self.geometry.width(), spacing);
    }

    // =========================================================================
    // Form surface
    // =========================================================================

    /// The form-field name.
    pub fn name(&self) -> String {
        self.form.name()
    }

    /// Set the form-field name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.root.set_name(name.clone());
        self.form.set_name(name);
    }

    /// The type tag gating cross-list transfers.
    pub fn type_tag(&self) -> &str {
        &self.type_tag
    }

    /// Set the type tag.
    pub fn set_type_tag(&mut self, tag: impl Into<String>) {
        self.type_tag = tag.into();
    }

    /// Whether an empty list fails validity checks.
    pub fn required(&self) -> bool {
        self.form.required()
    }

    /// Set the required flag.
    pub fn set_required(&mut self, state: bool) {
        self.form.set_required(state);
    }

    /// Whether the list is read-only.
    pub fn read_only(&self) -> bool {
        self.form.read_only()
    }

    /// Set the read-only flag.
    pub fn set_read_only(&mut self, state: bool) {
        self.form.set_read_only(state);
    }

    /// Whether the list is disabled.
    pub fn disabled(&self) -> bool {
        self.form.disabled()
    }

    /// Set the disabled flag.
    pub fn set_disabled(&mut self, state: bool) {
        self.form.set_disabled(state);
    }

    /// Whether items can be dragged at all.
    pub fn draggable(&self) -> bool {
        self.drag_enabled.get()
    }

    /// Set the draggable flag, restamping every rendered element.
    pub fn set_draggable(&mut self, state: bool) {
        if self.drag_enabled.set(state) {
            self.store.write().set_draggable_all(state);
        }
    }

    /// Whether this list opted into cross-list transfers.
    pub fn shareable(&self) -> bool {
        self.shareable.get()
    }

    /// Set the shareable flag.
    pub fn set_shareable(&mut self, state: bool) {
        self.shareable.set(state);
    }

    /// Whether drag-and-drop is currently permitted.
    pub fn can_drag_and_drop(&self) -> bool {
        self.drag_enabled.get() && !self.form.disabled() && !self.form.read_only()
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Whether the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.store.read().is_empty()
    }

    /// Snapshot of the value sequence, in visual order.
    ///
    /// Mutating the returned vector never affects the list.
    pub fn value(&self) -> Vec<T> {
        self.store.read().values()
    }

    /// Replace the whole value sequence.
    ///
    /// Clears, then adds each value in order; a render veto skips that value
    /// and keeps going (no rollback). One change notification fires at the
    /// end.
    pub fn set_value(&mut self, values: Vec<T>) {
        self.changed.set_blocked(true);
        self.clear();
        for value in values {
            self.add_item(value);
        }
        self.changed.set_blocked(false);
        self.changed.emit(());
    }

    /// The originally-configured default sequence.
    pub fn default_value(&self) -> &[T] {
        &self.default_value
    }

    /// Restore the default sequence, or clear if none was configured.
    pub fn reset(&mut self) {
        self.set_value(self.default_value.clone());
    }

    /// Compute the list's validity.
    pub fn validity(&self) -> ValidityState {
        ValidityState {
            value_missing: self.form.required() && self.is_empty(),
            item_invalid: self.store.read().any_invalid(),
        }
    }

    /// Check the list's validity.
    pub fn check_validity(&self) -> bool {
        self.validity().is_valid()
    }

    /// Check the list's validity, reporting the failure for surfacing.
    pub fn report_validity(&self) -> bool {
        let validity = self.validity();
        if !validity.is_valid() {
            tracing::debug!(
                target: "draglist::list",
                list = %self.form.name(),
                value_missing = validity.value_missing,
                item_invalid = validity.item_invalid,
                "validity check failed"
            );
        }
        validity.is_valid()
    }

    // =========================================================================
    // Collection operations
    // =========================================================================

    /// Append a value.
    ///
    /// Returns `false` when the render collaborator vetoes; nothing is
    /// mutated in that case.
    pub fn add_item(&mut self, value: T) -> bool {
        let Some(element) = self.render_value(&value) else {
            return false;
        };
        self.store.write().push(self.item_slot.id(), value, element);
        self.changed.emit(());
        true
    }

    /// Insert a value immediately after `after`.
    ///
    /// Fails with [`ListError::AnchorNotFound`] when `after` is not in the
    /// list; returns `Ok(false)` on a render veto. The collection is
    /// untouched in both cases.
    pub fn insert_item(&mut self, value: T, after: &T) -> ListResult<bool> {
        let anchor = self
            .store
            .read()
            .position_of_value(after)
            .ok_or(ListError::AnchorNotFound)?;
        let Some(element) = self.render_value(&value) else {
            return Ok(false);
        };
        self.store
            .write()
            .insert(self.item_slot.id(), anchor + 1, value, element);
        self.changed.emit(());
        Ok(true)
    }

    /// Remove a value.
    ///
    /// Returns `false` when the value is not in the list.
    pub fn remove_item(&mut self, value: &T) -> bool {
        let removed = {
            let mut store = self.store.write();
            store
                .position_of_value(value)
                .and_then(|index| store.remove_at(index))
        };
        match removed {
            Some(entry) => {
                self.context.forget(entry.element.id());
                drop(entry);
                self.changed.emit(());
                true
            }
            None => false,
        }
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        {
            let mut store = self.store.write();
            for entry in store.iter() {
                self.context.forget(entry.element.id());
            }
            store.clear();
        }
        self.changed.emit(());
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// The element rendered for `value` in this list, if present.
    pub fn element_for(&self, value: &T) -> Option<NodeId> {
        self.store.read().element_for(value).map(|e| e.id())
    }

    /// The value rendered as `element` in this list, if present.
    pub fn value_for(&self, element: NodeId) -> Option<T> {
        self.store.read().value_for(element).cloned()
    }

    /// Read access to the rendered items, for painting hosts and tests.
    pub fn with_items<R>(&self, f: impl FnOnce(&ItemStore<T>) -> R) -> R {
        f(&self.store.read())
    }

    // =========================================================================
    // Drag state accessors
    // =========================================================================

    /// Whether a drag started on this list is in flight.
    pub fn is_drag_active(&self) -> bool {
        self.active
    }

    /// Whether this list wants document-wide pointer-move events.
    pub fn is_tracking_pointer(&self) -> bool {
        self.tracking_pointer
    }

    /// The mirror's node id, while one is shown.
    pub fn mirror_id(&self) -> Option<NodeId> {
        self.mirror.as_ref().map(|m| m.id())
    }

    /// The mirror's position, while one is shown.
    pub fn mirror_position(&self) -> Option<Point> {
        self.mirror.as_ref().map(|m| m.position())
    }

    // =========================================================================
    // Gesture state machine
    // =========================================================================

    /// Dispatch a gesture event to the matching handler.
    ///
    /// Returns whether the event was accepted.
    pub fn event(&mut self, event: &mut ListEvent) -> bool {
        match event {
            ListEvent::DragStart(e) => self.on_drag_start(e),
            ListEvent::PointerMove(e) => self.on_pointer_move(e),
            ListEvent::DragEnter(e) => self.on_drag_enter(e),
            ListEvent::DragOver(e) => self.on_drag_over(e),
            ListEvent::Drop(e) => self.on_drop(e),
            ListEvent::DragEnd(e) => self.on_drag_end(e),
        }
        event.is_accepted()
    }

    /// The user started dragging over this list.
    ///
    /// Opens the shared drag session when the pointer is on an item and the
    /// instance permits drag-and-drop.
    pub fn on_drag_start(&mut self, event: &mut DragStartEvent) {
        if !self.can_drag_and_drop() {
            return;
        }
        let Some((index, element_id)) = self.store.read().item_at(event.local_pos) else {
            return;
        };

        event.suppress_drag_image();
        event.base.accept();

        self.mirror = {
            let store = self.store.read();
            store.element_at(index).and_then(|element| {
                Mirror::build(element, self.render_mirror.as_ref(), event.local_pos)
            })
        };
        if let Some(mirror) = &self.mirror
            && let Ok(tree) = node_tree()
        {
            let _ = tree.append_child(self.root.id(), mirror.id());
        }

        self.tracking_pointer = true;
        self.active = true;
        self.store.write().set_dragging(element_id, true);
        self.context.begin(DragSession::new(
            self.type_tag.clone(),
            self.shareable.get(),
            self.root.id(),
            self.store.clone(),
            self.changed.clone(),
            element_id,
        ));
        tracing::debug!(target: "draglist::drag", list = %self.form.name(), "drag started");
    }

    /// Document-wide pointer move during an active drag.
    ///
    /// Pure visual feedback: repositions the mirror, touches no collection.
    pub fn on_pointer_move(&mut self, event: &PointerMoveEvent) {
        if let Some(mirror) = &mut self.mirror {
            mirror.move_to(event.local_pos);
        }
    }

    /// The pointer entered this list during a drag.
    pub fn on_drag_enter(&mut self, event: &mut DragEnterEvent) {
        let Some(session) = self.context.session() else {
            return;
        };
        if session.owner == self.root.id() {
            self.reorder_within(&session, event.local_pos);
        } else {
            self.transfer_in(&session, event.local_pos);
        }
    }

    /// The pointer is over this list during a drag.
    pub fn on_drag_over(&mut self, event: &mut DragOverEvent) {
        if self.can_drag_and_drop() {
            event.base.accept();
        }
    }

    /// The drag was released over this list.
    ///
    /// All collection mutation already happened during drag-enter
    /// transitions; this only suppresses the host's default handling.
    pub fn on_drop(&mut self, event: &mut DropEvent) {
        if self.can_drag_and_drop() {
            event.base.accept();
        }
    }

    /// The drag gesture finished, dropped or not.
    ///
    /// Safe to run unconditionally: every step tolerates already-removed
    /// state.
    pub fn on_drag_end(&mut self, _event: &mut DragEndEvent) {
        self.tracking_pointer = false;
        self.active = false;
        self.mirror = None;

        let Some(session) = self.context.clear() else {
            return;
        };
        session.store.write().set_dragging(session.element, false);
        if session.owner == self.root.id() {
            self.changed.emit(());
        }
        tracing::debug!(target: "draglist::drag", list = %self.form.name(), "drag ended");
    }

    // =========================================================================
    // Internal
    // =========================================================================

    fn render_value(&self, value: &T) -> Option<ItemElement> {
        let mut element = (self.render_item)(value)?;
        element.set_draggable(self.drag_enabled.get());
        self.context.record(element.id(), value.clone());
        Some(element)
    }

    /// Reorder the dragged element around the candidate under the pointer.
    ///
    /// Insert before the candidate when the pointer is in its upper half,
    /// after it otherwise. Repeated entry into the same half is a no-op.
    fn reorder_within(&mut self, session: &DragSession<T>, pos: Point) {
        let slot = self.item_slot.id();
        let mut store = self.store.write();
        let Some(from) = store.position_of_element(session.element) else {
            return;
        };
        let Some((candidate, candidate_id)) = store.item_at(pos) else {
            return;
        };
        if candidate_id == session.element {
            return;
        }
        let Some(candidate_element) = store.element_at(candidate) else {
            return;
        };
        let upper = pos.y <= candidate_element.rect().vertical_midpoint();
        let mut to = if upper { candidate } else { candidate + 1 };
        if from < to {
            to -= 1;
        }
        store.move_entry(slot, from, to);
    }

    /// Accept the dragged value from another list.
    fn transfer_in(&mut self, session: &DragSession<T>, pos: Point) {
        if !(self.shareable.get() && session.shareable && session.type_tag == self.type_tag) {
            return;
        }

        // Position first: entering the padding of a populated list is inert.
        let index = {
            let store = self.store.read();
            match store.item_at(pos) {
                Some((candidate, _)) => {
                    let Some(candidate_element) = store.element_at(candidate) else {
                        return;
                    };
                    if pos.y <= candidate_element.rect().vertical_midpoint() {
                        candidate
                    } else {
                        candidate + 1
                    }
                }
                None if store.is_empty() => 0,
                None => return,
            }
        };

        let Some(value) = self.context.value_of(session.element) else {
            return;
        };
        // Render veto: refuse the transfer, mutate nothing.
        let Some(element) = self.render_value(&value) else {
            return;
        };
        let new_element = element.id();

        // Vacate the source.
        {
            let mut source = session.store.write();
            if let Some(stale) = source.position_of_element(session.element) {
                let entry = source.remove_at(stale);
                drop(entry);
            }
        }
        self.context.forget(session.element);

        // Receive at the pointer position.
        {
            let mut store = self.store.write();
            store.insert(self.item_slot.id(), index, value, element);
            store.set_dragging(new_element, true);
        }

        self.context.retarget(DragSession::new(
            self.type_tag.clone(),
            self.shareable.get(),
            self.root.id(),
            self.store.clone(),
            self.changed.clone(),
            new_element,
        ));

        session.changed.emit(());
        self.changed.emit(());
        tracing::debug!(
            target: "draglist::drag",
            from = ?session.owner,
            to = ?self.root.id(),
            "item transferred"
        );
    }
}

impl<T: ListValue> Node for DragList<T> {
    fn node_id(&self) -> NodeId {
        self.root.id()
    }
}

static_assertions::assert_impl_all!(DragList<String>: Send, Sync);
