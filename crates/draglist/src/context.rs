//! The shared drag coordinator.
//!
//! Drag gestures are global to the host surface, not scoped to one list: any
//! list may become a drop target mid-gesture. [`DragContext`] is the narrow,
//! explicitly shared coordinator that models this. Lists constructed from the
//! same context cooperate; it owns the single active [`DragSession`] and the
//! element-to-value index that lets a drop target resolve a dragged element
//! it did not render.
//!
//! Ownership transfer between lists is an explicit [`retarget`] call, and the
//! session is cleared unconditionally at drag end — the context never keeps a
//! session pointing at a finished gesture.
//!
//! [`retarget`]: DragContext::retarget

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use slotmap::SecondaryMap;

use draglist_core::{NodeId, Signal};

use crate::registry::ItemStore;

/// The record of the currently active drag gesture.
///
/// Holds everything a drop target needs to mutate the vacated side of a
/// transfer: the source list's id, store handle and change signal, plus the
/// type tag and shareability gate, and the element under the pointer.
pub struct DragSession<T> {
    /// Type tag gating cross-list transfers.
    pub(crate) type_tag: String,
    /// Whether the owning list opted into cross-list transfers.
    pub(crate) shareable: bool,
    /// The list instance currently owning the gesture.
    pub(crate) owner: NodeId,
    /// The owning list's store.
    pub(crate) store: Arc<RwLock<ItemStore<T>>>,
    /// The owning list's change signal.
    pub(crate) changed: Arc<Signal<()>>,
    /// The element currently being dragged.
    pub(crate) element: NodeId,
}

impl<T> DragSession<T> {
    /// Create a session record.
    pub(crate) fn new(
        type_tag: String,
        shareable: bool,
        owner: NodeId,
        store: Arc<RwLock<ItemStore<T>>>,
        changed: Arc<Signal<()>>,
        element: NodeId,
    ) -> Self {
        Self {
            type_tag,
            shareable,
            owner,
            store,
            changed,
            element,
        }
    }

    /// The list instance currently owning the gesture.
    pub fn owner(&self) -> NodeId {
        self.owner
    }

    /// The element currently being dragged.
    pub fn element(&self) -> NodeId {
        self.element
    }
}

impl<T> Clone for DragSession<T> {
    fn clone(&self) -> Self {
        Self {
            type_tag: self.type_tag.clone(),
            shareable: self.shareable,
            owner: self.owner,
            store: self.store.clone(),
            changed: self.changed.clone(),
            element: self.element,
        }
    }
}

struct ContextInner<T> {
    /// Element-to-value index across every list sharing this context.
    values: SecondaryMap<NodeId, T>,
    /// The single active drag session, if any.
    session: Option<DragSession<T>>,
}

/// The shared drag coordinator for a set of cooperating lists.
///
/// Cheap to clone (shared handle). Lists built from the same context can
/// exchange items when their type tags match and both are shareable.
pub struct DragContext<T> {
    inner: Arc<Mutex<ContextInner<T>>>,
}

impl<T> DragContext<T> {
    /// Create a new coordinator with no active session.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ContextInner {
                values: SecondaryMap::new(),
                session: None,
            })),
        }
    }

    /// Record the association between a rendered element and its value.
    pub(crate) fn record(&self, element: NodeId, value: T) {
        self.inner.lock().values.insert(element, value);
    }

    /// Drop the association for an element that left the tree.
    pub(crate) fn forget(&self, element: NodeId) {
        self.inner.lock().values.remove(element);
    }

    /// Whether a drag session is active.
    pub fn is_active(&self) -> bool {
        self.inner.lock().session.is_some()
    }

    /// The list currently owning the active session, if any.
    pub fn owner(&self) -> Option<NodeId> {
        self.inner.lock().session.as_ref().map(|s| s.owner)
    }

    /// The element currently being dragged, if any.
    pub fn dragged(&self) -> Option<NodeId> {
        self.inner.lock().session.as_ref().map(|s| s.element)
    }

    /// Open a session for a starting gesture.
    ///
    /// A leftover session (a host that never delivered drag-end) is replaced;
    /// only one gesture can be active at a time.
    pub(crate) fn begin(&self, session: DragSession<T>) {
        let mut inner = self.inner.lock();
        if inner.session.is_some() {
            tracing::warn!(
                target: "draglist::drag",
                "replacing a drag session that was never ended"
            );
        }
        tracing::trace!(target: "draglist::drag", owner = ?session.owner, "drag session opened");
        inner.session = Some(session);
    }

    /// Hand the active session to a new owning list after a transfer.
    pub(crate) fn retarget(&self, session: DragSession<T>) {
        tracing::trace!(target: "draglist::drag", owner = ?session.owner, "drag session retargeted");
        self.inner.lock().session = Some(session);
    }

    /// Clear the session, returning it for final cleanup.
    ///
    /// Safe to call with no session active.
    pub(crate) fn clear(&self) -> Option<DragSession<T>> {
        let taken = self.inner.lock().session.take();
        if taken.is_some() {
            tracing::trace!(target: "draglist::drag", "drag session cleared");
        }
        taken
    }

    /// Snapshot the active session's handles.
    pub(crate) fn session(&self) -> Option<DragSession<T>> {
        self.inner.lock().session.clone()
    }
}

impl<T: Clone> DragContext<T> {
    /// Resolve the value rendered as the given element, whichever list
    /// rendered it.
    ///
    /// Absence is an expected, non-exceptional state (the element was
    /// removed, or belongs to lists outside this context).
    pub fn value_of(&self, element: NodeId) -> Option<T> {
        self.inner.lock().values.get(element).cloned()
    }
}

impl<T> Clone for DragContext<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Default for DragContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(DragContext<String>: Send, Sync);
