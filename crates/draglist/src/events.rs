//! Gesture event types for the list widget.
//!
//! The widget is driven entirely by the host delivering these events; there
//! is no other control flow into the drag state machine. Positions are in
//! list-local coordinates of the receiving list.
//!
//! Accepting an event tells the host that the widget handled it and that the
//! platform's default handling (native drop rejection, navigation) must be
//! suppressed — the analog of `preventDefault`.

use crate::geometry::Point;

/// Common data for all gesture events.
#[derive(Debug, Clone, Copy)]
pub struct EventBase {
    /// Whether the event has been accepted (handled).
    accepted: bool,
}

impl Default for EventBase {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, suppressing the host's default handling.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, leaving default handling in place.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// Sent when the user starts dragging over an item.
#[derive(Debug, Clone, Copy)]
pub struct DragStartEvent {
    /// Base event data.
    pub base: EventBase,
    /// Pointer position in list-local coordinates.
    pub local_pos: Point,
    /// Whether the widget asked the host to hide its native drag image.
    drag_image_suppressed: bool,
}

impl DragStartEvent {
    /// Create a new drag start event.
    pub fn new(local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
            drag_image_suppressed: false,
        }
    }

    /// Ask the host to replace its native drag image with nothing.
    ///
    /// The widget draws its own mirror element instead.
    pub fn suppress_drag_image(&mut self) {
        self.drag_image_suppressed = true;
    }

    /// Whether the native drag image was suppressed.
    pub fn is_drag_image_suppressed(&self) -> bool {
        self.drag_image_suppressed
    }
}

/// Sent for every pointer move while a drag is active (document-wide).
#[derive(Debug, Clone, Copy)]
pub struct PointerMoveEvent {
    /// Base event data.
    pub base: EventBase,
    /// Pointer position in the source list's local coordinates.
    pub local_pos: Point,
}

impl PointerMoveEvent {
    /// Create a new pointer move event.
    pub fn new(local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
        }
    }
}

/// Sent when the pointer enters a list during a drag.
#[derive(Debug, Clone, Copy)]
pub struct DragEnterEvent {
    /// Base event data.
    pub base: EventBase,
    /// Pointer position in list-local coordinates.
    pub local_pos: Point,
}

impl DragEnterEvent {
    /// Create a new drag enter event.
    pub fn new(local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
        }
    }
}

/// Sent repeatedly while the pointer is over a valid drop surface.
#[derive(Debug, Clone, Copy)]
pub struct DragOverEvent {
    /// Base event data.
    pub base: EventBase,
    /// Pointer position in list-local coordinates.
    pub local_pos: Point,
}

impl DragOverEvent {
    /// Create a new drag over event.
    pub fn new(local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
        }
    }
}

/// Sent when the user releases the drag over a list.
#[derive(Debug, Clone, Copy)]
pub struct DropEvent {
    /// Base event data.
    pub base: EventBase,
    /// Pointer position in list-local coordinates.
    pub local_pos: Point,
}

impl DropEvent {
    /// Create a new drop event.
    pub fn new(local_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
        }
    }
}

/// Sent when the drag gesture ends, dropped or not.
///
/// The host guarantees this fires even for cancelled gestures; the widget's
/// cleanup path is safe to run unconditionally.
#[derive(Debug, Clone, Copy, Default)]
pub struct DragEndEvent {
    /// Base event data.
    pub base: EventBase,
}

impl DragEndEvent {
    /// Create a new drag end event.
    pub fn new() -> Self {
        Self {
            base: EventBase::new(),
        }
    }
}

/// All gesture events understood by the list widget.
#[derive(Debug, Clone, Copy)]
pub enum ListEvent {
    /// Drag started over an item.
    DragStart(DragStartEvent),
    /// Pointer moved during an active drag.
    PointerMove(PointerMoveEvent),
    /// Pointer entered this list during a drag.
    DragEnter(DragEnterEvent),
    /// Pointer is over this list during a drag.
    DragOver(DragOverEvent),
    /// Drag released over this list.
    Drop(DropEvent),
    /// Drag gesture finished.
    DragEnd(DragEndEvent),
}

impl ListEvent {
    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        match self {
            Self::DragStart(e) => e.base.is_accepted(),
            Self::PointerMove(e) => e.base.is_accepted(),
            Self::DragEnter(e) => e.base.is_accepted(),
            Self::DragOver(e) => e.base.is_accepted(),
            Self::Drop(e) => e.base.is_accepted(),
            Self::DragEnd(e) => e.base.is_accepted(),
        }
    }

    /// Accept the event.
    pub fn accept(&mut self) {
        match self {
            Self::DragStart(e) => e.base.accept(),
            Self::PointerMove(e) => e.base.accept(),
            Self::DragEnter(e) => e.base.accept(),
            Self::DragOver(e) => e.base.accept(),
            Self::Drop(e) => e.base.accept(),
            Self::DragEnd(e) => e.base.accept(),
        }
    }

    /// Ignore the event.
    pub fn ignore(&mut self) {
        match self {
            Self::DragStart(e) => e.base.ignore(),
            Self::PointerMove(e) => e.base.ignore(),
            Self::DragEnter(e) => e.base.ignore(),
            Self::DragOver(e) => e.base.ignore(),
            Self::Drop(e) => e.base.ignore(),
            Self::DragEnd(e) => e.base.ignore(),
        }
    }
}
