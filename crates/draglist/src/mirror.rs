//! The drag mirror (ghost) element.
//!
//! While a drag is active the widget shows its own ghost under the pointer
//! instead of the host's native drag image: a clone of the dragged element's
//! visual, optionally customized (or vetoed) by the caller's mirror-render
//! collaborator. The mirror is owned by the list that started the drag and
//! destroyed unconditionally at drag end; it never participates in layout or
//! hit-testing.

use draglist_core::NodeId;

use crate::element::ItemElement;
use crate::geometry::{Point, Rect};

/// Mirror-render collaborator: receives the clone, may replace or veto it.
pub type RenderMirror = Box<dyn Fn(ItemElement) -> Option<ItemElement> + Send + Sync>;

/// The transient ghost element tracking the pointer during a drag.
#[derive(Debug)]
pub struct Mirror {
    element: ItemElement,
}

impl Mirror {
    /// Build a mirror from the dragged element's visual.
    ///
    /// Returns `None` when the mirror-render collaborator vetoes; the drag
    /// proceeds without a ghost in that case.
    pub(crate) fn build(
        source: &ItemElement,
        customize: Option<&RenderMirror>,
        at: Point,
    ) -> Option<Self> {
        let clone = source.clone_visual();
        let mut element = match customize {
            Some(render) => render(clone)?,
            None => clone,
        };
        // The ghost keeps the dragged element's footprint regardless of what
        // the collaborator did to the visuals.
        element.set_size(source.size());
        element.set_rect(Rect {
            origin: at,
            size: source.size(),
        });
        Some(Self { element })
    }

    /// The mirror's node id.
    pub fn id(&self) -> NodeId {
        self.element.id()
    }

    /// The mirror's current position.
    pub fn position(&self) -> Point {
        self.element.rect().origin
    }

    /// Track the pointer.
    pub(crate) fn move_to(&mut self, at: Point) {
        let rect = self.element.rect();
        self.element.set_rect(Rect {
            origin: at,
            size: rect.size,
        });
    }
}
