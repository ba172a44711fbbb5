//! Cross-list transfer scenarios driven through the public API.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use draglist::{
    DragContext, DragEndEvent, DragEnterEvent, DragList, DragStartEvent, ItemElement, ListConfig,
    Point, Rect,
};

fn render(card: &String) -> Option<ItemElement> {
    Some(ItemElement::new().with_caption(card.clone()))
}

fn veto(_: &String) -> Option<ItemElement> {
    None
}

fn config(tag: &str, shareable: bool, values: &[&str]) -> ListConfig<String> {
    ListConfig {
        name: format!("{tag}-list"),
        type_tag: tag.to_string(),
        value: values.iter().map(|s| s.to_string()).collect(),
        draggable: true,
        shareable,
        ..Default::default()
    }
}

fn sized(mut list: DragList<String>) -> DragList<String> {
    list.set_geometry(Rect::new(0.0, 0.0, 200.0, 400.0));
    list
}

fn counter(list: &DragList<String>) -> Arc<AtomicUsize> {
    let counter = Arc::new(AtomicUsize::new(0));
    let counter_clone = counter.clone();
    list.changed.connect(move |_| {
        counter_clone.fetch_add(1, Ordering::SeqCst);
    });
    counter
}

/// Start dragging the first item of `list` (items are 24px tall).
fn grab_first(list: &mut DragList<String>) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let mut start = DragStartEvent::new(Point::new(5.0, 5.0));
    list.on_drag_start(&mut start);
    assert!(start.base.is_accepted(), "drag should start");
}

#[test]
fn transfer_into_empty_list_moves_value_and_notifies_both() {
    let context = DragContext::new();
    let mut source = sized(DragList::with_config(
        config("cards", true, &["A", "B"]),
        context.clone(),
        render,
    ));
    let mut target = sized(DragList::with_config(
        config("cards", true, &[]),
        context.clone(),
        render,
    ));

    let source_changes = counter(&source);
    let target_changes = counter(&target);

    grab_first(&mut source);
    let mut enter = DragEnterEvent::new(Point::new(5.0, 5.0));
    target.on_drag_enter(&mut enter);

    assert_eq!(source.value(), vec!["B".to_string()]);
    assert_eq!(target.value(), vec!["A".to_string()]);
    assert_eq!(source_changes.load(Ordering::SeqCst), 1);
    assert_eq!(target_changes.load(Ordering::SeqCst), 1);

    // The session now belongs to the target.
    assert_eq!(context.owner(), Some(draglist::Node::node_id(&target)));

    // The transferred element carries the dragging marker.
    assert!(target.with_items(|store| store.iter().any(|e| e.element.is_dragging())));
}

#[test]
fn transfer_respects_pointer_half_in_populated_target() {
    let context = DragContext::new();
    let mut source = sized(DragList::with_config(
        config("cards", true, &["A"]),
        context.clone(),
        render,
    ));

    // Upper half of X: A lands before it.
    let mut target = sized(DragList::with_config(
        config("cards", true, &["X"]),
        context.clone(),
        render,
    ));
    grab_first(&mut source);
    target.on_drag_enter(&mut DragEnterEvent::new(Point::new(5.0, 6.0)));
    assert_eq!(target.value(), vec!["A".to_string(), "X".to_string()]);
    source.on_drag_end(&mut DragEndEvent::new());

    // Lower half of X: A lands after it.
    let mut source = sized(DragList::with_config(
        config("cards", true, &["A"]),
        context.clone(),
        render,
    ));
    let mut target = sized(DragList::with_config(
        config("cards", true, &["X"]),
        context.clone(),
        render,
    ));
    grab_first(&mut source);
    target.on_drag_enter(&mut DragEnterEvent::new(Point::new(5.0, 20.0)));
    assert_eq!(target.value(), vec!["X".to_string(), "A".to_string()]);
    source.on_drag_end(&mut DragEndEvent::new());
}

#[test]
fn transfer_refused_on_type_tag_mismatch() {
    let context = DragContext::new();
    let mut source = sized(DragList::with_config(
        config("cards", true, &["A"]),
        context.clone(),
        render,
    ));
    let mut target = sized(DragList::with_config(
        config("notes", true, &[]),
        context.clone(),
        render,
    ));

    let source_changes = counter(&source);
    let target_changes = counter(&target);

    grab_first(&mut source);
    target.on_drag_enter(&mut DragEnterEvent::new(Point::new(5.0, 5.0)));

    assert_eq!(source.value(), vec!["A".to_string()]);
    assert!(target.is_empty());
    assert_eq!(source_changes.load(Ordering::SeqCst), 0);
    assert_eq!(target_changes.load(Ordering::SeqCst), 0);
    assert_eq!(context.owner(), Some(draglist::Node::node_id(&source)));
}

#[test]
fn transfer_refused_when_either_side_is_not_shareable() {
    // Source not shareable.
    let context = DragContext::new();
    let mut source = sized(DragList::with_config(
        config("cards", false, &["A"]),
        context.clone(),
        render,
    ));
    let mut target = sized(DragList::with_config(
        config("cards", true, &[]),
        context.clone(),
        render,
    ));
    grab_first(&mut source);
    target.on_drag_enter(&mut DragEnterEvent::new(Point::new(5.0, 5.0)));
    assert_eq!(source.value(), vec!["A".to_string()]);
    assert!(target.is_empty());
    source.on_drag_end(&mut DragEndEvent::new());

    // Target not shareable.
    let context = DragContext::new();
    let mut source = sized(DragList::with_config(
        config("cards", true, &["A"]),
        context.clone(),
        render,
    ));
    let mut target = sized(DragList::with_config(
        config("cards", false, &[]),
        context.clone(),
        render,
    ));
    grab_first(&mut source);
    target.on_drag_enter(&mut DragEnterEvent::new(Point::new(5.0, 5.0)));
    assert_eq!(source.value(), vec!["A".to_string()]);
    assert!(target.is_empty());
}

#[test]
fn transfer_refused_when_target_render_vetoes() {
    let context = DragContext::new();
    let mut source = sized(DragList::with_config(
        config("cards", true, &["A"]),
        context.clone(),
        render,
    ));
    let mut target = sized(DragList::with_config(
        config("cards", true, &[]),
        context.clone(),
        veto,
    ));

    grab_first(&mut source);
    target.on_drag_enter(&mut DragEnterEvent::new(Point::new(5.0, 5.0)));

    // Nothing moved anywhere.
    assert_eq!(source.value(), vec!["A".to_string()]);
    assert!(target.is_empty());
    assert_eq!(context.owner(), Some(draglist::Node::node_id(&source)));
}

#[test]
fn drag_end_after_transfer_clears_session_without_double_notification() {
    let context = DragContext::new();
    let mut source = sized(DragList::with_config(
        config("cards", true, &["A"]),
        context.clone(),
        render,
    ));
    let mut target = sized(DragList::with_config(
        config("cards", true, &[]),
        context.clone(),
        render,
    ));

    let source_changes = counter(&source);
    let target_changes = counter(&target);

    grab_first(&mut source);
    target.on_drag_enter(&mut DragEnterEvent::new(Point::new(5.0, 5.0)));

    // The gesture ends on the list where it started.
    source.on_drag_end(&mut DragEndEvent::new());

    assert!(!context.is_active());
    assert!(source.mirror_id().is_none());
    // Change already fired at transfer time; drag end adds nothing.
    assert_eq!(source_changes.load(Ordering::SeqCst), 1);
    assert_eq!(target_changes.load(Ordering::SeqCst), 1);
    // The transferred element's dragging marker is cleared through the
    // session's store handle even though the target never saw drag-end.
    assert!(target.with_items(|store| store.iter().all(|e| !e.element.is_dragging())));
}

#[test]
fn reorder_after_transfer_uses_new_owner() {
    let context = DragContext::new();
    let mut source = sized(DragList::with_config(
        config("cards", true, &["A"]),
        context.clone(),
        render,
    ));
    let mut target = sized(DragList::with_config(
        config("cards", true, &["X", "Y"]),
        context.clone(),
        render,
    ));

    grab_first(&mut source);
    // Enter below Y: A appended. Items: X 0-24, Y 24-48.
    target.on_drag_enter(&mut DragEnterEvent::new(Point::new(5.0, 40.0)));
    assert_eq!(
        target.value(),
        vec!["X".to_string(), "Y".to_string(), "A".to_string()]
    );

    // Subsequent drag-enters are evaluated against the new owner: moving A
    // to the upper half of X reorders within the target.
    target.on_drag_enter(&mut DragEnterEvent::new(Point::new(5.0, 6.0)));
    assert_eq!(
        target.value(),
        vec!["A".to_string(), "X".to_string(), "Y".to_string()]
    );
    assert!(source.is_empty());

    source.on_drag_end(&mut DragEndEvent::new());
    assert!(!context.is_active());
}
