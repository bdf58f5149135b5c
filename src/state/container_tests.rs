//! Tests for the layout container.
//!
//! Tests verify:
//! - listener attachment and exact teardown
//! - gesture gating (enabled flag, layout mode, scroll position, root presence)
//! - refresh lifecycle for sync, async and missing handlers
//! - swallowed failures reach the observer only

use super::*;
use crate::model::StaticViewport;
use crate::state::refresh::RefreshCall;
use futures::channel::oneshot;
use futures::FutureExt;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Tablet-portrait viewport scrolled to the top.
fn tablet() -> StaticViewport {
    StaticViewport::new(800, 1100)
}

/// Mounted container with a counting synchronous handler.
fn mounted_with_counter(
    provider: &StaticViewport,
    window: &mut ListenerRegistry,
    root: &mut ListenerRegistry,
) -> (LayoutContainer, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let mut container = LayoutContainer::new(ContainerOptions::default(), provider)
        .with_refresh_handler(move || {
            counter.set(counter.get() + 1);
            RefreshCall::done()
        });
    container.mount(window, Some(root));
    (container, calls)
}

fn pull(container: &mut LayoutContainer, provider: &StaticViewport, to: f64) -> GestureOutcome {
    container.on_touch(TouchEvent::Start { client_y: 0.0 }, provider);
    container.on_touch(TouchEvent::Move { client_y: to }, provider);
    container.on_touch(TouchEvent::End, provider)
}

// ===== Listeners =====

#[test]
fn mount_attaches_resize_and_touch_listeners() {
    let provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let (container, _) = mounted_with_counter(&provider, &mut window, &mut root);

    assert!(container.is_mounted());
    assert_eq!(window.count(ListenerKind::Resize), 1);
    for kind in ListenerKind::TOUCH {
        assert_eq!(root.count(kind), 1, "{kind:?} should be attached");
    }
}

#[test]
fn unmount_removes_exactly_what_was_added() {
    let provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    // Foreign listeners must survive teardown.
    window.add(ListenerKind::Resize);
    root.add(ListenerKind::TouchStart);
    let (window_before, root_before) = (window.len(), root.len());

    let (mut container, _) = mounted_with_counter(&provider, &mut window, &mut root);
    assert_eq!(window.len(), window_before + 1);
    assert_eq!(root.len(), root_before + 4);

    container.unmount(&mut window, Some(&mut root));
    assert_eq!(window.len(), window_before);
    assert_eq!(root.len(), root_before);
    assert!(!container.is_mounted());

    // Second unmount removes nothing more.
    container.unmount(&mut window, Some(&mut root));
    assert_eq!(window.len(), window_before);
    assert_eq!(root.len(), root_before);
}

#[test]
fn double_mount_does_not_duplicate_listeners() {
    let provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let (mut container, _) = mounted_with_counter(&provider, &mut window, &mut root);
    container.mount(&mut window, Some(&mut root));

    assert_eq!(window.len(), 1);
    assert_eq!(root.len(), 4);
}

#[test]
fn disabled_container_attaches_no_touch_listeners() {
    let provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let options = ContainerOptions {
        enable_pull_to_refresh: false,
        ..ContainerOptions::default()
    };
    let mut container = LayoutContainer::new(options, &provider);
    container.mount(&mut window, Some(&mut root));

    assert!(root.is_empty());
    assert_eq!(
        container.on_touch(TouchEvent::Start { client_y: 0.0 }, &provider),
        GestureOutcome::Ignored
    );
}

#[test]
fn missing_root_is_a_silent_noop() {
    let provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut container = LayoutContainer::new(ContainerOptions::default(), &provider);
    container.mount(&mut window, None);

    assert_eq!(window.len(), 1);
    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::Ignored);
    container.unmount(&mut window, None);
    assert!(window.is_empty());
}

#[test]
fn toggling_pull_to_refresh_attaches_and_detaches() {
    let provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let (mut container, calls) = mounted_with_counter(&provider, &mut window, &mut root);

    container.set_pull_to_refresh(false, Some(&mut root));
    assert!(root.is_empty());
    assert!(!container.pull_to_refresh_enabled());
    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::Ignored);

    container.set_pull_to_refresh(true, Some(&mut root));
    assert_eq!(root.len(), 4);
    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::RefreshRequested);
    assert_eq!(calls.get(), 1);
}

// ===== Gesture gating =====

#[test]
fn unmounted_container_ignores_touches() {
    let provider = tablet();
    let mut container = LayoutContainer::new(ContainerOptions::default(), &provider);
    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::Ignored);
}

#[test]
fn desktop_mode_ignores_gestures() {
    let provider = StaticViewport::new(1280, 800);
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let (mut container, calls) = mounted_with_counter(&provider, &mut window, &mut root);

    assert_eq!(container.mode(), LayoutMode::Desktop);
    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::Ignored);
    assert_eq!(calls.get(), 0);
}

#[test]
fn mobile_mode_accepts_gestures() {
    let provider = StaticViewport::new(400, 800);
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let (mut container, calls) = mounted_with_counter(&provider, &mut window, &mut root);

    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::RefreshRequested);
    assert_eq!(calls.get(), 1);
}

#[test]
fn scrolled_page_blocks_gesture() {
    let mut provider = tablet();
    provider.set_scroll_y(32.0);
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let (mut container, calls) = mounted_with_counter(&provider, &mut window, &mut root);

    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::Ignored);
    assert_eq!(container.pull_distance(), 0.0);
    assert_eq!(calls.get(), 0);
}

#[test]
fn resize_updates_mode_and_params() {
    let mut provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let (mut container, _) = mounted_with_counter(&provider, &mut window, &mut root);
    assert_eq!(container.params().grid.columns, 2);

    provider.set_size(400, 800);
    assert_eq!(container.on_resize(&provider), Some(LayoutMode::Mobile));
    assert_eq!(container.params().grid.columns, 1);
    assert_eq!(container.sidebar(), None);
    assert!(!container.facets().is_tablet);
}

// ===== Refresh lifecycle =====

#[test]
fn synchronous_refresh_settles_and_reports_on_tick() {
    let provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let (mut container, calls) = mounted_with_counter(&provider, &mut window, &mut root);

    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::RefreshRequested);
    assert_eq!(calls.get(), 1);
    assert!(!container.is_refreshing());
    assert_eq!(container.tick(), Some(RefreshSettled::Succeeded));
    assert_eq!(container.tick(), None);
}

#[test]
fn below_threshold_never_calls_handler() {
    let provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let (mut container, calls) = mounted_with_counter(&provider, &mut window, &mut root);

    assert_eq!(pull(&mut container, &provider, 50.0), GestureOutcome::Released);
    assert_eq!(calls.get(), 0);
    assert_eq!(container.tick(), None);
}

#[test]
fn missing_handler_is_not_an_error() {
    let provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let mut container = LayoutContainer::new(ContainerOptions::default(), &provider);
    container.mount(&mut window, Some(&mut root));

    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::RefreshRequested);
    assert_eq!(container.gesture_state(), GestureState::Idle);
    assert_eq!(container.tick(), Some(RefreshSettled::Succeeded));
}

#[test]
fn async_refresh_blocks_new_gestures_until_settled() {
    let provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let senders = Rc::new(RefCell::new(Vec::new()));
    let handler_senders = Rc::clone(&senders);
    let mut container = LayoutContainer::new(ContainerOptions::default(), &provider)
        .with_refresh_handler(move || {
            let (tx, rx) = oneshot::channel::<Result<(), RefreshError>>();
            handler_senders.borrow_mut().push(tx);
            RefreshCall::pending(rx.map(|r| r.unwrap_or(Err(RefreshError::Abandoned))))
        });
    container.mount(&mut window, Some(&mut root));

    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::RefreshRequested);
    assert!(container.is_refreshing());
    assert_eq!(container.tick(), None);

    // Overlapping gesture is ignored and does not call the handler again.
    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::Ignored);
    assert_eq!(senders.borrow().len(), 1);
    assert!(!container.request_refresh());

    let tx = senders.borrow_mut().pop().unwrap();
    tx.send(Ok(())).unwrap();
    assert_eq!(container.tick(), Some(RefreshSettled::Succeeded));
    assert!(!container.is_refreshing());
    assert_eq!(container.pull_distance(), 0.0);
}

#[test]
fn rejected_refresh_is_swallowed_and_observed() {
    let provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let observed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&observed);
    let mut container = LayoutContainer::new(ContainerOptions::default(), &provider)
        .with_refresh_handler(|| RefreshCall::Settled(Err(RefreshError::Failed("503".into()))))
        .with_error_observer(move |err| sink.borrow_mut().push(err.clone()));
    container.mount(&mut window, Some(&mut root));

    pull(&mut container, &provider, 150.0);
    assert_eq!(
        container.tick(),
        Some(RefreshSettled::Failed(RefreshError::Failed("503".into())))
    );
    assert_eq!(*observed.borrow(), vec![RefreshError::Failed("503".into())]);
    assert_eq!(container.gesture_state(), GestureState::Idle);

    // The tracker is re-armed after a failure.
    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::RefreshRequested);
}

#[test]
fn panicking_handler_is_abandoned_and_rearms() {
    let provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let observed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&observed);
    let mut container = LayoutContainer::new(ContainerOptions::default(), &provider)
        .with_refresh_handler(|| -> RefreshCall { panic!("handler exploded") })
        .with_error_observer(move |err| sink.borrow_mut().push(err.clone()));
    container.mount(&mut window, Some(&mut root));

    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::RefreshRequested);
    assert_eq!(
        container.tick(),
        Some(RefreshSettled::Failed(RefreshError::Abandoned))
    );
    assert_eq!(*observed.borrow(), vec![RefreshError::Abandoned]);
    assert_eq!(container.gesture_state(), GestureState::Idle);
    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::RefreshRequested);
}

#[test]
fn toggle_off_without_root_keeps_ids_for_unmount() {
    let provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let (mut container, _calls) = mounted_with_counter(&provider, &mut window, &mut root);

    container.set_pull_to_refresh(false, None);
    assert!(!container.pull_to_refresh_enabled());
    assert_eq!(pull(&mut container, &provider, 150.0), GestureOutcome::Ignored);

    container.unmount(&mut window, Some(&mut root));
    assert!(root.is_empty());
    assert!(window.is_empty());
}

#[test]
fn refresh_settling_after_unmount_is_ignored() {
    let provider = tablet();
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let sender = Rc::new(RefCell::new(None));
    let handler_sender = Rc::clone(&sender);
    let mut container = LayoutContainer::new(ContainerOptions::default(), &provider)
        .with_refresh_handler(move || {
            let (tx, rx) = oneshot::channel::<Result<(), RefreshError>>();
            *handler_sender.borrow_mut() = Some(tx);
            RefreshCall::pending(rx.map(|r| r.unwrap_or(Err(RefreshError::Abandoned))))
        });
    container.mount(&mut window, Some(&mut root));
    pull(&mut container, &provider, 150.0);

    container.unmount(&mut window, Some(&mut root));
    let tx = sender.borrow_mut().take().unwrap();
    // Receiver was dropped with the pending refresh.
    assert!(tx.send(Ok(())).is_err());
    assert_eq!(container.tick(), None);
    assert_eq!(container.gesture_state(), GestureState::Idle);
}

#[test]
fn request_refresh_runs_handler_without_gesture() {
    let provider = StaticViewport::new(1280, 800);
    let mut window = ListenerRegistry::new();
    let mut root = ListenerRegistry::new();
    let (mut container, calls) = mounted_with_counter(&provider, &mut window, &mut root);

    assert!(container.request_refresh());
    assert_eq!(calls.get(), 1);
    assert_eq!(container.tick(), Some(RefreshSettled::Succeeded));
}
