//! Event listener registry.
//!
//! Stands in for a DOM event target: the shell only dispatches an event kind
//! to the container while a listener for it is registered, and tests count
//! listeners before and after teardown.

use crate::state::gesture::TouchEvent;

/// Event kinds the container subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Finger down.
    TouchStart,
    /// Finger moved.
    TouchMove,
    /// Finger lifted.
    TouchEnd,
    /// Gesture aborted by the platform.
    TouchCancel,
    /// Viewport resized or rotated.
    Resize,
}

impl ListenerKind {
    /// Kinds attached to the layout root for pull-to-refresh.
    pub const TOUCH: [ListenerKind; 4] = [
        ListenerKind::TouchStart,
        ListenerKind::TouchMove,
        ListenerKind::TouchEnd,
        ListenerKind::TouchCancel,
    ];

    /// Listener kind that receives `event`.
    pub fn for_touch(event: &TouchEvent) -> Self {
        match event {
            TouchEvent::Start { .. } => Self::TouchStart,
            TouchEvent::Move { .. } => Self::TouchMove,
            TouchEvent::End => Self::TouchEnd,
            TouchEvent::Cancel => Self::TouchCancel,
        }
    }
}

/// Handle returned by [`ListenerRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registered listeners on one event target.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(ListenerId, ListenerKind)>,
}

impl ListenerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn add(&mut self, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, kind));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Number of listeners of `kind`.
    pub fn count(&self, kind: ListenerKind) -> usize {
        self.listeners.iter().filter(|(_, k)| *k == kind).count()
    }

    /// Whether any listener of `kind` is registered.
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.count(kind) > 0
    }

    /// Total number of listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// No listeners registered.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
