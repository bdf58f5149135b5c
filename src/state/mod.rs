//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod container;
pub mod gesture;
pub mod listeners;
pub mod refresh;
pub mod resolver;

// Re-export for convenience
pub use container::{ContainerOptions, LayoutContainer, RefreshSettled};
pub use gesture::{
    GestureOutcome, GestureState, GestureTracker, InvalidPullConfig, PullConfig, TouchEvent,
};
pub use listeners::{ListenerId, ListenerKind, ListenerRegistry};
pub use refresh::{ErrorObserver, PendingRefresh, RefreshCall, RefreshHandler, spawn_refresh};
pub use resolver::OrientationResolver;
