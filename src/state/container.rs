//! Responsive layout container.
//!
//! Wires the resolver, the gesture tracker and the refresh handler together
//! and owns the listener subscriptions. The resolver and the tracker share no
//! state; the container only consults the resolved mode when a gesture starts.

use crate::model::{Breakpoints, DeviceFacets, LayoutMode, RefreshError, ViewportProvider};
use crate::state::gesture::{GestureOutcome, GestureState, GestureTracker, PullConfig, TouchEvent};
use crate::state::listeners::{ListenerId, ListenerKind, ListenerRegistry};
use crate::state::refresh::{ErrorObserver, PendingRefresh, RefreshCall, RefreshHandler};
use crate::state::resolver::OrientationResolver;
use crate::view_state::layout_params::{LayoutParams, SidebarParams, render_for_mode};
use std::panic::{self, AssertUnwindSafe};
use std::task::Poll;
use tracing::{debug, info, warn};

/// Construction options for [`LayoutContainer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerOptions {
    /// Whether pull-to-refresh listeners are attached.
    pub enable_pull_to_refresh: bool,
    /// Pull distances.
    pub pull: PullConfig,
    /// Width breakpoints.
    pub breakpoints: Breakpoints,
}

impl Default for ContainerOptions {
    fn default() -> Self {
        Self {
            enable_pull_to_refresh: true,
            pull: PullConfig::DEFAULT,
            breakpoints: Breakpoints::DEFAULT,
        }
    }
}

/// How a refresh ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshSettled {
    /// The handler reported success (or there was no handler).
    Succeeded,
    /// The handler failed; the error was swallowed after notifying the observer.
    Failed(RefreshError),
}

/// Layout container with pull-to-refresh.
pub struct LayoutContainer {
    options: ContainerOptions,
    resolver: OrientationResolver,
    tracker: GestureTracker,
    handler: Option<Box<dyn RefreshHandler>>,
    observer: Option<ErrorObserver>,
    pending: Option<PendingRefresh>,
    /// Synchronously settled refresh not yet reported by `tick`.
    settled: Option<RefreshSettled>,
    mounted: bool,
    window_listeners: Vec<ListenerId>,
    root_listeners: Vec<ListenerId>,
}

impl LayoutContainer {
    /// Create an unmounted container.
    pub fn new(options: ContainerOptions, provider: &dyn ViewportProvider) -> Self {
        Self {
            options,
            resolver: OrientationResolver::new(options.breakpoints, provider),
            tracker: GestureTracker::new(options.pull),
            handler: None,
            observer: None,
            pending: None,
            settled: None,
            mounted: false,
            window_listeners: Vec::new(),
            root_listeners: Vec::new(),
        }
    }

    /// Set the action invoked on a completed pull.
    pub fn with_refresh_handler(mut self, handler: impl RefreshHandler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Set the hook notified of swallowed refresh failures.
    pub fn with_error_observer(mut self, observer: impl FnMut(&RefreshError) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Attach listeners: resize on the window, touch on the root element.
    ///
    /// A missing root is not an error; gestures are simply never delivered.
    /// Mounting twice is a no-op.
    pub fn mount(&mut self, window: &mut ListenerRegistry, root: Option<&mut ListenerRegistry>) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.window_listeners.push(window.add(ListenerKind::Resize));
        if self.options.enable_pull_to_refresh {
            self.attach_touch(root);
        }
        debug!(
            window = self.window_listeners.len(),
            root = self.root_listeners.len(),
            "container mounted"
        );
    }

    /// Remove exactly the listeners this container added and drop any
    /// in-flight refresh. Safe to call repeatedly.
    pub fn unmount(&mut self, window: &mut ListenerRegistry, root: Option<&mut ListenerRegistry>) {
        for id in self.window_listeners.drain(..) {
            window.remove(id);
        }
        self.detach_touch(root);
        if self.pending.take().is_some() {
            debug!("dropping in-flight refresh on unmount");
        }
        self.settled = None;
        self.tracker.reset();
        self.mounted = false;
    }

    /// Enable or disable pull-to-refresh, attaching or detaching touch listeners.
    pub fn set_pull_to_refresh(&mut self, enabled: bool, root: Option<&mut ListenerRegistry>) {
        if self.options.enable_pull_to_refresh == enabled {
            return;
        }
        self.options.enable_pull_to_refresh = enabled;
        if !self.mounted {
            return;
        }
        if enabled {
            self.attach_touch(root);
        } else {
            self.detach_touch(root);
            if !self.tracker.state().is_refreshing() {
                self.tracker.reset();
            }
        }
        info!(enabled, "pull-to-refresh toggled");
    }

    fn attach_touch(&mut self, root: Option<&mut ListenerRegistry>) {
        let Some(root) = root else {
            debug!("no root target; touch listeners not attached");
            return;
        };
        if !self.root_listeners.is_empty() {
            return;
        }
        self.root_listeners = ListenerKind::TOUCH.iter().map(|kind| root.add(*kind)).collect();
    }

    /// Ids are only forgotten once removed; without the registry they are
    /// kept so a later detach or unmount can still remove them.
    fn detach_touch(&mut self, root: Option<&mut ListenerRegistry>) {
        let Some(root) = root else {
            if !self.root_listeners.is_empty() {
                debug!(
                    held = self.root_listeners.len(),
                    "no root target; touch listeners kept for a later detach"
                );
            }
            return;
        };
        for id in self.root_listeners.drain(..) {
            root.remove(id);
        }
    }

    /// Viewport changed. Returns the new mode if it changed.
    pub fn on_resize(&mut self, provider: &dyn ViewportProvider) -> Option<LayoutMode> {
        if !self.mounted {
            return None;
        }
        self.resolver.update(provider)
    }

    /// Feed a touch event.
    ///
    /// Gestures only start while mounted, enabled, and in a touch-class mode;
    /// the page scroll offset comes from `provider`.
    pub fn on_touch(&mut self, event: TouchEvent, provider: &dyn ViewportProvider) -> GestureOutcome {
        if !self.touch_active() {
            return GestureOutcome::Ignored;
        }
        if matches!(event, TouchEvent::Start { .. }) && !self.resolver.mode().accepts_gestures() {
            return GestureOutcome::Ignored;
        }

        let outcome = self.tracker.handle(event, provider.scroll_y());
        if outcome == GestureOutcome::RefreshRequested {
            self.run_refresh();
        }
        outcome
    }

    /// Start a refresh without a gesture. Returns false if one is in flight.
    pub fn request_refresh(&mut self) -> bool {
        if !self.mounted || !self.tracker.begin_refresh() {
            return false;
        }
        self.run_refresh();
        true
    }

    fn touch_active(&self) -> bool {
        self.mounted && self.options.enable_pull_to_refresh && !self.root_listeners.is_empty()
    }

    fn run_refresh(&mut self) {
        let Some(handler) = self.handler.as_mut() else {
            debug!("no refresh handler; settling immediately");
            self.settled = Some(self.finish_refresh(Ok(())));
            return;
        };

        info!("refresh started");
        let call = panic::catch_unwind(AssertUnwindSafe(|| handler.on_refresh()))
            .unwrap_or_else(|_| {
                warn!("refresh handler panicked");
                RefreshCall::Settled(Err(RefreshError::Abandoned))
            });
        match call {
            RefreshCall::Settled(result) => {
                self.settled = Some(self.finish_refresh(result));
            }
            RefreshCall::Pending(future) => {
                self.pending = Some(PendingRefresh::new(future));
            }
        }
    }

    /// Poll the in-flight refresh once. Returns how it ended, if it ended
    /// since the last tick.
    pub fn tick(&mut self) -> Option<RefreshSettled> {
        if !self.mounted {
            self.pending = None;
            self.settled = None;
            return None;
        }
        if let Some(settled) = self.settled.take() {
            return Some(settled);
        }
        let pending = self.pending.as_mut()?;
        match pending.poll() {
            Poll::Pending => None,
            Poll::Ready(result) => {
                self.pending = None;
                Some(self.finish_refresh(result))
            }
        }
    }

    fn finish_refresh(&mut self, result: Result<(), RefreshError>) -> RefreshSettled {
        self.tracker.settle();
        match result {
            Ok(()) => {
                info!("refresh settled");
                RefreshSettled::Succeeded
            }
            Err(err) => {
                warn!(error = %err, "refresh failed; ignoring");
                if let Some(observer) = self.observer.as_mut() {
                    observer(&err);
                }
                RefreshSettled::Failed(err)
            }
        }
    }

    /// Whether listeners are attached.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether pull-to-refresh is enabled.
    pub fn pull_to_refresh_enabled(&self) -> bool {
        self.options.enable_pull_to_refresh
    }

    /// Gesture tracker, for rendering the indicator.
    pub fn gesture(&self) -> &GestureTracker {
        &self.tracker
    }

    /// Current gesture state.
    pub fn gesture_state(&self) -> GestureState {
        self.tracker.state()
    }

    /// Current pull offset in px.
    pub fn pull_distance(&self) -> f64 {
        self.tracker.state().pull_distance()
    }

    /// Whether a refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.tracker.state().is_refreshing()
    }

    /// Current device facets.
    pub fn facets(&self) -> DeviceFacets {
        self.resolver.facets()
    }

    /// Current mode.
    pub fn mode(&self) -> LayoutMode {
        self.resolver.mode()
    }

    /// Structural parameters for the current mode.
    pub fn params(&self) -> LayoutParams {
        LayoutParams::for_mode(self.resolver.mode())
    }

    /// Sidebar for the current mode; `None` on mobile.
    pub fn sidebar(&self) -> Option<SidebarParams> {
        render_for_mode(self.resolver.mode())
    }
}

impl std::fmt::Debug for LayoutContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutContainer")
            .field("options", &self.options)
            .field("resolver", &self.resolver)
            .field("tracker", &self.tracker)
            .field("has_handler", &self.handler.is_some())
            .field("pending", &self.pending.is_some())
            .field("mounted", &self.mounted)
            .finish()
    }
}

#[cfg(test)]
#[path = "container_tests.rs"]
mod tests;
