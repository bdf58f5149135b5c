//! Pull-to-refresh gesture state machine.
//!
//! Pure: the tracker never invokes the refresh action itself. Releasing past
//! the threshold yields [`GestureOutcome::RefreshRequested`] and leaves the
//! tracker in [`GestureState::Refreshing`] until [`GestureTracker::settle`]
//! is called by whoever owns the refresh.
//!
//! ```text
//! Idle --start(scroll_y == 0)--> Tracking --end(pull >= threshold)--> Refreshing
//!  ^                                |                                    |
//!  +------end(pull < threshold)-----+                                    |
//!  +-----------------------------settle----------------------------------+
//! ```

use tracing::debug;

/// Error returned for pull settings that can never trigger a refresh.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum InvalidPullConfig {
    /// A distance was zero, negative, or not finite.
    #[error("pull distances must be positive and finite (max_pull={max_pull}, threshold={threshold})")]
    NonPositive {
        /// Requested maximum pull.
        max_pull: f64,
        /// Requested threshold.
        threshold: f64,
    },

    /// The threshold sits beyond the clamp, so it is unreachable.
    #[error("refresh threshold {threshold}px exceeds max pull {max_pull}px")]
    UnreachableThreshold {
        /// Requested maximum pull.
        max_pull: f64,
        /// Requested threshold.
        threshold: f64,
    },
}

/// Pull distances in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullConfig {
    max_pull: f64,
    refresh_threshold: f64,
}

impl PullConfig {
    /// 100px clamp, 80px threshold.
    pub const DEFAULT: Self = Self {
        max_pull: 100.0,
        refresh_threshold: 80.0,
    };

    /// Smart constructor; the threshold must be reachable (`0 < threshold <= max_pull`).
    pub fn new(max_pull: f64, refresh_threshold: f64) -> Result<Self, InvalidPullConfig> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(max_pull) || !positive(refresh_threshold) {
            return Err(InvalidPullConfig::NonPositive {
                max_pull,
                threshold: refresh_threshold,
            });
        }
        if refresh_threshold > max_pull {
            return Err(InvalidPullConfig::UnreachableThreshold {
                max_pull,
                threshold: refresh_threshold,
            });
        }
        Ok(Self {
            max_pull,
            refresh_threshold,
        })
    }

    /// Maximum rendered pull offset.
    pub fn max_pull(&self) -> f64 {
        self.max_pull
    }

    /// Minimum pull at release that triggers a refresh.
    pub fn refresh_threshold(&self) -> f64 {
        self.refresh_threshold
    }

    /// Clamp a raw drag delta into `[0, max_pull]`. Upward or NaN deltas give 0.
    pub fn clamp(&self, delta: f64) -> f64 {
        if delta > 0.0 {
            delta.min(self.max_pull)
        } else {
            0.0
        }
    }
}

impl Default for PullConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Touch input, in viewport px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    /// Finger down.
    Start {
        /// Vertical position.
        client_y: f64,
    },
    /// Finger moved.
    Move {
        /// Vertical position.
        client_y: f64,
    },
    /// Finger lifted.
    End,
    /// The platform aborted the gesture.
    Cancel,
}

/// Where the tracker is in a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No active gesture.
    #[default]
    Idle,
    /// Finger down at the top of the page.
    Tracking {
        /// Where the gesture began.
        start_y: f64,
        /// Clamped pull distance, `0..=max_pull`.
        pull_distance: f64,
    },
    /// Released past the threshold; waiting for the refresh to settle.
    Refreshing,
}

impl GestureState {
    /// Current pull offset; 0 outside of tracking.
    pub fn pull_distance(&self) -> f64 {
        match self {
            Self::Tracking { pull_distance, .. } => *pull_distance,
            Self::Idle | Self::Refreshing => 0.0,
        }
    }

    /// Whether a refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        matches!(self, Self::Refreshing)
    }

    /// Whether the pull indicator should be in the render tree.
    pub fn shows_indicator(&self) -> bool {
        match self {
            Self::Tracking { pull_distance, .. } => *pull_distance > 0.0,
            Self::Refreshing => true,
            Self::Idle => false,
        }
    }
}

/// Effect of feeding one event to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    /// The event did not change anything.
    Ignored,
    /// Tracking, with the updated pull distance.
    Pulled {
        /// Clamped pull distance.
        pull_distance: f64,
    },
    /// Gesture ended without a refresh.
    Released,
    /// Gesture ended past the threshold; the owner must run the refresh.
    RefreshRequested,
}

/// Converts touch drags into a pull distance and refresh requests.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    config: PullConfig,
    state: GestureState,
}

impl GestureTracker {
    /// Create an idle tracker.
    pub fn new(config: PullConfig) -> Self {
        Self {
            config,
            state: GestureState::Idle,
        }
    }

    /// Pull settings.
    pub fn config(&self) -> &PullConfig {
        &self.config
    }

    /// Current state.
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Indicator progress toward the threshold, `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        match self.state {
            GestureState::Refreshing => 1.0,
            _ => (self.state.pull_distance() / self.config.refresh_threshold).min(1.0),
        }
    }

    /// Whether releasing now would trigger a refresh.
    pub fn past_threshold(&self) -> bool {
        matches!(self.state, GestureState::Tracking { pull_distance, .. }
            if pull_distance >= self.config.refresh_threshold)
    }

    /// Feed one touch event.
    ///
    /// `scroll_y` is the page scroll offset; it only matters for
    /// [`TouchEvent::Start`], which is ignored unless the page is at the top.
    /// New gestures are ignored while a refresh is in flight.
    pub fn handle(&mut self, event: TouchEvent, scroll_y: f64) -> GestureOutcome {
        match (self.state, event) {
            (GestureState::Refreshing, _) => GestureOutcome::Ignored,

            (_, TouchEvent::Start { client_y }) => {
                if scroll_y > 0.0 {
                    debug!(scroll_y, "touch start ignored: page is scrolled");
                    self.state = GestureState::Idle;
                    return GestureOutcome::Ignored;
                }
                self.state = GestureState::Tracking {
                    start_y: client_y,
                    pull_distance: 0.0,
                };
                GestureOutcome::Pulled { pull_distance: 0.0 }
            }

            (GestureState::Tracking { start_y, .. }, TouchEvent::Move { client_y }) => {
                let pull_distance = self.config.clamp(client_y - start_y);
                self.state = GestureState::Tracking {
                    start_y,
                    pull_distance,
                };
                GestureOutcome::Pulled { pull_distance }
            }

            (GestureState::Tracking { pull_distance, .. }, TouchEvent::End) => {
                if pull_distance >= self.config.refresh_threshold {
                    debug!(pull_distance, "pull released past threshold");
                    self.state = GestureState::Refreshing;
                    GestureOutcome::RefreshRequested
                } else {
                    self.state = GestureState::Idle;
                    GestureOutcome::Released
                }
            }

            (GestureState::Tracking { .. }, TouchEvent::Cancel) => {
                self.state = GestureState::Idle;
                GestureOutcome::Released
            }

            (GestureState::Idle, _) => GestureOutcome::Ignored,
        }
    }

    /// Enter `Refreshing` without a gesture. Returns false if already refreshing.
    pub fn begin_refresh(&mut self) -> bool {
        if self.state.is_refreshing() {
            return false;
        }
        self.state = GestureState::Refreshing;
        true
    }

    /// Leave `Refreshing` after the refresh settled. Returns false if not refreshing.
    pub fn settle(&mut self) -> bool {
        if !self.state.is_refreshing() {
            return false;
        }
        self.state = GestureState::Idle;
        true
    }

    /// Drop any in-progress gesture (used on teardown).
    pub fn reset(&mut self) {
        self.state = GestureState::Idle;
    }
}

#[cfg(test)]
#[path = "gesture_tests.rs"]
mod tests;
