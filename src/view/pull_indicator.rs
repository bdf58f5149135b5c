//! Pull-to-refresh indicator widget.
//!
//! Pure and stateless: built from the gesture tracker on every frame.

use crate::state::{GestureState, GestureTracker};
use crate::view::styles::Palette;
use crate::view_state::CellMetrics;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Indicator label below the threshold.
pub const PULL_LABEL: &str = "Pull to refresh";
/// Indicator label once releasing would refresh.
pub const RELEASE_LABEL: &str = "Release to refresh";
/// Indicator label while a refresh is in flight.
pub const REFRESHING_LABEL: &str = "Refreshing…";

/// Phase shown by the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorPhase {
    /// Dragging, below the threshold.
    Pulling,
    /// Dragging, at or past the threshold.
    Armed,
    /// Waiting for the refresh to settle.
    Refreshing,
}

impl IndicatorPhase {
    /// Label text for the phase.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pulling => PULL_LABEL,
            Self::Armed => RELEASE_LABEL,
            Self::Refreshing => REFRESHING_LABEL,
        }
    }
}

/// The indicator above the content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PullIndicator {
    phase: IndicatorPhase,
    rows: u16,
    progress: f64,
}

impl PullIndicator {
    /// Indicator for the tracker's state, or `None` when nothing is shown.
    ///
    /// The indicator is as tall as the pull distance in rows, and at least
    /// one row whenever it is visible.
    pub fn from_tracker(tracker: &GestureTracker, metrics: &CellMetrics) -> Option<Self> {
        let state = tracker.state();
        if !state.shows_indicator() {
            return None;
        }
        let phase = match state {
            GestureState::Refreshing => IndicatorPhase::Refreshing,
            _ if tracker.past_threshold() => IndicatorPhase::Armed,
            _ => IndicatorPhase::Pulling,
        };
        Some(Self {
            phase,
            rows: metrics.pull_to_rows(state.pull_distance()).max(1),
            progress: tracker.progress(),
        })
    }

    /// Current phase.
    pub fn phase(&self) -> IndicatorPhase {
        self.phase
    }

    /// Rows the content is pushed down by.
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Render into `area` with the palette's phase style.
    pub fn render(self, area: Rect, buf: &mut Buffer, palette: &Palette) {
        if area.height == 0 {
            return;
        }
        let style = match self.phase {
            IndicatorPhase::Pulling => palette.pulling,
            IndicatorPhase::Armed => palette.armed,
            IndicatorPhase::Refreshing => palette.refreshing,
        };
        let label = self.phase.label();
        let mut spans = vec![Span::styled(label, style)];
        if self.phase != IndicatorPhase::Refreshing {
            let percent = format!(" {}%", (self.progress * 100.0).round() as u16);
            // Percentage is dropped first on narrow panes.
            if label.width() + percent.width() <= usize::from(area.width) {
                spans.push(Span::styled(percent, palette.muted));
            }
        }

        // Label sits on the last row, right above the content.
        let label_row = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(label_row, buf);
    }
}
