//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for the numeric values the shell lays out with.

use std::time::Duration;

/// Height of the header bar in lines.
pub const HEADER_HEIGHT: u16 = 1;

/// Height of the status bar in lines.
///
/// Single line for refresh status and keyboard hints.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of one grid card in lines (border + title + detail).
pub const GRID_CARD_HEIGHT: u16 = 4;

/// Event poll timeout. In-flight refreshes are polled at this rate.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Width used when the terminal reports zero columns.
pub const FALLBACK_WIDTH: u16 = 80;
