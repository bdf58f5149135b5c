//! Domain-level keyboard actions independent of key bindings.

/// Actions that can be mapped to key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application. Default: q
    Quit,

    // Scrolling
    /// Scroll content up by one row. Default: k/↑
    ScrollUp,
    /// Scroll content down by one row. Default: j/↓
    ScrollDown,
    /// Jump back to the top, re-arming pull-to-refresh. Default: g/Home
    ScrollToTop,

    // Selection (split view)
    /// Select the next item. Default: n
    SelectNext,
    /// Select the previous item. Default: N
    SelectPrev,
    /// Clear the selection. Default: Esc
    ClearSelection,

    // Container
    /// Cycle grid → list → split. Default: v
    CycleView,
    /// Enable or disable pull-to-refresh. Default: p
    TogglePullToRefresh,
    /// Make the next refresh fail, to exercise the swallow policy. Default: x
    FailNextRefresh,
    /// Trigger a refresh without a gesture. Default: r
    Refresh,
}
