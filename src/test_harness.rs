//! Acceptance Test Harness for TUI testing
//!
//! Wraps TuiApp<TestBackend> with methods that simulate terminal input:
//! keys, mouse drags (touch gestures), resizes and timer ticks.

use crate::model::FeedItem;
use crate::state::{LayoutContainer, RefreshSettled};
use crate::view::{CliArgs, ColorConfig, TuiApp, TuiError};
use crate::view_state::ViewKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::time::{Duration, Instant};

/// How long `settle` waits for a worker-thread refresh.
const SETTLE_TIMEOUT: Duration = Duration::from_secs(5);

/// Convert a ratatui buffer to a string representation.
///
/// Empty trailing lines are removed to keep output readable.
fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        lines.push(line.trim_end().to_string());
    }

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Test harness for acceptance testing
pub struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    running: bool,
}

impl AcceptanceTestHarness {
    /// Harness with the given items in a `width` x `height` terminal.
    ///
    /// Refreshes complete immediately on their worker thread.
    pub fn with_feed(feed: Vec<FeedItem>, width: u16, height: u16) -> Result<Self, TuiError> {
        let mut args = CliArgs::new(feed);
        args.refresh_delay = Duration::ZERO;
        args.colors = ColorConfig::fixed(false);
        Self::with_args(args, width, height)
    }

    /// Harness with explicit startup settings.
    pub fn with_args(args: CliArgs, width: u16, height: u16) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let app = TuiApp::new_for_test(terminal, args)?;
        Ok(Self { app, running: true })
    }

    /// Send a single key event. Returns true if the app quit.
    pub fn send_key(&mut self, key: KeyCode) -> bool {
        self.send_key_with_mods(key, KeyModifiers::NONE)
    }

    /// Send key with modifiers (e.g., Ctrl+C). Returns true if the app quit.
    pub fn send_key_with_mods(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
        if !self.running {
            return true;
        }

        let quit = self.app.handle_key_test(KeyEvent::new(key, mods));
        if quit {
            self.running = false;
        }
        quit
    }

    fn mouse(&mut self, kind: MouseEventKind, row: u16) {
        if !self.running {
            return;
        }
        self.app.handle_mouse_test(MouseEvent {
            kind,
            column: 10,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// Press the left button at `row` (touch start).
    pub fn mouse_down(&mut self, row: u16) {
        self.mouse(MouseEventKind::Down(MouseButton::Left), row);
    }

    /// Drag with the left button to `row` (touch move).
    pub fn drag_to(&mut self, row: u16) {
        self.mouse(MouseEventKind::Drag(MouseButton::Left), row);
    }

    /// Release the left button at `row` (touch end).
    pub fn mouse_up(&mut self, row: u16) {
        self.mouse(MouseEventKind::Up(MouseButton::Left), row);
    }

    /// Full pull gesture from `from_row` to `to_row`.
    pub fn pull(&mut self, from_row: u16, to_row: u16) {
        self.mouse_down(from_row);
        self.drag_to(to_row);
        self.mouse_up(to_row);
    }

    /// Scroll the wheel down once.
    pub fn wheel_down(&mut self) {
        self.mouse(MouseEventKind::ScrollDown, 5);
    }

    /// Resize the terminal.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.app.terminal_mut().backend_mut().resize(width, height);
        self.app.handle_resize_test(width, height);
    }

    /// Run one timer tick. Returns true if a refresh settled.
    pub fn tick(&mut self) -> bool {
        self.app.tick_test()
    }

    /// Tick until the in-flight refresh settles.
    ///
    /// # Panics
    /// Panics if nothing settles within the timeout.
    pub fn settle(&mut self) -> RefreshSettled {
        let deadline = Instant::now() + SETTLE_TIMEOUT;
        while !self.tick() {
            assert!(Instant::now() < deadline, "refresh did not settle in time");
            std::thread::sleep(Duration::from_millis(2));
        }
        self.app
            .last_refresh()
            .cloned()
            .expect("tick reported a settled refresh")
    }

    /// Unmount the container.
    pub fn unmount(&mut self) {
        self.app.shutdown_test();
    }

    /// The container, for state assertions.
    pub fn container(&self) -> &LayoutContainer {
        self.app.container()
    }

    /// Current items.
    pub fn feed(&self) -> &[FeedItem] {
        self.app.feed()
    }

    /// Active view.
    pub fn view(&self) -> ViewKind {
        self.app.view()
    }

    /// Selected item.
    pub fn selected(&self) -> Option<usize> {
        self.app.selected()
    }

    /// First visible row.
    pub fn scroll_rows(&self) -> usize {
        self.app.scroll_rows()
    }

    /// Window and root listener counts.
    pub fn listener_counts(&self) -> (usize, usize) {
        self.app.listener_counts()
    }

    /// Check if app is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Render the current frame to a string
    ///
    /// # Panics
    /// Panics if rendering fails (should never happen with TestBackend)
    pub fn render_to_string(&mut self) -> String {
        self.app
            .render_test()
            .expect("Rendering should succeed in test harness");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
