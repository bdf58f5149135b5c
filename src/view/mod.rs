//! TUI rendering and terminal management (impure shell)
//!
//! Maps terminal input onto the container: cells become px through
//! [`CellMetrics`], left-button drags become touch events, and resizes feed
//! the orientation resolver.

pub mod constants;
mod layout;
pub mod pull_indicator;
mod styles;

pub use layout::{FrameAreas, Screen, calculate_areas, render_layout};
pub use pull_indicator::{IndicatorPhase, PullIndicator};
pub use styles::{ColorConfig, Palette};

use crate::config::{ConfigError, KeyBindings};
use crate::logging::LoggingError;
use crate::model::{FeedError, FeedItem, KeyAction, RefreshError, StaticViewport};
use crate::state::{
    ContainerOptions, GestureOutcome, LayoutContainer, ListenerKind, ListenerRegistry,
    RefreshSettled, TouchEvent, spawn_refresh,
};
use crate::view::constants::{FALLBACK_WIDTH, GRID_CARD_HEIGHT, TICK_INTERVAL};
use crate::view_state::{CellMetrics, ViewKind};
use crossterm::{
    ExecutableCommand,
    event::{
        self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::cell::Cell;
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be resolved
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Feed file could not be loaded
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),
}

/// Startup settings for the TUI.
///
/// Built by `main` from the resolved configuration and CLI flags.
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Container options (pull distances, breakpoints, enabled flag).
    pub options: ContainerOptions,
    /// Cell to px conversion.
    pub metrics: CellMetrics,
    /// Initial sub-view.
    pub view: ViewKind,
    /// Simulated refresh latency.
    pub refresh_delay: Duration,
    /// Initial items.
    pub feed: Vec<FeedItem>,
    /// Color output.
    pub colors: ColorConfig,
}

impl CliArgs {
    /// Settings with default options around the given feed.
    pub fn new(feed: Vec<FeedItem>) -> Self {
        Self {
            options: ContainerOptions::default(),
            metrics: CellMetrics::DEFAULT,
            view: ViewKind::default(),
            refresh_delay: Duration::from_millis(1200),
            feed,
            colors: ColorConfig::from_env_and_args(false),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    container: LayoutContainer,
    viewport: StaticViewport,
    window_listeners: ListenerRegistry,
    root_listeners: ListenerRegistry,
    feed: Vec<FeedItem>,
    view: ViewKind,
    selected: Option<usize>,
    /// First visible item row; doubles as the page scroll offset.
    scroll_rows: usize,
    key_bindings: KeyBindings,
    metrics: CellMetrics,
    palette: Palette,
    fail_next: Rc<Cell<bool>>,
    refresh_count: usize,
    last_refresh: Option<RefreshSettled>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(args: CliArgs) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Self::with_terminal(terminal, args)
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C). Input redraws immediately; the
    /// poll timeout doubles as the tick that drives in-flight refreshes.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let redraw = if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                        true
                    }
                    Event::Mouse(mouse) => {
                        self.handle_mouse(mouse);
                        true
                    }
                    Event::Resize(width, height) => {
                        self.handle_resize(width, height);
                        true
                    }
                    _ => false,
                }
            } else {
                false
            };

            // Ticking on every pass keeps input bursts from starving refreshes.
            let settled = self.on_tick();

            if redraw || settled {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build the app around an existing terminal and mount the container.
    fn with_terminal(terminal: Terminal<B>, args: CliArgs) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        let width = if size.width > 0 {
            size.width
        } else {
            FALLBACK_WIDTH
        };
        let (width_px, height_px) = args.metrics.viewport_px(width, size.height);
        let viewport = StaticViewport::new(width_px, height_px);

        let fail_next = Rc::new(Cell::new(false));
        let handler = {
            let fail_next = Rc::clone(&fail_next);
            let delay = args.refresh_delay;
            move || {
                let fail = fail_next.replace(false);
                spawn_refresh(move || {
                    std::thread::sleep(delay);
                    if fail {
                        Err(RefreshError::Failed("simulated network error".to_string()))
                    } else {
                        Ok(())
                    }
                })
            }
        };

        let mut container =
            LayoutContainer::new(args.options, &viewport).with_refresh_handler(handler);
        let mut window_listeners = ListenerRegistry::new();
        let mut root_listeners = ListenerRegistry::new();
        container.mount(&mut window_listeners, Some(&mut root_listeners));

        info!(
            mode = %container.mode(),
            width_px,
            height_px,
            items = args.feed.len(),
            "container mounted"
        );

        Ok(Self {
            terminal,
            container,
            viewport,
            window_listeners,
            root_listeners,
            feed: args.feed,
            view: args.view,
            selected: None,
            scroll_rows: 0,
            key_bindings: KeyBindings::default(),
            metrics: args.metrics,
            palette: Palette::with_color_config(args.colors),
            fail_next,
            refresh_count: 0,
            last_refresh: None,
        })
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even if not in bindings
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };

        match action {
            KeyAction::Quit => return true,
            KeyAction::ScrollDown => self.scroll_by(1),
            KeyAction::ScrollUp => self.scroll_by(-1),
            KeyAction::ScrollToTop => self.set_scroll(0),
            KeyAction::SelectNext => {
                if !self.feed.is_empty() {
                    let last = self.feed.len() - 1;
                    self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(last)));
                }
            }
            KeyAction::SelectPrev => {
                if !self.feed.is_empty() {
                    self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
                }
            }
            KeyAction::ClearSelection => self.selected = None,
            KeyAction::CycleView => {
                self.view = self.view.next();
                self.set_scroll(self.scroll_rows);
                debug!(view = %self.view, "view cycled");
            }
            KeyAction::TogglePullToRefresh => {
                let enabled = !self.container.pull_to_refresh_enabled();
                self.container
                    .set_pull_to_refresh(enabled, Some(&mut self.root_listeners));
            }
            KeyAction::FailNextRefresh => {
                self.fail_next.set(true);
                info!("next refresh will fail");
            }
            KeyAction::Refresh => {
                if !self.container.request_refresh() {
                    debug!("refresh already in flight");
                }
            }
        }

        false
    }

    /// Handle a single mouse event
    ///
    /// Left-button down, drag and up are a touch gesture; the wheel scrolls.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let client_y = self.metrics.row_to_px(mouse.row);
        let touch = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => TouchEvent::Start { client_y },
            MouseEventKind::Drag(MouseButton::Left) => TouchEvent::Move { client_y },
            MouseEventKind::Up(MouseButton::Left) => TouchEvent::End,
            MouseEventKind::ScrollDown => return self.scroll_by(1),
            MouseEventKind::ScrollUp => return self.scroll_by(-1),
            _ => return,
        };
        self.dispatch_touch(touch);
    }

    /// Deliver a touch event if a listener for its kind is attached.
    fn dispatch_touch(&mut self, touch: TouchEvent) {
        if !self
            .root_listeners
            .is_listening(ListenerKind::for_touch(&touch))
        {
            return;
        }
        let outcome = self.container.on_touch(touch, &self.viewport);
        if outcome == GestureOutcome::RefreshRequested {
            info!("pull released past threshold");
        }
    }

    /// Terminal resized: recompute the viewport and the layout mode.
    fn handle_resize(&mut self, width: u16, height: u16) {
        debug!("Handling resize to {}x{}", width, height);
        if !self.window_listeners.is_listening(ListenerKind::Resize) {
            return;
        }
        let width = if width > 0 { width } else { FALLBACK_WIDTH };
        let (width_px, height_px) = self.metrics.viewport_px(width, height);
        self.viewport.set_size(width_px, height_px);

        if let Some(mode) = self.container.on_resize(&self.viewport) {
            info!(mode = %mode, "layout mode changed");
            // Column count may have changed.
            self.set_scroll(self.scroll_rows);
        }
    }

    /// Poll the in-flight refresh. Returns true if it settled.
    fn on_tick(&mut self) -> bool {
        let Some(settled) = self.container.tick() else {
            return false;
        };

        if settled == RefreshSettled::Succeeded {
            self.refresh_count += 1;
            self.feed.insert(
                0,
                FeedItem::refreshed_at(chrono::Local::now(), self.refresh_count),
            );
            self.selected = self.selected.map(|i| i + 1);
        }
        self.last_refresh = Some(settled);
        true
    }

    /// Rows of items in the current view.
    fn total_rows(&self) -> usize {
        match self.view {
            ViewKind::Grid => {
                let columns = usize::from(self.container.params().grid.columns.max(1));
                self.feed.len().div_ceil(columns)
            }
            ViewKind::List | ViewKind::Split => self.feed.len(),
        }
    }

    fn scroll_by(&mut self, delta: isize) {
        let target = self.scroll_rows.saturating_add_signed(delta);
        self.set_scroll(target);
    }

    /// Set the first visible row and publish the page offset in px.
    fn set_scroll(&mut self, rows: usize) {
        self.scroll_rows = rows.min(self.total_rows().saturating_sub(1));
        let row_px = match self.view {
            ViewKind::Grid => GRID_CARD_HEIGHT,
            ViewKind::List | ViewKind::Split => self.container.params().list.row_height(),
        };
        let offset = self.scroll_rows as f64 * f64::from(row_px) * f64::from(self.metrics.height_px());
        self.viewport.set_scroll_y(offset);
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let screen = Screen {
            container: &self.container,
            feed: &self.feed,
            view: self.view,
            selected: self.selected,
            scroll_rows: self.scroll_rows,
            metrics: self.metrics,
            palette: &self.palette,
            last_refresh: self.last_refresh.as_ref(),
            fail_next: self.fail_next.get(),
        };
        self.terminal.draw(|frame| render_layout(frame, &screen))?;
        Ok(())
    }

    /// Unmount the container, removing every listener it attached.
    fn shutdown(&mut self) {
        self.container
            .unmount(&mut self.window_listeners, Some(&mut self.root_listeners));
        debug!(
            remaining = self.window_listeners.len() + self.root_listeners.len(),
            "container unmounted"
        );
    }
}

// ===== Test Helpers =====
//
// Crate-internal accessors for the acceptance harness.

#[cfg(test)]
#[allow(dead_code)] // Not all helpers used by every test
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing around a prepared terminal.
    pub(crate) fn new_for_test(terminal: Terminal<B>, args: CliArgs) -> Result<Self, TuiError> {
        Self::with_terminal(terminal, args)
    }

    /// Handle a single keyboard event. Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Handle a single mouse event.
    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    /// Handle a resize event.
    pub(crate) fn handle_resize_test(&mut self, width: u16, height: u16) {
        self.handle_resize(width, height)
    }

    /// Run one timer tick. Returns true if a refresh settled.
    pub(crate) fn tick_test(&mut self) -> bool {
        self.on_tick()
    }

    /// Unmount the container.
    pub(crate) fn shutdown_test(&mut self) {
        self.shutdown()
    }

    /// Render a single frame.
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// The container.
    pub(crate) fn container(&self) -> &LayoutContainer {
        &self.container
    }

    /// Current items.
    pub(crate) fn feed(&self) -> &[FeedItem] {
        &self.feed
    }

    /// Active view.
    pub(crate) fn view(&self) -> ViewKind {
        self.view
    }

    /// Selected item.
    pub(crate) fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// First visible row.
    pub(crate) fn scroll_rows(&self) -> usize {
        self.scroll_rows
    }

    /// How the last refresh ended.
    pub(crate) fn last_refresh(&self) -> Option<&RefreshSettled> {
        self.last_refresh.as_ref()
    }

    /// Window and root listener counts.
    pub(crate) fn listener_counts(&self) -> (usize, usize) {
        (self.window_listeners.len(), self.root_listeners.len())
    }

    /// The terminal, for buffer inspection.
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// The terminal, for resizing the test backend.
    pub(crate) fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(args: CliArgs) -> Result<(), TuiError> {
    let mut app = TuiApp::new(args)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();
    app.shutdown();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
