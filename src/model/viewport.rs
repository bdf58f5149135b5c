//! Viewport dimensions and the provider seam used to read them.
//!
//! Nothing in the core reads global window state directly. Consumers are
//! handed a [`ViewportProvider`], which the terminal shell backs with the
//! terminal size and tests back with a [`StaticViewport`].

/// Device orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Height is at least the width.
    #[default]
    Portrait,
    /// Width exceeds height.
    Landscape,
}

impl Orientation {
    /// Derive orientation from raw dimensions (`width > height` is landscape).
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width > height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }

    /// Lowercase name, as shown in the status bar.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

/// Snapshot of the viewport in CSS-style pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportState {
    /// Width in px.
    pub width: u32,
    /// Height in px.
    pub height: u32,
    /// Orientation, either reported by the platform or derived from the size.
    pub orientation: Orientation,
}

impl ViewportState {
    /// Create a viewport whose orientation is derived from its dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            orientation: Orientation::from_dimensions(width, height),
        }
    }

    /// Replace the derived orientation with an explicit signal.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }
}

/// Read-only source of viewport dimensions and page scroll position.
pub trait ViewportProvider {
    /// Current `(width, height)` in px, or `None` when there is no window.
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// Orientation signal reported by the platform, if any.
    fn orientation(&self) -> Option<Orientation> {
        None
    }

    /// Vertical page scroll offset in px.
    fn scroll_y(&self) -> f64 {
        0.0
    }

    /// Combined viewport snapshot.
    ///
    /// An explicit orientation signal wins over the one derived from the size.
    fn viewport(&self) -> Option<ViewportState> {
        let (width, height) = self.dimensions()?;
        let state = ViewportState::new(width, height);
        Some(match self.orientation() {
            Some(orientation) => state.with_orientation(orientation),
            None => state,
        })
    }
}

/// In-memory provider updated explicitly by its owner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticViewport {
    dimensions: Option<(u32, u32)>,
    orientation: Option<Orientation>,
    scroll_y: f64,
}

impl StaticViewport {
    /// Provider reporting the given size, scrolled to the top.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            dimensions: Some((width, height)),
            orientation: None,
            scroll_y: 0.0,
        }
    }

    /// Provider with no window at all.
    pub fn headless() -> Self {
        Self::default()
    }

    /// Update the reported size.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.dimensions = Some((width, height));
    }

    /// Set or clear the explicit orientation signal.
    pub fn set_orientation(&mut self, orientation: Option<Orientation>) {
        self.orientation = orientation;
    }

    /// Update the page scroll offset.
    pub fn set_scroll_y(&mut self, scroll_y: f64) {
        self.scroll_y = scroll_y;
    }
}

impl ViewportProvider for StaticViewport {
    fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    fn orientation(&self) -> Option<Orientation> {
        self.orientation
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }
}
