//! Orientation/viewport resolver.

use crate::model::{Breakpoints, DeviceFacets, LayoutMode, ViewportProvider, ViewportState, resolve};
use tracing::debug;

/// Tracks the current viewport and the facets derived from it.
#[derive(Debug, Clone)]
pub struct OrientationResolver {
    breakpoints: Breakpoints,
    viewport: Option<ViewportState>,
    facets: DeviceFacets,
}

impl OrientationResolver {
    /// Resolve the initial viewport from `provider`.
    pub fn new(breakpoints: Breakpoints, provider: &dyn ViewportProvider) -> Self {
        let viewport = provider.viewport();
        Self {
            breakpoints,
            viewport,
            facets: resolve(&breakpoints, viewport.as_ref()),
        }
    }

    /// Re-read the viewport. Returns the new mode if it changed.
    pub fn update(&mut self, provider: &dyn ViewportProvider) -> Option<LayoutMode> {
        let previous = self.facets.mode;
        self.viewport = provider.viewport();
        self.facets = resolve(&self.breakpoints, self.viewport.as_ref());

        if self.facets.mode == previous {
            return None;
        }
        debug!(from = %previous, to = %self.facets.mode, "layout mode changed");
        Some(self.facets.mode)
    }

    /// Current facets.
    pub fn facets(&self) -> DeviceFacets {
        self.facets
    }

    /// Current mode.
    pub fn mode(&self) -> LayoutMode {
        self.facets.mode
    }

    /// Last viewport read, `None` when headless.
    pub fn viewport(&self) -> Option<ViewportState> {
        self.viewport
    }

    /// Breakpoints in use.
    pub fn breakpoints(&self) -> Breakpoints {
        self.breakpoints
    }
}
