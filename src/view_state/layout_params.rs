//! Structural layout parameters per layout mode.
//!
//! Pure table lookups: everything here is a function of [`LayoutMode`] only.
//! Distances are in px; the terminal shell converts them to cells.

use crate::model::LayoutMode;

/// Height reserved for the mobile bottom navigation bar.
pub const BOTTOM_NAV_HEIGHT: u32 = 56;

/// Distance between the floating action button and the viewport edges.
pub const FAB_MARGIN: u32 = 16;

/// Diameter of the floating action button.
pub const FAB_SIZE: u32 = 56;

/// Card grid parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridParams {
    /// Number of columns.
    pub columns: u16,
    /// Maximum content width in px, `None` for full width.
    pub max_width: Option<u32>,
}

/// Row spacing of the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListDensity {
    /// One line per item.
    Compact,
    /// Title plus detail line.
    Comfortable,
}

/// List view parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    /// Row spacing.
    pub density: ListDensity,
}

impl ListParams {
    /// Lines occupied by one item.
    pub fn row_height(&self) -> u16 {
        match self.density {
            ListDensity::Compact => 1,
            ListDensity::Comfortable => 2,
        }
    }
}

/// Master-detail split parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitParams {
    /// Width share of the master list, in percent.
    pub master_percent: u16,
    /// Whether master and detail are shown side by side.
    pub show_detail_panel: bool,
}

/// Sidebar parameters. Only exists for tablet-class modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarParams {
    /// Sidebar width in px.
    pub width: u32,
}

/// Floating action button placement, measured from the bottom-right corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FabPlacement {
    /// Offset from the right edge.
    pub right: u32,
    /// Offset from the bottom edge.
    pub bottom: u32,
    /// Button diameter.
    pub size: u32,
}

/// Everything the container needs to lay out one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    /// Mode the parameters were derived from.
    pub mode: LayoutMode,
    /// Container padding in px.
    pub padding: u32,
    /// Grid sub-view.
    pub grid: GridParams,
    /// List sub-view.
    pub list: ListParams,
    /// Split sub-view.
    pub split: SplitParams,
    /// Floating action button.
    pub fab: FabPlacement,
    /// Sidebar; `None` means it is not rendered at all.
    pub sidebar: Option<SidebarParams>,
}

impl LayoutParams {
    /// Look up parameters for `mode`.
    pub fn for_mode(mode: LayoutMode) -> Self {
        Self {
            mode,
            padding: padding_for(mode),
            grid: grid_for(mode),
            list: list_for(mode),
            split: split_for(mode),
            fab: fab_for(mode),
            sidebar: render_for_mode(mode),
        }
    }
}

fn padding_for(mode: LayoutMode) -> u32 {
    match mode {
        LayoutMode::Mobile => 12,
        LayoutMode::TabletPortrait => 20,
        LayoutMode::TabletLandscape => 24,
        LayoutMode::Desktop => 32,
    }
}

fn grid_for(mode: LayoutMode) -> GridParams {
    let (columns, max_width) = match mode {
        LayoutMode::Mobile => (1, None),
        LayoutMode::TabletPortrait => (2, Some(768)),
        LayoutMode::TabletLandscape => (3, Some(1024)),
        LayoutMode::Desktop => (4, Some(1280)),
    };
    GridParams { columns, max_width }
}

fn list_for(mode: LayoutMode) -> ListParams {
    let density = match mode {
        LayoutMode::Mobile => ListDensity::Compact,
        _ => ListDensity::Comfortable,
    };
    ListParams { density }
}

fn split_for(mode: LayoutMode) -> SplitParams {
    match mode {
        LayoutMode::Mobile => SplitParams {
            master_percent: 100,
            show_detail_panel: false,
        },
        LayoutMode::TabletPortrait => SplitParams {
            master_percent: 40,
            show_detail_panel: true,
        },
        LayoutMode::TabletLandscape => SplitParams {
            master_percent: 35,
            show_detail_panel: true,
        },
        LayoutMode::Desktop => SplitParams {
            master_percent: 30,
            show_detail_panel: true,
        },
    }
}

fn fab_for(mode: LayoutMode) -> FabPlacement {
    let bottom = match mode {
        LayoutMode::Mobile => FAB_MARGIN + BOTTOM_NAV_HEIGHT,
        _ => FAB_MARGIN,
    };
    FabPlacement {
        right: FAB_MARGIN,
        bottom,
        size: FAB_SIZE,
    }
}

/// Sidebar for `mode`, or `None` when it must be left out of the render tree.
pub fn render_for_mode(mode: LayoutMode) -> Option<SidebarParams> {
    let width = match mode {
        LayoutMode::Mobile => return None,
        LayoutMode::TabletPortrait => 240,
        LayoutMode::TabletLandscape => 280,
        LayoutMode::Desktop => 320,
    };
    Some(SidebarParams { width })
}
