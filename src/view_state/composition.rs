//! Area computation for the grid, list and split sub-views.
//!
//! Pure geometry on ratatui [`Rect`]s. Only fully visible rows are returned;
//! `first_row` is the content scroll offset in item rows.

use crate::view_state::layout_params::{FabPlacement, SidebarParams, SplitParams};
use crate::view_state::metrics::CellMetrics;
use ratatui::layout::Rect;

/// Visible grid cells as `(item_index, area)`, row-major.
pub fn grid_cells(
    area: Rect,
    columns: u16,
    row_height: u16,
    item_count: usize,
    first_row: usize,
) -> Vec<(usize, Rect)> {
    if area.width == 0 || area.height == 0 || row_height == 0 {
        return Vec::new();
    }

    let columns = columns.clamp(1, area.width);
    let cell_width = area.width / columns;
    let visible_rows = area.height / row_height;
    let mut cells = Vec::new();

    for row in 0..visible_rows {
        let row_index = first_row + usize::from(row);
        for column in 0..columns {
            let index = row_index * usize::from(columns) + usize::from(column);
            if index >= item_count {
                return cells;
            }
            let x_offset = column * cell_width;
            // The last column absorbs the division remainder.
            let width = if column + 1 == columns {
                area.width - x_offset
            } else {
                cell_width
            };
            cells.push((
                index,
                Rect::new(area.x + x_offset, area.y + row * row_height, width, row_height),
            ));
        }
    }

    cells
}

/// Visible list rows as `(item_index, area)`.
pub fn list_rows(
    area: Rect,
    row_height: u16,
    item_count: usize,
    first_row: usize,
) -> Vec<(usize, Rect)> {
    grid_cells(area, 1, row_height, item_count, first_row)
}

/// Areas of the master-detail split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitAreas {
    /// Master list, `None` when a stacked split shows the detail.
    pub master: Option<Rect>,
    /// Detail panel, `None` when a stacked split shows the master.
    pub detail: Option<Rect>,
}

/// Split `area` into master and detail.
///
/// Side by side when the mode has room for it; otherwise stacked, showing the
/// detail only while something is selected.
pub fn split_areas(area: Rect, split: SplitParams, has_selection: bool) -> SplitAreas {
    if !split.show_detail_panel {
        return if has_selection {
            SplitAreas {
                master: None,
                detail: Some(area),
            }
        } else {
            SplitAreas {
                master: Some(area),
                detail: None,
            }
        };
    }

    let percent = u32::from(split.master_percent.min(100));
    let master_width = (u32::from(area.width) * percent / 100) as u16;
    SplitAreas {
        master: Some(Rect::new(area.x, area.y, master_width, area.height)),
        detail: Some(Rect::new(
            area.x + master_width,
            area.y,
            area.width - master_width,
            area.height,
        )),
    }
}

/// Carve the sidebar off the left of `area`. Returns `(sidebar, content)`.
///
/// The sidebar never takes more than half the width.
pub fn sidebar_split(
    area: Rect,
    sidebar: Option<SidebarParams>,
    metrics: &CellMetrics,
) -> (Option<Rect>, Rect) {
    let Some(sidebar) = sidebar else {
        return (None, area);
    };
    let width = metrics.px_to_cols(sidebar.width).min(area.width / 2);
    if width == 0 {
        return (None, area);
    }
    (
        Some(Rect::new(area.x, area.y, width, area.height)),
        Rect::new(area.x + width, area.y, area.width - width, area.height),
    )
}

/// Center `area` horizontally within a maximum width.
pub fn constrain_width(area: Rect, max_width_px: Option<u32>, metrics: &CellMetrics) -> Rect {
    let Some(max_width_px) = max_width_px else {
        return area;
    };
    let max_cols = metrics.px_to_cols(max_width_px);
    if max_cols >= area.width {
        return area;
    }
    let margin = (area.width - max_cols) / 2;
    Rect::new(area.x + margin, area.y, max_cols, area.height)
}

/// Inset `area` by `padding_px` on every side.
pub fn pad(area: Rect, padding_px: u32, metrics: &CellMetrics) -> Rect {
    let horizontal = metrics.px_to_cols(padding_px);
    let vertical = metrics.px_to_rows(padding_px);
    let width = area.width.saturating_sub(horizontal * 2);
    let height = area.height.saturating_sub(vertical * 2);
    if width == 0 || height == 0 {
        return area;
    }
    Rect::new(area.x + horizontal, area.y + vertical, width, height)
}

/// Floating action button area, anchored bottom-right and clamped inside `area`.
pub fn fab_rect(area: Rect, fab: FabPlacement, metrics: &CellMetrics) -> Rect {
    let width = metrics.px_to_cols(fab.size).max(1).min(area.width);
    let height = metrics.px_to_rows(fab.size).max(1).min(area.height);
    let right = metrics.px_to_cols(fab.right);
    let bottom = metrics.px_to_rows(fab.bottom);

    let x = area
        .right()
        .saturating_sub(right + width)
        .max(area.x);
    let y = area
        .bottom()
        .saturating_sub(bottom + height)
        .max(area.y);
    Rect::new(x, y, width, height)
}
