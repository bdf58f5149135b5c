//! View-state layer: layout tables and geometry derived from the layout mode.
//!
//! Pure: nothing here touches the terminal.

pub mod composition;
pub mod layout_params;
pub mod metrics;
pub mod view_kind;

pub use composition::{SplitAreas, grid_cells, list_rows, split_areas};
pub use layout_params::{
    FabPlacement, GridParams, LayoutParams, ListDensity, ListParams, SidebarParams, SplitParams,
    render_for_mode,
};
pub use metrics::{CellMetrics, InvalidCellMetrics};
pub use view_kind::{UnknownViewKind, ViewKind};
