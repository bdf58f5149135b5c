//! Conversion between terminal cells and viewport px.

/// Error returned for a zero-sized cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("cell size must be non-zero (got {width}x{height}px)")]
pub struct InvalidCellMetrics {
    /// Requested cell width.
    pub width: u32,
    /// Requested cell height.
    pub height: u32,
}

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    width_px: u32,
    height_px: u32,
}

impl CellMetrics {
    /// 8x16px, a typical monospace cell.
    pub const DEFAULT: Self = Self {
        width_px: 8,
        height_px: 16,
    };

    /// Smart constructor rejecting zero sizes.
    pub fn new(width_px: u32, height_px: u32) -> Result<Self, InvalidCellMetrics> {
        if width_px == 0 || height_px == 0 {
            return Err(InvalidCellMetrics {
                width: width_px,
                height: height_px,
            });
        }
        Ok(Self {
            width_px,
            height_px,
        })
    }

    /// Cell width in px.
    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    /// Cell height in px.
    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    /// Terminal size in cells to viewport size in px.
    pub fn viewport_px(&self, columns: u16, rows: u16) -> (u32, u32) {
        (
            u32::from(columns) * self.width_px,
            u32::from(rows) * self.height_px,
        )
    }

    /// Vertical px position of a terminal row.
    pub fn row_to_px(&self, row: u16) -> f64 {
        f64::from(u32::from(row) * self.height_px)
    }

    /// Horizontal px distance to whole columns, rounding down.
    pub fn px_to_cols(&self, px: u32) -> u16 {
        u16::try_from(px / self.width_px).unwrap_or(u16::MAX)
    }

    /// Vertical px distance to whole rows, rounding down.
    pub fn px_to_rows(&self, px: u32) -> u16 {
        u16::try_from(px / self.height_px).unwrap_or(u16::MAX)
    }

    /// Fractional pull offset to whole rows, rounding down.
    pub fn pull_to_rows(&self, pull_px: f64) -> u16 {
        if pull_px <= 0.0 {
            return 0;
        }
        (pull_px / f64::from(self.height_px)).floor().min(f64::from(u16::MAX)) as u16
    }
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_cells() {
        assert!(CellMetrics::new(0, 16).is_err());
        assert!(CellMetrics::new(8, 0).is_err());
        assert!(CellMetrics::new(8, 16).is_ok());
    }

    #[test]
    fn viewport_scales_by_cell_size() {
        assert_eq!(CellMetrics::DEFAULT.viewport_px(100, 40), (800, 640));
    }

    #[test]
    fn row_position_in_px() {
        assert_eq!(CellMetrics::DEFAULT.row_to_px(10), 160.0);
    }

    #[test]
    fn px_conversion_rounds_down() {
        let metrics = CellMetrics::DEFAULT;
        assert_eq!(metrics.px_to_cols(12), 1);
        assert_eq!(metrics.px_to_rows(72), 4);
        assert_eq!(metrics.pull_to_rows(100.0), 6);
        assert_eq!(metrics.pull_to_rows(-5.0), 0);
    }
}
