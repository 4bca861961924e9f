//! Data model for labelled grids and reference rasters.

mod label;
pub mod raster;

pub use label::{Label, Palette};
pub use raster::{Raster, RasterView, Rgb};

/// Logical grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl GridSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Whether `(x, y)` addresses a cell of this grid.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Total number of cells.
    pub fn cells(&self) -> usize {
        self.width * self.height
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(
            crate::constants::DRAW_WIDTH,
            crate::constants::DRAW_HEIGHT,
        )
    }
}
