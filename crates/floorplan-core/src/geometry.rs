//! Multi-cell footprints.

use crate::grid::GridCoord;
use serde::{Deserialize, Serialize};

/// Rectangular block of cells occupied by an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Footprint {
    /// Top-left cell.
    pub anchor: GridCoord,
    /// Width in cells (at least 1).
    pub width: u32,
    /// Height in cells (at least 1).
    pub height: u32,
}

impl Footprint {
    /// Create a footprint. Zero extents are clamped to 1.
    pub fn new(anchor: GridCoord, width: u32, height: u32) -> Self {
        Self {
            anchor,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// A single cell.
    pub fn cell(anchor: GridCoord) -> Self {
        Self::new(anchor, 1, 1)
    }

    /// Smallest footprint covering two corner cells.
    pub fn from_corners(a: GridCoord, b: GridCoord) -> Self {
        Self::new(
            GridCoord::new(a.x.min(b.x), a.y.min(b.y)),
            a.x.abs_diff(b.x) + 1,
            a.y.abs_diff(b.y) + 1,
        )
    }

    /// The same anchor with width and height exchanged.
    pub fn transposed(self) -> Self {
        Self::new(self.anchor, self.height, self.width)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.anchor.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.anchor.y as i64 + self.height as i64
    }

    /// Number of cells covered.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Iterate covered cells in row-major order.
    ///
    /// Cells past the end of the `i32` coordinate range are skipped.
    pub fn cells(&self) -> impl Iterator<Item = GridCoord> + use<> {
        const LIMIT: i64 = i32::MAX as i64 + 1;
        let (left, top) = (self.anchor.x as i64, self.anchor.y as i64);
        let (right, bottom) = (self.right().min(LIMIT), self.bottom().min(LIMIT));
        (top..bottom)
            .flat_map(move |y| (left..right).map(move |x| GridCoord::new(x as i32, y as i32)))
    }

    /// Check whether a cell is covered.
    pub fn contains(&self, coord: GridCoord) -> bool {
        self.contains_with_margin(coord, 0)
    }

    /// Check whether a cell is covered after growing every side by `margin` cells.
    pub fn contains_with_margin(&self, coord: GridCoord, margin: i64) -> bool {
        let (x, y) = (coord.x as i64, coord.y as i64);
        x >= self.anchor.x as i64 - margin
            && x < self.right() + margin
            && y >= self.anchor.y as i64 - margin
            && y < self.bottom() + margin
    }

    /// Check whether the footprint lies fully inside the grid.
    pub fn fits_in_grid(&self, grid_size: u32) -> bool {
        self.anchor.x >= 0
            && self.anchor.y >= 0
            && self.right() <= grid_size as i64
            && self.bottom() <= grid_size as i64
    }

    /// Whether the footprint is a horizontal run (one row, several columns).
    pub fn is_horizontal_run(&self) -> bool {
        self.height == 1 && self.width > 1
    }

    /// Whether the footprint is a vertical run (one column, several rows).
    pub fn is_vertical_run(&self) -> bool {
        self.width == 1 && self.height > 1
    }
}

/// All cells covered by an element anchored at `anchor`.
pub fn occupied_cells(anchor: GridCoord, width: u32, height: u32) -> Vec<GridCoord> {
    Footprint::new(anchor, width, height).cells().collect()
}

/// Check whether an element anchored at `anchor` fits inside the grid.
pub fn fits_in_grid(anchor: GridCoord, width: u32, height: u32, grid_size: u32) -> bool {
    Footprint::new(anchor, width, height).fits_in_grid(grid_size)
}
