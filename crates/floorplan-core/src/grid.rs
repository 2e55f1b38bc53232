//! Grid coordinates and pixel/grid conversion.

use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Default number of cells along each side of the grid.
pub const DEFAULT_GRID_SIZE: u32 = 20;

/// Largest grid a loaded document or config may ask for.
pub const MAX_GRID_SIZE: u32 = 500;

/// Default cell size in logical pixels.
pub const DEFAULT_CELL_SIZE: f64 = 30.0;

/// Integer address of a single grid cell.
///
/// Coordinates are signed so that out-of-range pointer positions can be
/// represented and rejected downstream instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this coordinate by a delta, saturating at the `i32` range.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Center of the cell in grid units.
    pub fn center(self) -> Point {
        Point::new(self.x as f64 + 0.5, self.y as f64 + 0.5)
    }
}

impl From<(i32, i32)> for GridCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Convert a grid coordinate to the pixel position of its top-left corner.
pub fn grid_to_pixel(coord: GridCoord, cell_size: f64) -> Point {
    Point::new(coord.x as f64 * cell_size, coord.y as f64 * cell_size)
}

/// Convert a logical pixel position to the grid cell containing it.
pub fn pixel_to_grid(point: Point, cell_size: f64) -> GridCoord {
    GridCoord::new(
        (point.x / cell_size).floor() as i32,
        (point.y / cell_size).floor() as i32,
    )
}

/// Check whether a coordinate lies inside a `grid_size` × `grid_size` grid.
pub fn is_valid_coordinate(coord: GridCoord, grid_size: u32) -> bool {
    let size = grid_size as i64;
    (0..size).contains(&(coord.x as i64)) && (0..size).contains(&(coord.y as i64))
}

/// Rescale a screen-space point into the logical pixel space of the surface.
///
/// `surface` is the on-screen bounding rectangle of the drawing surface;
/// `logical_size` is the side length of the grid in logical pixels.
pub fn screen_to_logical(screen: Point, surface: Rect, logical_size: f64) -> Point {
    let scale_x = if surface.width() > 0.0 { logical_size / surface.width() } else { 1.0 };
    let scale_y = if surface.height() > 0.0 { logical_size / surface.height() } else { 1.0 };
    Point::new(
        (screen.x - surface.x0) * scale_x,
        (screen.y - surface.y0) * scale_y,
    )
}

/// Converts device pixels to grid cells for one drawing surface.
///
/// The surface rectangle is supplied by the host once it has been laid out
/// and cached until the host reports a layout change. Until then, screen
/// points are treated as logical pixels.
#[derive(Debug, Clone)]
pub struct SurfaceTransform {
    /// Cached on-screen rectangle of the drawing surface.
    surface: Option<Rect>,
    /// Number of cells along each side.
    pub grid_size: u32,
    /// Cell size in logical pixels.
    pub cell_size: f64,
}

impl Default for SurfaceTransform {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE, DEFAULT_CELL_SIZE)
    }
}

impl SurfaceTransform {
    pub fn new(grid_size: u32, cell_size: f64) -> Self {
        Self {
            surface: None,
            grid_size,
            cell_size,
        }
    }

    /// Side length of the grid in logical pixels.
    pub fn logical_size(&self) -> f64 {
        self.grid_size as f64 * self.cell_size
    }

    /// Cache the on-screen rectangle reported by the host.
    pub fn set_surface_rect(&mut self, rect: Rect) {
        log::debug!("Surface rect cached: {:?}", rect);
        self.surface = Some(rect);
    }

    /// Drop the cached rectangle after a layout change.
    pub fn invalidate(&mut self) {
        self.surface = None;
    }

    /// Get the cached surface rectangle, if any.
    pub fn surface_rect(&self) -> Option<Rect> {
        self.surface
    }

    /// Convert a screen point to logical pixels.
    pub fn screen_to_logical(&self, screen: Point) -> Point {
        match self.surface {
            Some(rect) => screen_to_logical(screen, rect, self.logical_size()),
            None => screen,
        }
    }

    /// Convert a screen point to the grid cell under it.
    pub fn screen_to_cell(&self, screen: Point) -> GridCoord {
        pixel_to_grid(self.screen_to_logical(screen), self.cell_size)
    }

    /// Screen point at the center of a cell.
    pub fn cell_to_screen(&self, coord: GridCoord) -> Point {
        let corner = grid_to_pixel(coord, self.cell_size);
        let half = self.cell_size / 2.0;
        let logical = Point::new(corner.x + half, corner.y + half);
        let Some(rect) = self.surface else {
            return logical;
        };
        let size = self.logical_size();
        let scale_x = if rect.width() > 0.0 { rect.width() / size } else { 1.0 };
        let scale_y = if rect.height() > 0.0 { rect.height() / size } else { 1.0 };
        Point::new(rect.x0 + logical.x * scale_x, rect.y0 + logical.y * scale_y)
    }

    /// Check whether a cell lies inside this grid.
    pub fn contains(&self, coord: GridCoord) -> bool {
        is_valid_coordinate(coord, self.grid_size)
    }
}
