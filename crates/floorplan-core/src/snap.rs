//! Tool-specific snapping of drawn geometry.

use crate::elements::{Orientation, Wall};
use crate::geometry::Footprint;
use crate::grid::GridCoord;

/// Force a wall's end cell onto the dominant axis of the drag.
///
/// A drag with more horizontal than vertical extent becomes a horizontal
/// run; anything else, ties included, becomes vertical.
pub fn snap_wall_end(anchor: GridCoord, end: GridCoord) -> GridCoord {
    let dx = anchor.x.abs_diff(end.x);
    let dy = anchor.y.abs_diff(end.y);
    if dx > dy {
        GridCoord::new(end.x, anchor.y)
    } else {
        GridCoord::new(anchor.x, end.y)
    }
}

/// Footprint of a wall dragged from `anchor` to `end`.
pub fn wall_footprint(anchor: GridCoord, end: GridCoord) -> Footprint {
    Footprint::from_corners(anchor, snap_wall_end(anchor, end))
}

/// Footprint of a room dragged from `anchor` to `end`. No snapping.
pub fn room_footprint(anchor: GridCoord, end: GridCoord) -> Footprint {
    Footprint::from_corners(anchor, end)
}

/// Pick a door or window orientation from the walls around `target`.
///
/// A wall counts when its run passes through the target's column (or row)
/// within one cell. Only one matching axis decides; both or neither fall
/// back to horizontal.
pub fn detect_opening_orientation(target: GridCoord, walls: &[Wall]) -> Orientation {
    let near = |a: i32, b: i32| a.abs_diff(b) <= 1;
    let within =
        |v: i32, start: i32, len: u32| v >= start && (v as i64) < start as i64 + len as i64;

    let mut horizontal = false;
    let mut vertical = false;
    for wall in walls {
        if wall.is_horizontal() && near(wall.y, target.y) && within(target.x, wall.x, wall.width) {
            horizontal = true;
        }
        if wall.is_vertical() && near(wall.x, target.x) && within(target.y, wall.y, wall.height) {
            vertical = true;
        }
    }

    match (horizontal, vertical) {
        (false, true) => Orientation::Vertical,
        _ => Orientation::Horizontal,
    }
}
