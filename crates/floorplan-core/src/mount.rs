//! Resolving where a wall-mounted fan goes.

use crate::elements::{Facing, Placeable, Wall, WallMount};
use crate::grid::GridCoord;

/// Neighbour scan order when looking for an adjacent wall.
const SCAN_ORDER: [Facing; 4] = [Facing::N, Facing::S, Facing::W, Facing::E];

/// A resolved fan position.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMount {
    /// Cell the fan occupies.
    pub cell: GridCoord,
    pub mount: WallMount,
}

/// Resolve a fan placement aimed at `target`.
///
/// If `target` is inside a wall, the fan goes on that wall's `face` side at
/// `offset` along it. Otherwise the four neighbours are scanned for a wall
/// and the fan stays at `target`. Returns `None` when neither finds a wall.
pub fn resolve_fan_mount(
    target: GridCoord,
    walls: &[Wall],
    face: Facing,
    offset: f64,
) -> Option<ResolvedMount> {
    if let Some(wall) = walls.iter().find(|w| w.footprint().contains(target)) {
        return Some(mount_on_face(wall, face, offset));
    }

    SCAN_ORDER.into_iter().find_map(|dir| {
        let (dx, dy) = dir.delta();
        let neighbour = target.offset(dx, dy);
        let wall = walls.iter().find(|w| w.footprint().contains(neighbour))?;
        Some(ResolvedMount {
            cell: target,
            mount: WallMount {
                wall: wall.id(),
                face: dir.opposite(),
                offset: offset_along(wall, target),
            },
        })
    })
}

/// Cell next to `wall` on its `face` side at fractional `offset`.
fn mount_on_face(wall: &Wall, face: Facing, offset: f64) -> ResolvedMount {
    let offset = if offset.is_finite() { offset.clamp(0.0, 1.0) } else { 0.5 };
    let len = if face.is_east_west() { wall.height } else { wall.width };
    let step = (offset * len.saturating_sub(1) as f64).round() as i32;

    let cell = match face {
        Facing::N => GridCoord::new(wall.x + step, wall.y - 1),
        Facing::S => GridCoord::new(wall.x + step, wall.y + wall.height as i32),
        Facing::W => GridCoord::new(wall.x - 1, wall.y + step),
        Facing::E => GridCoord::new(wall.x + wall.width as i32, wall.y + step),
    };
    ResolvedMount {
        cell,
        mount: WallMount {
            wall: wall.id(),
            face,
            offset,
        },
    }
}

/// Fractional position of `cell` along the wall's long axis.
fn offset_along(wall: &Wall, cell: GridCoord) -> f64 {
    let (start, len, pos) = if wall.width >= wall.height {
        (wall.x, wall.width, cell.x)
    } else {
        (wall.y, wall.height, cell.y)
    };
    if len <= 1 {
        return 0.5;
    }
    let along = (pos - start).clamp(0, len as i32 - 1);
    along as f64 / (len - 1) as f64
}
