//! Room interior mask.

use crate::elements::Room;
use crate::grid::GridCoord;
use kurbo::Point;

/// Even-odd ray casting test.
///
/// Casts a ray from `point` towards +x and counts crossed edges.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let cross_x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Per-cell flag marking cells whose center lies inside some room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomInteriorMask {
    grid_size: u32,
    cells: Vec<bool>,
}

impl RoomInteriorMask {
    /// An all-exterior mask.
    pub fn empty(grid_size: u32) -> Self {
        Self {
            grid_size,
            cells: vec![false; grid_size as usize * grid_size as usize],
        }
    }

    /// Compute the mask for a set of rooms.
    pub fn recompute(rooms: &[Room], grid_size: u32) -> Self {
        let mut mask = Self::empty(grid_size);
        for room in rooms {
            let polygon = room.polygon();
            for y in 0..grid_size as i32 {
                for x in 0..grid_size as i32 {
                    let coord = GridCoord::new(x, y);
                    if point_in_polygon(coord.center(), &polygon) {
                        mask.mark(coord);
                    }
                }
            }
        }
        log::debug!(
            "Recomputed interior mask for {} rooms: {} interior cells",
            rooms.len(),
            mask.interior_count()
        );
        mask
    }

    fn slot(&self, coord: GridCoord) -> Option<usize> {
        let size = self.grid_size as i32;
        if coord.x < 0 || coord.y < 0 || coord.x >= size || coord.y >= size {
            return None;
        }
        Some(coord.y as usize * self.grid_size as usize + coord.x as usize)
    }

    fn mark(&mut self, coord: GridCoord) {
        if let Some(slot) = self.slot(coord) {
            self.cells[slot] = true;
        }
    }

    /// Cells outside the grid are never interior.
    pub fn is_interior(&self, coord: GridCoord) -> bool {
        self.slot(coord).is_some_and(|slot| self.cells[slot])
    }

    pub fn interior_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_in_square() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        assert!(point_in_polygon(Point::new(2.0, 2.0), &square));
        assert!(!point_in_polygon(Point::new(5.0, 2.0), &square));
        assert!(!point_in_polygon(Point::new(2.0, -0.5), &square));
    }

    #[test]
    fn test_degenerate_polygon() {
        let line = [Point::new(0.0, 0.0), Point::new(4.0, 4.0)];
        assert!(!point_in_polygon(Point::new(1.0, 1.0), &line));
    }

    #[test]
    fn test_rectangular_room_mask() {
        let rooms = vec![Room::new(GridCoord::new(2, 3), 3, 2)];
        let mask = RoomInteriorMask::recompute(&rooms, 10);
        assert_eq!(mask.interior_count(), 6);
        assert!(mask.is_interior(GridCoord::new(2, 3)));
        assert!(mask.is_interior(GridCoord::new(4, 4)));
        assert!(!mask.is_interior(GridCoord::new(5, 4)));
        assert!(!mask.is_interior(GridCoord::new(1, 3)));
        assert!(!mask.is_interior(GridCoord::new(-1, 0)));
    }

    #[test]
    fn test_l_shaped_room() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        let mask = RoomInteriorMask::recompute(&[Room::from_polygon(points)], 6);
        assert_eq!(mask.interior_count(), 12);
        assert!(mask.is_interior(GridCoord::new(3, 1)));
        assert!(mask.is_interior(GridCoord::new(1, 3)));
        assert!(!mask.is_interior(GridCoord::new(3, 3)));
    }

    #[test]
    fn test_union_of_rooms() {
        let rooms = vec![
            Room::new(GridCoord::new(0, 0), 2, 2),
            Room::new(GridCoord::new(1, 1), 2, 2),
        ];
        let mask = RoomInteriorMask::recompute(&rooms, 5);
        assert_eq!(mask.interior_count(), 7);
    }
}
