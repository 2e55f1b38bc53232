//! Structural layer elements: walls, rooms, doors and windows.

use super::{ElementId, ElementKind, Placeable, is_false, new_id, one};
use crate::geometry::Footprint;
use crate::grid::GridCoord;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Orientation of a door or window relative to the wall it sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// A rectangular wall run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WallRecord", rename_all = "camelCase")]
pub struct Wall {
    pub(crate) id: ElementId,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Converted on load from a line-segment wall; hit-tested with a tolerance margin.
    #[serde(skip_serializing_if = "is_false")]
    pub legacy_segment: bool,
}

impl Wall {
    /// Create a wall covering `footprint`.
    pub fn new(footprint: Footprint) -> Self {
        Self {
            id: new_id(),
            x: footprint.anchor.x,
            y: footprint.anchor.y,
            width: footprint.width,
            height: footprint.height,
            legacy_segment: false,
        }
    }

    /// Create a wall from the two end cells of a line segment.
    pub fn from_segment(start: GridCoord, end: GridCoord) -> Self {
        let mut wall = Self::new(Footprint::from_corners(start, end));
        wall.legacy_segment = true;
        wall
    }

    /// Whether the wall is a single-row run longer than one cell.
    pub fn is_horizontal(&self) -> bool {
        self.footprint().is_horizontal_run()
    }

    /// Whether the wall is a single-column run longer than one cell.
    pub fn is_vertical(&self) -> bool {
        self.footprint().is_vertical_run()
    }
}

impl Placeable for Wall {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Wall
    }

    fn footprint(&self) -> Footprint {
        Footprint::new(GridCoord::new(self.x, self.y), self.width, self.height)
    }
}

/// Wire forms accepted for walls.
#[derive(Deserialize)]
#[serde(untagged)]
enum WallRecord {
    Rect {
        #[serde(default = "new_id")]
        id: ElementId,
        x: i32,
        y: i32,
        #[serde(default = "one")]
        width: u32,
        #[serde(default = "one")]
        height: u32,
        #[serde(default, rename = "legacySegment", alias = "legacy_segment")]
        legacy_segment: bool,
    },
    Segment {
        #[serde(default = "new_id")]
        id: ElementId,
        #[serde(rename = "startX", alias = "start_x")]
        start_x: i32,
        #[serde(rename = "startY", alias = "start_y")]
        start_y: i32,
        #[serde(rename = "endX", alias = "end_x")]
        end_x: i32,
        #[serde(rename = "endY", alias = "end_y")]
        end_y: i32,
    },
}

impl From<WallRecord> for Wall {
    fn from(record: WallRecord) -> Self {
        match record {
            WallRecord::Rect { id, x, y, width, height, legacy_segment } => Wall {
                id,
                x,
                y,
                width: width.max(1),
                height: height.max(1),
                legacy_segment,
            },
            WallRecord::Segment { id, start_x, start_y, end_x, end_y } => {
                log::debug!(
                    "Migrating segment wall ({}, {}) -> ({}, {})",
                    start_x, start_y, end_x, end_y
                );
                let mut wall = Wall::from_segment(
                    GridCoord::new(start_x, start_y),
                    GridCoord::new(end_x, end_y),
                );
                wall.id = id;
                wall
            }
        }
    }
}

/// A room: an area whose polygon defines where furniture may stand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RoomRecord", rename_all = "camelCase")]
pub struct Room {
    pub(crate) id: ElementId,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Explicit polygon in grid-corner coordinates; empty for rectangular rooms.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
}

impl Room {
    /// Create a rectangular room.
    pub fn new(anchor: GridCoord, width: u32, height: u32) -> Self {
        let footprint = Footprint::new(anchor, width, height);
        Self {
            id: new_id(),
            x: footprint.anchor.x,
            y: footprint.anchor.y,
            width: footprint.width,
            height: footprint.height,
            points: Vec::new(),
        }
    }

    /// Create a room bounded by an arbitrary polygon.
    pub fn from_polygon(points: Vec<Point>) -> Self {
        let footprint = polygon_bounds(&points);
        let mut room = Self::new(footprint.anchor, footprint.width, footprint.height);
        room.points = points;
        room
    }

    /// Vertices bounding the room interior.
    pub fn polygon(&self) -> Vec<Point> {
        if self.points.len() >= 3 {
            return self.points.clone();
        }
        let (x0, y0) = (self.x as f64, self.y as f64);
        let (x1, y1) = (x0 + self.width as f64, y0 + self.height as f64);
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ]
    }
}

impl Placeable for Room {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Room
    }

    fn footprint(&self) -> Footprint {
        Footprint::new(GridCoord::new(self.x, self.y), self.width, self.height)
    }
}

/// Cells covering a polygon's bounding box.
fn polygon_bounds(points: &[Point]) -> Footprint {
    if points.is_empty() {
        return Footprint::cell(GridCoord::default());
    }
    let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
    let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    let anchor = GridCoord::new(min_x.floor() as i32, min_y.floor() as i32);
    let width = (max_x.ceil() - min_x.floor()).max(1.0) as u32;
    let height = (max_y.ceil() - min_y.floor()).max(1.0) as u32;
    Footprint::new(anchor, width, height)
}

#[derive(Deserialize)]
struct RoomRecord {
    #[serde(default = "new_id")]
    id: ElementId,
    x: Option<i32>,
    y: Option<i32>,
    width: Option<u32>,
    height: Option<u32>,
    #[serde(default)]
    points: Vec<Point>,
}

impl From<RoomRecord> for Room {
    fn from(record: RoomRecord) -> Self {
        let mut room = match (record.x, record.y) {
            (Some(x), Some(y)) => Room::new(
                GridCoord::new(x, y),
                record.width.unwrap_or(1),
                record.height.unwrap_or(1),
            ),
            _ => Room::from_polygon(record.points.clone()),
        };
        room.id = record.id;
        room.points = record.points;
        room
    }
}

/// A door occupying one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    #[serde(default = "new_id")]
    pub(crate) id: ElementId,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "direction", default)]
    pub orientation: Orientation,
}

impl Door {
    pub fn new(at: GridCoord, orientation: Orientation) -> Self {
        Self {
            id: new_id(),
            x: at.x,
            y: at.y,
            orientation,
        }
    }
}

impl Placeable for Door {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Door
    }

    fn footprint(&self) -> Footprint {
        Footprint::cell(GridCoord::new(self.x, self.y))
    }
}

/// A window occupying one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Window {
    #[serde(default = "new_id")]
    pub(crate) id: ElementId,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "direction", default)]
    pub orientation: Orientation,
}

impl Window {
    pub fn new(at: GridCoord, orientation: Orientation) -> Self {
        Self {
            id: new_id(),
            x: at.x,
            y: at.y,
            orientation,
        }
    }
}

impl Placeable for Window {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Window
    }

    fn footprint(&self) -> Footprint {
        Footprint::cell(GridCoord::new(self.x, self.y))
    }
}
