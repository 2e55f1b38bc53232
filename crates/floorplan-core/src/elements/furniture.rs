//! Furniture layer elements: fans, chairs, tables and beds.

use super::{ElementId, ElementKind, Facing, Placeable, new_id, oriented_extent};
use crate::geometry::Footprint;
use crate::grid::GridCoord;
use serde::{Deserialize, Serialize};

/// Where and how a fan is attached to a wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallMount {
    /// The wall the fan hangs on.
    pub wall: ElementId,
    /// Side of the wall the fan is on.
    pub face: Facing,
    /// Fractional position along the wall, 0.0 at its start and 1.0 at its end.
    pub offset: f64,
}

/// Supported speed levels of a fan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: u8,
    pub max: u8,
}

impl Default for SpeedRange {
    fn default() -> Self {
        Self { min: 1, max: 3 }
    }
}

fn default_rotation_range() -> f64 {
    90.0
}

fn default_airflow() -> Facing {
    Facing::S
}

/// A wall-mounted or free-standing fan occupying one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fan {
    #[serde(default = "new_id")]
    pub(crate) id: ElementId,
    pub x: i32,
    pub y: i32,
    /// Direction the air is blown towards.
    #[serde(default = "default_airflow", alias = "direction")]
    pub airflow: Facing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mount: Option<WallMount>,
    /// Oscillation sweep in degrees.
    #[serde(default = "default_rotation_range", alias = "rotation_range")]
    pub rotation_range: f64,
    #[serde(default, alias = "speed_range")]
    pub speed_range: SpeedRange,
}

impl Fan {
    /// Create a free-standing fan.
    pub fn new(at: GridCoord, airflow: Facing) -> Self {
        Self {
            id: new_id(),
            x: at.x,
            y: at.y,
            airflow,
            mount: None,
            rotation_range: default_rotation_range(),
            speed_range: SpeedRange::default(),
        }
    }

    /// Create a fan hanging on a wall, blowing away from it.
    pub fn mounted(at: GridCoord, mount: WallMount) -> Self {
        let mut fan = Self::new(at, mount.face);
        fan.mount = Some(mount);
        fan
    }
}

impl Placeable for Fan {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Fan
    }

    fn footprint(&self) -> Footprint {
        Footprint::cell(GridCoord::new(self.x, self.y))
    }
}

/// A chair occupying one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chair {
    #[serde(default = "new_id")]
    pub(crate) id: ElementId,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "direction", default)]
    pub facing: Facing,
}

impl Chair {
    pub fn new(at: GridCoord, facing: Facing) -> Self {
        Self {
            id: new_id(),
            x: at.x,
            y: at.y,
            facing,
        }
    }
}

impl Placeable for Chair {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Chair
    }

    fn footprint(&self) -> Footprint {
        Footprint::cell(GridCoord::new(self.x, self.y))
    }
}

/// Stored form of tables and beds. Missing extents follow the facing.
#[derive(Deserialize)]
struct SizedRecord {
    #[serde(default = "new_id")]
    id: ElementId,
    x: i32,
    y: i32,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(rename = "direction", default)]
    facing: Facing,
}

impl SizedRecord {
    fn extent(&self, base: (u32, u32)) -> (u32, u32) {
        let (width, height) = oriented_extent(base, self.facing);
        (self.width.unwrap_or(width), self.height.unwrap_or(height))
    }
}

/// A table, 2×1 when facing N or S.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SizedRecord")]
pub struct Table {
    pub(crate) id: ElementId,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "direction")]
    pub facing: Facing,
}

impl From<SizedRecord> for Table {
    fn from(record: SizedRecord) -> Self {
        let (width, height) = record.extent(Self::BASE_EXTENT);
        Self {
            id: record.id,
            x: record.x,
            y: record.y,
            width,
            height,
            facing: record.facing,
        }
    }
}

impl Table {
    /// Width and height when facing N or S.
    pub const BASE_EXTENT: (u32, u32) = (2, 1);

    pub fn new(at: GridCoord, facing: Facing) -> Self {
        let (width, height) = oriented_extent(Self::BASE_EXTENT, facing);
        Self {
            id: new_id(),
            x: at.x,
            y: at.y,
            width,
            height,
            facing,
        }
    }

    /// The table turned a quarter clockwise about its anchor.
    pub fn rotated(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            facing: self.facing.next(),
            ..self.clone()
        }
    }
}

impl Placeable for Table {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Table
    }

    fn footprint(&self) -> Footprint {
        Footprint::new(GridCoord::new(self.x, self.y), self.width, self.height)
    }
}

/// A bed, 2×3 when facing N or S.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SizedRecord")]
pub struct Bed {
    pub(crate) id: ElementId,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    #[serde(rename = "direction")]
    pub facing: Facing,
}

impl From<SizedRecord> for Bed {
    fn from(record: SizedRecord) -> Self {
        let (width, height) = record.extent(Self::BASE_EXTENT);
        Self {
            id: record.id,
            x: record.x,
            y: record.y,
            width,
            height,
            facing: record.facing,
        }
    }
}

impl Bed {
    /// Width and height when facing N or S.
    pub const BASE_EXTENT: (u32, u32) = (2, 3);

    pub fn new(at: GridCoord, facing: Facing) -> Self {
        let (width, height) = oriented_extent(Self::BASE_EXTENT, facing);
        Self {
            id: new_id(),
            x: at.x,
            y: at.y,
            width,
            height,
            facing,
        }
    }

    /// The bed turned a quarter clockwise about its anchor.
    pub fn rotated(&self) -> Self {
        Self {
            width: self.height,
            height: self.width,
            facing: self.facing.next(),
            ..self.clone()
        }
    }
}

impl Placeable for Bed {
    fn id(&self) -> ElementId {
        self.id
    }

    fn kind(&self) -> ElementKind {
        ElementKind::Bed
    }

    fn footprint(&self) -> Footprint {
        Footprint::new(GridCoord::new(self.x, self.y), self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_extent_follows_facing() {
        let table = Table::new(GridCoord::new(3, 3), Facing::N);
        assert_eq!((table.width, table.height), (2, 1));
        let table = Table::new(GridCoord::new(3, 3), Facing::W);
        assert_eq!((table.width, table.height), (1, 2));
    }

    #[test]
    fn test_bed_extent_follows_facing() {
        let bed = Bed::new(GridCoord::new(0, 0), Facing::S);
        assert_eq!((bed.width, bed.height), (2, 3));
        let bed = Bed::new(GridCoord::new(0, 0), Facing::E);
        assert_eq!((bed.width, bed.height), (3, 2));
    }

    #[test]
    fn test_table_rotation_swaps_extent() {
        let table = Table::new(GridCoord::new(3, 3), Facing::N);
        let turned = table.rotated();
        assert_eq!(turned.facing, Facing::E);
        assert_eq!((turned.x, turned.y, turned.width, turned.height), (3, 3, 1, 2));
        assert_eq!(turned.id(), table.id());
    }

    #[test]
    fn test_legacy_fan_fields() {
        let json = r#"{"x":2,"y":3,"direction":"down","wallAttached":true}"#;
        let fan: Fan = serde_json::from_str(json).unwrap();
        assert_eq!(fan.airflow, Facing::S);
        assert!(fan.mount.is_none());
        assert_eq!(fan.speed_range, SpeedRange { min: 1, max: 3 });
    }

    #[test]
    fn test_fan_without_direction_blows_south() {
        let fan: Fan = serde_json::from_str(r#"{"x":1,"y":1}"#).unwrap();
        assert_eq!(fan.airflow, Facing::S);
    }

    #[test]
    fn test_missing_extent_follows_facing() {
        let table: Table = serde_json::from_str(r#"{"x":1,"y":1,"direction":"E"}"#).unwrap();
        assert_eq!((table.width, table.height), (1, 2));
        let bed: Bed = serde_json::from_str(r#"{"x":1,"y":1,"direction":"left"}"#).unwrap();
        assert_eq!((bed.width, bed.height), (3, 2));
        let bed: Bed = serde_json::from_str(r#"{"x":1,"y":1}"#).unwrap();
        assert_eq!((bed.width, bed.height, bed.facing), (2, 3, Facing::N));

        // Stored extents win over the facing.
        let json = r#"{"x":0,"y":0,"width":2,"height":1,"direction":"W"}"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!((table.width, table.height), (2, 1));
    }

    #[test]
    fn test_mounted_fan_blows_away_from_wall() {
        let mount = WallMount {
            wall: new_id(),
            face: Facing::S,
            offset: 0.5,
        };
        let fan = Fan::mounted(GridCoord::new(4, 6), mount);
        assert_eq!(fan.airflow, Facing::S);
    }
}
