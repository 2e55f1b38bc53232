//! Placeable element definitions for the floor plan.

mod furniture;
mod structural;

pub use furniture::{Bed, Chair, Fan, SpeedRange, Table, WallMount};
pub use structural::{Door, Orientation, Room, Wall, Window};

use crate::geometry::Footprint;
use crate::grid::GridCoord;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Generate a fresh element identifier.
pub(crate) fn new_id() -> ElementId {
    Uuid::new_v4()
}

/// The two mutually exclusive occupancy layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    /// Walls, rooms, doors and windows.
    #[default]
    Structural,
    /// Fans, chairs, tables and beds.
    Furniture,
}

impl Layer {
    /// Element kinds of this layer in hit-test priority order.
    pub fn priority(self) -> &'static [ElementKind] {
        match self {
            Layer::Structural => &[
                ElementKind::Door,
                ElementKind::Window,
                ElementKind::Wall,
                ElementKind::Room,
            ],
            Layer::Furniture => &[
                ElementKind::Fan,
                ElementKind::Chair,
                ElementKind::Table,
                ElementKind::Bed,
            ],
        }
    }
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::Structural => f.write_str("structural"),
            Layer::Furniture => f.write_str("furniture"),
        }
    }
}

/// Discriminant identifying an element variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Wall,
    Room,
    Door,
    Window,
    Fan,
    Chair,
    Table,
    Bed,
}

impl ElementKind {
    /// Layer this kind belongs to.
    pub fn layer(self) -> Layer {
        match self {
            ElementKind::Wall | ElementKind::Room | ElementKind::Door | ElementKind::Window => {
                Layer::Structural
            }
            ElementKind::Fan | ElementKind::Chair | ElementKind::Table | ElementKind::Bed => {
                Layer::Furniture
            }
        }
    }

    /// Lowercase singular name.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Wall => "wall",
            ElementKind::Room => "room",
            ElementKind::Door => "door",
            ElementKind::Window => "window",
            ElementKind::Fan => "fan",
            ElementKind::Chair => "chair",
            ElementKind::Table => "table",
            ElementKind::Bed => "bed",
        }
    }
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Compass facing used by furniture orientation and fan mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    #[default]
    #[serde(alias = "up", alias = "n")]
    N,
    #[serde(alias = "right", alias = "e")]
    E,
    #[serde(alias = "down", alias = "s")]
    S,
    #[serde(alias = "left", alias = "w")]
    W,
}

impl Facing {
    /// Cycle to the next facing (clockwise).
    pub fn next(self) -> Self {
        match self {
            Facing::N => Facing::E,
            Facing::E => Facing::S,
            Facing::S => Facing::W,
            Facing::W => Facing::N,
        }
    }

    /// The facing pointing the other way.
    pub fn opposite(self) -> Self {
        match self {
            Facing::N => Facing::S,
            Facing::E => Facing::W,
            Facing::S => Facing::N,
            Facing::W => Facing::E,
        }
    }

    /// Whether this facing belongs to the {E, W} pair.
    pub fn is_east_west(self) -> bool {
        matches!(self, Facing::E | Facing::W)
    }

    /// Unit cell step in this direction (y grows southward).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::N => (0, -1),
            Facing::E => (1, 0),
            Facing::S => (0, 1),
            Facing::W => (-1, 0),
        }
    }
}

/// Extent of an oriented element whose base extent applies when facing N/S.
pub(crate) fn oriented_extent(base: (u32, u32), facing: Facing) -> (u32, u32) {
    if facing.is_east_west() { (base.1, base.0) } else { base }
}

/// Common trait for all placeable elements.
pub trait Placeable {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// Get the variant discriminant.
    fn kind(&self) -> ElementKind;

    /// Get the block of cells covered by the element.
    fn footprint(&self) -> Footprint;

    /// Get the occupancy layer.
    fn layer(&self) -> Layer {
        self.kind().layer()
    }

    /// Get the top-left cell.
    fn anchor(&self) -> GridCoord {
        self.footprint().anchor
    }
}

/// A placeable element of any variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Wall(Wall),
    Room(Room),
    Door(Door),
    Window(Window),
    Fan(Fan),
    Chair(Chair),
    Table(Table),
    Bed(Bed),
}

impl Element {
    fn as_placeable(&self) -> &dyn Placeable {
        match self {
            Element::Wall(e) => e,
            Element::Room(e) => e,
            Element::Door(e) => e,
            Element::Window(e) => e,
            Element::Fan(e) => e,
            Element::Chair(e) => e,
            Element::Table(e) => e,
            Element::Bed(e) => e,
        }
    }

    /// Whether this element claims cells in the occupancy index.
    ///
    /// Rooms only shape the interior mask.
    pub fn occupies_cells(&self) -> bool {
        !matches!(self, Element::Room(_))
    }

    /// Facing of oriented furniture (fan air-flow for fans).
    pub fn facing(&self) -> Option<Facing> {
        match self {
            Element::Fan(f) => Some(f.airflow),
            Element::Chair(c) => Some(c.facing),
            Element::Table(t) => Some(t.facing),
            Element::Bed(b) => Some(b.facing),
            _ => None,
        }
    }
}

impl Placeable for Element {
    fn id(&self) -> ElementId {
        self.as_placeable().id()
    }

    fn kind(&self) -> ElementKind {
        self.as_placeable().kind()
    }

    fn footprint(&self) -> Footprint {
        self.as_placeable().footprint()
    }
}

macro_rules! element_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Element {
                fn from(value: $variant) -> Self {
                    Element::$variant(value)
                }
            }
        )*
    };
}

element_from!(Wall, Room, Door, Window, Fan, Chair, Table, Bed);

fn one() -> u32 {
    1
}

fn is_false(value: &bool) -> bool {
    !*value
}
