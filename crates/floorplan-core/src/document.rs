//! The design document: the persisted entity graph of a floor plan.

use crate::elements::{
    Bed, Chair, Door, Element, ElementId, ElementKind, Fan, Placeable, Room, Table, Wall, Window,
};
use crate::grid::{DEFAULT_CELL_SIZE, DEFAULT_GRID_SIZE, GridCoord, MAX_GRID_SIZE};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Walls, rooms, doors and windows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuralLayer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub walls: Vec<Wall>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rooms: Vec<Room>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub doors: Vec<Door>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub windows: Vec<Window>,
}

/// Fans, chairs, tables and beds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FurnitureLayer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub fans: Vec<Fan>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub chairs: Vec<Chair>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tables: Vec<Table>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub beds: Vec<Bed>,
}

/// Read-only annotation layer drawn over the plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayLayer {
    #[serde(default)]
    pub heatmap: Option<Heatmap>,
}

/// A rows × cols grid of measured values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heatmap {
    pub rows: usize,
    pub cols: usize,
    pub values: Vec<Vec<f64>>,
    pub min: f64,
    pub max: f64,
    #[serde(default)]
    pub unit: String,
}

impl Heatmap {
    /// Raw value at a cell, if present.
    pub fn value_at(&self, row: usize, col: usize) -> Option<f64> {
        self.values.get(row)?.get(col).copied()
    }

    /// Value at a cell scaled into `[0, 1]` using the declared min/max.
    pub fn normalized_at(&self, row: usize, col: usize) -> Option<f64> {
        let value = self.value_at(row, col)?;
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            return Some(0.0);
        }
        Some(((value - self.min) / span).clamp(0.0, 1.0))
    }
}

fn default_grid_size() -> u32 {
    DEFAULT_GRID_SIZE
}

fn default_cell_size() -> f64 {
    DEFAULT_CELL_SIZE
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A floor-plan design: two element layers plus an optional overlay.
///
/// Accepts both camelCase and snake_case field names on load; always
/// writes camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDocument {
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "base_layer", deserialize_with = "null_as_default")]
    pub base_layer: StructuralLayer,
    #[serde(default, alias = "furniture_layer", deserialize_with = "null_as_default")]
    pub furniture_layer: FurnitureLayer,
    #[serde(default, alias = "overlay_layer", deserialize_with = "null_as_default")]
    pub overlay_layer: OverlayLayer,
    /// Cells along each side of the grid.
    #[serde(default = "default_grid_size", alias = "grid_size")]
    pub grid_size: u32,
    /// Cell size in logical pixels.
    #[serde(default = "default_cell_size", alias = "cell_size", alias = "grid_cell_size")]
    pub cell_size: f64,
}

impl Default for DesignDocument {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE, DEFAULT_CELL_SIZE)
    }
}

macro_rules! with_sequence {
    ($doc:expr, $kind:expr, |$seq:ident| $body:expr) => {
        match $kind {
            ElementKind::Wall => { let $seq = &$doc.base_layer.walls; $body }
            ElementKind::Room => { let $seq = &$doc.base_layer.rooms; $body }
            ElementKind::Door => { let $seq = &$doc.base_layer.doors; $body }
            ElementKind::Window => { let $seq = &$doc.base_layer.windows; $body }
            ElementKind::Fan => { let $seq = &$doc.furniture_layer.fans; $body }
            ElementKind::Chair => { let $seq = &$doc.furniture_layer.chairs; $body }
            ElementKind::Table => { let $seq = &$doc.furniture_layer.tables; $body }
            ElementKind::Bed => { let $seq = &$doc.furniture_layer.beds; $body }
        }
    };
}

macro_rules! with_sequence_mut {
    ($doc:expr, $kind:expr, |$seq:ident| $body:expr) => {
        match $kind {
            ElementKind::Wall => { let $seq = &mut $doc.base_layer.walls; $body }
            ElementKind::Room => { let $seq = &mut $doc.base_layer.rooms; $body }
            ElementKind::Door => { let $seq = &mut $doc.base_layer.doors; $body }
            ElementKind::Window => { let $seq = &mut $doc.base_layer.windows; $body }
            ElementKind::Fan => { let $seq = &mut $doc.furniture_layer.fans; $body }
            ElementKind::Chair => { let $seq = &mut $doc.furniture_layer.chairs; $body }
            ElementKind::Table => { let $seq = &mut $doc.furniture_layer.tables; $body }
            ElementKind::Bed => { let $seq = &mut $doc.furniture_layer.beds; $body }
        }
    };
}

const ALL_KINDS: [ElementKind; 8] = [
    ElementKind::Wall,
    ElementKind::Room,
    ElementKind::Door,
    ElementKind::Window,
    ElementKind::Fan,
    ElementKind::Chair,
    ElementKind::Table,
    ElementKind::Bed,
];

impl DesignDocument {
    /// Create an empty document.
    pub fn new(grid_size: u32, cell_size: f64) -> Self {
        Self {
            name: None,
            base_layer: StructuralLayer::default(),
            furniture_layer: FurnitureLayer::default(),
            overlay_layer: OverlayLayer::default(),
            grid_size,
            cell_size,
        }
    }

    /// Append an element to the end of its sequence.
    pub fn push(&mut self, element: Element) {
        match element {
            Element::Wall(e) => self.base_layer.walls.push(e),
            Element::Room(e) => self.base_layer.rooms.push(e),
            Element::Door(e) => self.base_layer.doors.push(e),
            Element::Window(e) => self.base_layer.windows.push(e),
            Element::Fan(e) => self.furniture_layer.fans.push(e),
            Element::Chair(e) => self.furniture_layer.chairs.push(e),
            Element::Table(e) => self.furniture_layer.tables.push(e),
            Element::Bed(e) => self.furniture_layer.beds.push(e),
        }
    }

    /// Replace the stored element that has the same ID.
    /// Returns false if no such element exists.
    pub fn replace(&mut self, element: Element) -> bool {
        let Some((kind, index)) = self.position(element.id()) else {
            return false;
        };
        if kind != element.kind() {
            return false;
        }
        match element {
            Element::Wall(e) => self.base_layer.walls[index] = e,
            Element::Room(e) => self.base_layer.rooms[index] = e,
            Element::Door(e) => self.base_layer.doors[index] = e,
            Element::Window(e) => self.base_layer.windows[index] = e,
            Element::Fan(e) => self.furniture_layer.fans[index] = e,
            Element::Chair(e) => self.furniture_layer.chairs[index] = e,
            Element::Table(e) => self.furniture_layer.tables[index] = e,
            Element::Bed(e) => self.furniture_layer.beds[index] = e,
        }
        true
    }

    /// Find the sequence and index holding an element.
    pub fn position(&self, id: ElementId) -> Option<(ElementKind, usize)> {
        ALL_KINDS.into_iter().find_map(|kind| {
            with_sequence!(self, kind, |seq| seq.iter().position(|e| e.id() == id))
                .map(|index| (kind, index))
        })
    }

    /// Get a copy of the element at `index` in the sequence for `kind`.
    pub fn element_at(&self, kind: ElementKind, index: usize) -> Option<Element> {
        with_sequence!(self, kind, |seq| seq.get(index).cloned().map(Element::from))
    }

    /// Get a copy of an element by ID.
    pub fn get(&self, id: ElementId) -> Option<Element> {
        let (kind, index) = self.position(id)?;
        self.element_at(kind, index)
    }

    /// Remove an element by ID.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let (kind, index) = self.position(id)?;
        self.remove_at(kind, index)
    }

    /// Remove the element at `index` in the sequence for `kind`.
    pub fn remove_at(&mut self, kind: ElementKind, index: usize) -> Option<Element> {
        with_sequence_mut!(self, kind, |seq| {
            (index < seq.len()).then(|| Element::from(seq.remove(index)))
        })
    }

    /// Number of elements in the sequence for `kind`.
    pub fn count(&self, kind: ElementKind) -> usize {
        with_sequence!(self, kind, |seq| seq.len())
    }

    /// Iterate over every element in a sequence, back to front.
    pub fn iter_kind(
        &self,
        kind: ElementKind,
    ) -> Box<dyn DoubleEndedIterator<Item = &dyn Placeable> + '_> {
        with_sequence!(self, kind, |seq| Box::new(seq.iter().map(|e| e as &dyn Placeable)))
    }

    /// Iterate over every element of both layers, structural first.
    pub fn placeables(&self) -> impl Iterator<Item = &dyn Placeable> {
        ALL_KINDS.into_iter().flat_map(move |kind| self.iter_kind(kind))
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        ALL_KINDS.iter().map(|&kind| self.count(kind)).sum()
    }

    /// Check if the document has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every element; the overlay and grid settings are kept.
    pub fn clear(&mut self) {
        self.base_layer = StructuralLayer::default();
        self.furniture_layer = FurnitureLayer::default();
    }

    /// Cells claimed by elements of both layers at once.
    ///
    /// Always empty for documents built through the placement engine;
    /// externally loaded documents are checked with this.
    pub fn layer_overlaps(&self) -> Vec<GridCoord> {
        let mut claims: HashMap<GridCoord, ElementKind> = HashMap::new();
        let mut overlaps = Vec::new();
        for element in self.placeables() {
            if element.kind() == ElementKind::Room {
                continue;
            }
            for cell in element.footprint().cells() {
                match claims.get(&cell) {
                    Some(existing) if existing.layer() != element.layer() => overlaps.push(cell),
                    Some(_) => {}
                    None => {
                        claims.insert(cell, element.kind());
                    }
                }
            }
        }
        overlaps.sort();
        overlaps.dedup();
        overlaps
    }

    /// Bring an externally loaded document inside its own grid.
    ///
    /// A missing or oversized grid falls back to the default or is capped at
    /// [`MAX_GRID_SIZE`], an unusable cell size falls back to the default,
    /// and every element that no longer fits the grid is dropped. Returns
    /// the dropped elements.
    pub fn constrain_to_grid(&mut self) -> Vec<Element> {
        if self.grid_size == 0 {
            log::warn!("Design has no grid size, using {}", DEFAULT_GRID_SIZE);
            self.grid_size = DEFAULT_GRID_SIZE;
        } else if self.grid_size > MAX_GRID_SIZE {
            log::warn!("Grid size {} capped at {}", self.grid_size, MAX_GRID_SIZE);
            self.grid_size = MAX_GRID_SIZE;
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            log::warn!("Cell size {} replaced by {}", self.cell_size, DEFAULT_CELL_SIZE);
            self.cell_size = DEFAULT_CELL_SIZE;
        }

        let grid_size = self.grid_size;
        let mut dropped = Vec::new();
        for kind in ALL_KINDS {
            let outside: Vec<usize> = self
                .iter_kind(kind)
                .enumerate()
                .filter(|(_, element)| !element.footprint().fits_in_grid(grid_size))
                .map(|(index, _)| index)
                .collect();
            for index in outside.into_iter().rev() {
                if let Some(element) = self.remove_at(kind, index) {
                    log::warn!(
                        "Dropped {} at {} outside the {}x{} grid",
                        element.kind(),
                        element.anchor(),
                        grid_size,
                        grid_size
                    );
                    dropped.push(element);
                }
            }
        }
        dropped
    }

    /// Serialize the document to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
