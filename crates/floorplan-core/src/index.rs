//! Cell occupancy index derived from a design document.

use crate::document::DesignDocument;
use crate::elements::{ElementId, ElementKind, Layer, Placeable};
use crate::geometry::Footprint;
use crate::grid::GridCoord;
use std::collections::HashMap;

/// The element claiming a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occupant {
    pub id: ElementId,
    pub kind: ElementKind,
}

impl Occupant {
    pub fn new(id: ElementId, kind: ElementKind) -> Self {
        Self { id, kind }
    }

    /// Create an occupant record for an element.
    pub fn of(element: &dyn Placeable) -> Self {
        Self::new(element.id(), element.kind())
    }

    pub fn layer(&self) -> Layer {
        self.kind.layer()
    }
}

/// Map from cell to the element occupying it.
///
/// Rooms never appear here; they only shape the interior mask.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridStateIndex {
    cells: HashMap<GridCoord, Occupant>,
}

impl GridStateIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from scratch.
    pub fn from_document(document: &DesignDocument) -> Self {
        let mut index = Self::new();
        index.rebuild(document);
        index
    }

    /// Clear and repopulate from every element in the document.
    /// Later writes for a cell overwrite earlier ones.
    pub fn rebuild(&mut self, document: &DesignDocument) {
        self.cells.clear();
        for element in document.placeables() {
            self.insert_element(element);
        }
        log::debug!("Rebuilt occupancy index: {} cells", self.cells.len());
    }

    pub fn occupant_of(&self, coord: GridCoord) -> Option<Occupant> {
        self.cells.get(&coord).copied()
    }

    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    pub fn set(&mut self, coord: GridCoord, occupant: Occupant) {
        self.cells.insert(coord, occupant);
    }

    pub fn clear(&mut self, coord: GridCoord) -> Option<Occupant> {
        self.cells.remove(&coord)
    }

    /// Write every cell of an element. Rooms are skipped.
    pub fn insert_element(&mut self, element: &dyn Placeable) {
        if element.kind() == ElementKind::Room {
            return;
        }
        let occupant = Occupant::of(element);
        for cell in element.footprint().cells() {
            self.set(cell, occupant);
        }
    }

    /// Clear every cell claimed by `id` within `footprint`.
    pub fn clear_footprint(&mut self, footprint: Footprint, id: ElementId) {
        for cell in footprint.cells() {
            if self.occupant_of(cell).is_some_and(|o| o.id == id) {
                self.clear(cell);
            }
        }
    }

    /// Clear every cell claimed by `id`, wherever it is.
    pub fn clear_element(&mut self, id: ElementId) {
        self.cells.retain(|_, occupant| occupant.id != id);
    }

    /// Distinct occupants of a footprint, in row-major encounter order.
    pub fn occupants_in(&self, footprint: Footprint) -> Vec<Occupant> {
        let mut found: Vec<Occupant> = Vec::new();
        for cell in footprint.cells() {
            if let Some(occupant) = self.occupant_of(cell) {
                if !found.contains(&occupant) {
                    found.push(occupant);
                }
            }
        }
        found
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over occupied cells.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, Occupant)> + '_ {
        self.cells.iter().map(|(coord, occupant)| (*coord, *occupant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{Chair, Facing, Room, Table, Wall};

    fn sample_document() -> DesignDocument {
        let mut doc = DesignDocument::default();
        doc.push(Room::new(GridCoord::new(0, 0), 10, 10).into());
        doc.push(Wall::new(Footprint::new(GridCoord::new(0, 0), 5, 1)).into());
        doc.push(Table::new(GridCoord::new(2, 2), Facing::N).into());
        doc
    }

    #[test]
    fn test_rebuild_skips_rooms() {
        let index = GridStateIndex::from_document(&sample_document());
        assert_eq!(index.len(), 7);
        assert_eq!(index.occupant_of(GridCoord::new(3, 2)).unwrap().kind, ElementKind::Table);
        assert_eq!(index.occupant_of(GridCoord::new(4, 0)).unwrap().layer(), Layer::Structural);
        assert!(index.occupant_of(GridCoord::new(8, 8)).is_none());
    }

    #[test]
    fn test_clear_element() {
        let doc = sample_document();
        let mut index = GridStateIndex::from_document(&doc);
        let table_id = doc.furniture_layer.tables[0].id();
        index.clear_element(table_id);
        assert!(!index.is_occupied(GridCoord::new(2, 2)));
        assert!(!index.is_occupied(GridCoord::new(3, 2)));
        assert_eq!(index.len(), 5);
    }

    #[test]
    fn test_occupants_in_are_distinct() {
        let mut doc = DesignDocument::default();
        let chair = Chair::new(GridCoord::new(4, 4), Facing::N);
        doc.push(Table::new(GridCoord::new(2, 4), Facing::N).into());
        doc.push(chair.clone().into());
        let index = GridStateIndex::from_document(&doc);

        let found = index.occupants_in(Footprint::new(GridCoord::new(2, 4), 3, 1));
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].kind, ElementKind::Table);
        assert_eq!(found[1], Occupant::of(&chair));
    }

    #[test]
    fn test_clear_footprint_only_touches_owner() {
        let mut index = GridStateIndex::new();
        let chair = Chair::new(GridCoord::new(1, 1), Facing::N);
        let other = Chair::new(GridCoord::new(2, 1), Facing::N);
        index.insert_element(&chair);
        index.insert_element(&other);
        index.clear_footprint(Footprint::new(GridCoord::new(1, 1), 2, 1), chair.id());
        assert!(!index.is_occupied(GridCoord::new(1, 1)));
        assert!(index.is_occupied(GridCoord::new(2, 1)));
    }
}
