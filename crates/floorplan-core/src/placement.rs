//! Placement validation and same-layer overwrite.
//!
//! [`validate`] is a pure decision over the occupancy index and interior
//! mask. [`commit`] applies a validated candidate, displacing whatever
//! same-layer elements sit under it. [`PlacementEngine`] bundles both with
//! the derived views they read, so a session only ever hands it elements.

use crate::document::DesignDocument;
use crate::elements::{Element, ElementId, ElementKind, Layer, Placeable, Room};
use crate::geometry::Footprint;
use crate::grid::{GridCoord, MAX_GRID_SIZE};
use crate::index::{GridStateIndex, Occupant};
use crate::interior::RoomInteriorMask;
use thiserror::Error;

/// Why a placement was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("Out of bounds: {kind} at {anchor} ({width}x{height}) does not fit the {grid_size}x{grid_size} grid")]
    OutOfBounds {
        kind: ElementKind,
        anchor: GridCoord,
        width: u32,
        height: u32,
        grid_size: u32,
    },
    #[error("Furniture must be inside a room: cell {cell} is not")]
    RoomInteriorViolation { cell: GridCoord },
    #[error("Cell {cell} is occupied by a {blocking}")]
    ElementConflict { cell: GridCoord, blocking: ElementKind },
}

/// Outcome of a placement attempt.
pub type PlacementResult<T = Placement> = Result<T, PlacementError>;

/// A committed placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub inserted: Element,
    /// Same-layer elements displaced by the insertion.
    pub removed: Vec<Element>,
}

/// Check a candidate against the current occupancy and interior mask.
///
/// Same-layer occupants are not rejected; they are displaced by [`commit`].
pub fn validate(
    candidate: &dyn Placeable,
    index: &GridStateIndex,
    mask: &RoomInteriorMask,
    grid_size: u32,
) -> PlacementResult<()> {
    validate_footprint(candidate.kind(), candidate.footprint(), index, mask, grid_size, |_| false)
}

/// Run the full check over `footprint`, skipping occupants matching `ignore`.
fn validate_footprint(
    kind: ElementKind,
    footprint: Footprint,
    index: &GridStateIndex,
    mask: &RoomInteriorMask,
    grid_size: u32,
    ignore: impl Fn(&Occupant) -> bool,
) -> PlacementResult<()> {
    if !footprint.fits_in_grid(grid_size) {
        return Err(PlacementError::OutOfBounds {
            kind,
            anchor: footprint.anchor,
            width: footprint.width,
            height: footprint.height,
            grid_size,
        });
    }

    // Rooms are annotations over the grid and never contend for cells.
    if kind == ElementKind::Room {
        return Ok(());
    }

    let layer = kind.layer();
    if layer == Layer::Furniture {
        if let Some(cell) = footprint.cells().find(|&cell| !mask.is_interior(cell)) {
            return Err(PlacementError::RoomInteriorViolation { cell });
        }
    }

    for cell in footprint.cells() {
        match index.occupant_of(cell) {
            Some(occupant) if !ignore(&occupant) && occupant.layer() != layer => {
                return Err(PlacementError::ElementConflict {
                    cell,
                    blocking: occupant.kind,
                });
            }
            _ => {}
        }
    }
    Ok(())
}

/// Insert a validated candidate, displacing same-layer occupants.
///
/// Must only be called after [`validate`] succeeded for the same state.
pub fn commit(
    candidate: Element,
    document: &mut DesignDocument,
    index: &mut GridStateIndex,
) -> Placement {
    let mut removed = Vec::new();
    if candidate.occupies_cells() {
        for occupant in index.occupants_in(candidate.footprint()) {
            if let Some(element) = document.remove(occupant.id) {
                index.clear_footprint(element.footprint(), occupant.id);
                log::debug!("Displaced {} {}", element.kind(), occupant.id);
                removed.push(element);
            } else {
                // Stale entry; the document is the system of record.
                index.clear_element(occupant.id);
            }
        }
    }

    index.insert_element(&candidate);
    document.push(candidate.clone());
    Placement {
        inserted: candidate,
        removed,
    }
}

/// The occupancy index and interior mask for one document.
#[derive(Debug, Clone, Default)]
pub struct PlacementEngine {
    index: GridStateIndex,
    mask: RoomInteriorMask,
    grid_size: u32,
}

impl PlacementEngine {
    /// Build the derived views for a document.
    pub fn from_document(document: &DesignDocument) -> Self {
        let mut engine = Self::default();
        engine.resync_from_document(document);
        engine
    }

    pub fn index(&self) -> &GridStateIndex {
        &self.index
    }

    pub fn mask(&self) -> &RoomInteriorMask {
        &self.mask
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Validate and commit a candidate element.
    ///
    /// On error neither the document nor the index is touched.
    pub fn submit_placement(
        &mut self,
        document: &mut DesignDocument,
        candidate: Element,
    ) -> PlacementResult {
        if let Err(err) = validate(&candidate, &self.index, &self.mask, self.grid_size) {
            log::warn!("Rejected {} at {}: {}", candidate.kind(), candidate.anchor(), err);
            return Err(err);
        }

        let is_room = candidate.kind() == ElementKind::Room;
        let placement = commit(candidate, document, &mut self.index);
        log::info!(
            "Placed {} at {} (displaced {})",
            placement.inserted.kind(),
            placement.inserted.anchor(),
            placement.removed.len()
        );
        if is_room {
            self.recompute_room_interiors(&document.base_layer.rooms);
        }
        Ok(placement)
    }

    /// Recompute the interior mask after the room set changed.
    pub fn recompute_room_interiors(&mut self, rooms: &[Room]) {
        self.mask = RoomInteriorMask::recompute(rooms, self.grid_size);
    }

    /// Rebuild every derived view after a bulk document change.
    ///
    /// The grid is capped at [`MAX_GRID_SIZE`]; callers loading foreign
    /// documents run [`DesignDocument::constrain_to_grid`] first.
    pub fn resync_from_document(&mut self, document: &DesignDocument) {
        self.grid_size = document.grid_size.min(MAX_GRID_SIZE);
        self.index.rebuild(document);
        self.recompute_room_interiors(&document.base_layer.rooms);

        let overlaps = document.layer_overlaps();
        if !overlaps.is_empty() {
            log::warn!(
                "Loaded document has {} cells claimed by both layers",
                overlaps.len()
            );
        }
    }

    /// Remove an element by ID.
    pub fn remove_element(
        &mut self,
        document: &mut DesignDocument,
        id: ElementId,
    ) -> Option<Element> {
        let element = document.remove(id)?;
        self.index.clear_footprint(element.footprint(), id);
        if element.kind() == ElementKind::Room {
            self.recompute_room_interiors(&document.base_layer.rooms);
        }
        log::info!("Removed {} {}", element.kind(), id);
        Some(element)
    }

    /// Swap an element for a reshaped version of itself, returning the
    /// previous version. `Ok(None)` if no element has that ID.
    ///
    /// A new footprint gets the full validation, ignoring the element's
    /// own cells. Overlap with another same-layer element is a conflict
    /// here; reshaping never displaces. An unchanged footprint (a chair or
    /// fan turning in place) is written straight through.
    pub fn replace_element(
        &mut self,
        document: &mut DesignDocument,
        updated: Element,
    ) -> PlacementResult<Option<Element>> {
        let id = updated.id();
        let Some(previous) = document.get(id) else {
            return Ok(None);
        };

        let footprint = updated.footprint();
        if footprint == previous.footprint() {
            document.replace(updated);
            log::debug!("Turned {} {} in place", previous.kind(), id);
            return Ok(Some(previous));
        }
        validate_footprint(
            updated.kind(),
            footprint,
            &self.index,
            &self.mask,
            self.grid_size,
            |occupant| occupant.id == id,
        )?;
        if updated.occupies_cells() {
            if let Some(other) = self
                .index
                .occupants_in(footprint)
                .into_iter()
                .find(|occupant| occupant.id != id)
            {
                let cell = footprint
                    .cells()
                    .find(|&cell| self.index.occupant_of(cell) == Some(other))
                    .unwrap_or(footprint.anchor);
                return Err(PlacementError::ElementConflict {
                    cell,
                    blocking: other.kind,
                });
            }
        }

        self.index.clear_footprint(previous.footprint(), id);
        self.index.insert_element(&updated);
        document.replace(updated.clone());
        log::info!("Reshaped {} {}", updated.kind(), id);
        Ok(Some(previous))
    }
}
