//! Hit testing and the current selection.

use crate::document::DesignDocument;
use crate::elements::{ElementId, ElementKind, Layer, Placeable};
use crate::grid::GridCoord;

/// Tolerance in cells around walls migrated from line segments.
pub const LEGACY_WALL_MARGIN: i64 = 1;

/// A selected element and where it sits in its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub id: ElementId,
    pub kind: ElementKind,
    /// Index within the element's sequence at the time of selection.
    pub index: usize,
}

/// Find the element under `cell` on `layer`.
///
/// Kinds are tried in the layer's priority order; within a kind the most
/// recently added element wins.
pub fn hit_test(document: &DesignDocument, layer: Layer, cell: GridCoord) -> Option<Selection> {
    layer
        .priority()
        .iter()
        .find_map(|&kind| hit_test_kind(document, kind, cell))
}

fn hit_test_kind(
    document: &DesignDocument,
    kind: ElementKind,
    cell: GridCoord,
) -> Option<Selection> {
    if kind == ElementKind::Wall {
        let walls = &document.base_layer.walls;
        return walls.iter().enumerate().rev().find_map(|(index, wall)| {
            let margin = if wall.legacy_segment { LEGACY_WALL_MARGIN } else { 0 };
            wall.footprint()
                .contains_with_margin(cell, margin)
                .then(|| Selection { id: wall.id(), kind, index })
        });
    }

    let count = document.count(kind);
    document
        .iter_kind(kind)
        .rev()
        .zip((0..count).rev())
        .find(|(element, _)| element.footprint().contains(cell))
        .map(|(element, index)| Selection {
            id: element.id(),
            kind,
            index,
        })
}
