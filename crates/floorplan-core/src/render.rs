//! Renderer collaborator abstraction.

use crate::document::DesignDocument;
use crate::elements::Layer;
use crate::geometry::Footprint;
use crate::interior::RoomInteriorMask;
use crate::selection::Selection;

/// Everything a renderer needs for one redraw.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// The document to draw.
    pub document: &'a DesignDocument,
    /// Interior mask for shading room interiors.
    pub interior: Option<&'a RoomInteriorMask>,
    /// Currently selected element.
    pub selection: Option<Selection>,
    /// Layer being edited.
    pub active_layer: Layer,
    /// Live wall/room preview while dragging.
    pub preview: Option<Footprint>,
}

impl<'a> Frame<'a> {
    /// Create a frame for a document with nothing selected.
    pub fn new(document: &'a DesignDocument) -> Self {
        Self {
            document,
            interior: None,
            selection: None,
            active_layer: Layer::Structural,
            preview: None,
        }
    }

    /// Set the interior mask.
    pub fn with_interior(mut self, mask: &'a RoomInteriorMask) -> Self {
        self.interior = Some(mask);
        self
    }

    /// Set the selection.
    pub fn with_selection(mut self, selection: Option<Selection>) -> Self {
        self.selection = selection;
        self
    }

    /// Set the active layer.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.active_layer = layer;
        self
    }

    /// Set the drag preview.
    pub fn with_preview(mut self, preview: Option<Footprint>) -> Self {
        self.preview = preview;
        self
    }
}

/// Trait for rendering backends.
///
/// Called after every committed mutation, selection change and preview update.
pub trait Renderer {
    fn redraw(&mut self, frame: &Frame<'_>);
}

/// Renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn redraw(&mut self, _frame: &Frame<'_>) {}
}
