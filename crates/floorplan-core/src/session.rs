//! Editing session: owns the document and drives the tools against it.
//!
//! One session exists per open design. Pointer gestures come in as screen
//! points, are mapped to cells through the cached surface rectangle, and
//! are turned into placements by the [`ToolManager`]. Every committed
//! mutation is written to the local cache and followed by a redraw.

use crate::config::EditorConfig;
use crate::document::DesignDocument;
use crate::elements::{
    Bed, Chair, Door, Element, ElementKind, Facing, Fan, Layer, Placeable, Room, Table, Wall,
    Window,
};
use crate::geometry::Footprint;
use crate::grid::{GridCoord, SurfaceTransform};
use crate::mount::resolve_fan_mount;
use crate::placement::{Placement, PlacementEngine, PlacementError};
use crate::render::{Frame, NullRenderer, Renderer};
use crate::selection::{Selection, hit_test};
use crate::snap::detect_opening_orientation;
use crate::storage::LocalCache;
use crate::tools::{ToolIntent, ToolKind, ToolManager};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced to the user during editing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error(transparent)]
    Placement(#[from] PlacementError),
    #[error("A fan must be placed on a wall or next to one (cell {cell})")]
    FanRequiresWall { cell: GridCoord },
    #[error("Nothing is selected")]
    NothingSelected,
    #[error("Only furniture can be rotated, not a {0}")]
    NotFurniture(ElementKind),
    #[error("Cannot rotate {kind}: {source}")]
    RotationBlocked {
        kind: ElementKind,
        #[source]
        source: PlacementError,
    },
}

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Info,
    Warning,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

/// What a gesture event did.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    /// Outside the grid, or no gesture in progress.
    Ignored,
    /// A drag is in progress; carries the live preview.
    Drawing(Footprint),
    /// A hit test ran.
    Selected(Option<Selection>),
    /// An element was committed.
    Placed(Placement),
}

/// Result of a gesture event.
pub type GestureResult = Result<GestureOutcome, EditError>;

/// One editing session over one design document.
pub struct EditingSession<R: Renderer = NullRenderer> {
    config: EditorConfig,
    document: DesignDocument,
    engine: PlacementEngine,
    tools: ToolManager,
    selection: Option<Selection>,
    active_layer: Layer,
    surface: SurfaceTransform,
    renderer: R,
    cache: Option<Box<dyn LocalCache>>,
    notifications: Vec<Notification>,
}

impl EditingSession<NullRenderer> {
    /// Create a headless session with an empty document.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_renderer(config, NullRenderer)
    }
}

impl<R: Renderer> EditingSession<R> {
    /// Create a session drawing through `renderer`.
    pub fn with_renderer(config: EditorConfig, renderer: R) -> Self {
        let document = DesignDocument::new(config.grid_size, config.cell_size);
        let engine = PlacementEngine::from_document(&document);
        let mut surface = SurfaceTransform::new(config.grid_size, config.cell_size);
        if let Some(rect) = config.default_surface {
            surface.set_surface_rect(rect);
        }
        Self {
            config,
            document,
            engine,
            tools: ToolManager::new(),
            selection: None,
            active_layer: Layer::Structural,
            surface,
            renderer,
            cache: None,
            notifications: Vec::new(),
        }
    }

    /// Attach a local cache written after every committed mutation.
    pub fn with_cache(mut self, cache: Box<dyn LocalCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn document(&self) -> &DesignDocument {
        &self.document
    }

    pub fn engine(&self) -> &PlacementEngine {
        &self.engine
    }

    pub fn tools(&self) -> &ToolManager {
        &self.tools
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn active_layer(&self) -> Layer {
        self.active_layer
    }

    pub fn surface(&self) -> &SurfaceTransform {
        &self.surface
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Drain pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Switch tools. Tools bound to the other layer switch the layer too.
    pub fn set_tool(&mut self, tool: ToolKind) {
        log::debug!("Tool: {:?}", tool);
        self.tools.set_tool(tool);
        if let Some(layer) = tool.layer() {
            if layer != self.active_layer {
                self.active_layer = layer;
                self.selection = None;
            }
        }
        self.redraw();
    }

    /// Switch the active layer and pick its default tool.
    pub fn set_layer(&mut self, layer: Layer) {
        log::debug!("Layer: {}", layer);
        self.active_layer = layer;
        self.tools.set_tool(ToolKind::default_for(layer));
        self.selection = None;
        self.redraw();
    }

    /// Facing for new chairs, tables and beds.
    pub fn set_facing(&mut self, facing: Facing) {
        self.tools.facing = facing;
    }

    /// Wall side and position for fans dropped onto a wall.
    pub fn set_mount(&mut self, face: Facing, offset: f64) {
        self.tools.mount_face = face;
        self.tools.mount_offset = offset.clamp(0.0, 1.0);
    }

    /// Cache the surface rectangle reported by the host.
    pub fn set_surface_rect(&mut self, rect: Rect) {
        self.surface.set_surface_rect(rect);
    }

    /// Forget the cached surface rectangle after a layout change.
    pub fn invalidate_surface(&mut self) {
        self.surface.invalidate();
    }

    fn cell_at(&self, screen: Point) -> Option<GridCoord> {
        let cell = self.surface.screen_to_cell(screen);
        if self.surface.contains(cell) {
            Some(cell)
        } else {
            log::debug!("Ignoring gesture outside the grid at {}", cell);
            None
        }
    }

    /// Start a gesture at a screen point.
    pub fn gesture_begin(&mut self, screen: Point) -> GestureResult {
        let Some(cell) = self.cell_at(screen) else {
            return Ok(GestureOutcome::Ignored);
        };
        log::debug!("Gesture begin at {} with {:?}", cell, self.tools.current_tool);

        match self.tools.begin(cell) {
            None => {
                self.redraw();
                Ok(self.tools.preview().map_or(GestureOutcome::Ignored, GestureOutcome::Drawing))
            }
            Some(ToolIntent::Select(cell)) => {
                let hit = hit_test(&self.document, self.active_layer, cell);
                self.tools.selected(hit);
                self.selection = hit;
                if let Some(selection) = hit {
                    log::debug!("Selected {} #{}", selection.kind, selection.index);
                }
                self.redraw();
                Ok(GestureOutcome::Selected(hit))
            }
            Some(ToolIntent::Stamp { tool, cell }) => self.stamp(tool, cell),
            Some(ToolIntent::Draw { tool, footprint }) => self.draw(tool, footprint),
        }
    }

    /// Move the current gesture.
    pub fn gesture_move(&mut self, screen: Point) -> GestureResult {
        if !self.tools.is_active() {
            return Ok(GestureOutcome::Ignored);
        }
        let Some(cell) = self.cell_at(screen) else {
            return Ok(GestureOutcome::Ignored);
        };
        match self.tools.update(cell) {
            Some(preview) => {
                self.redraw();
                Ok(GestureOutcome::Drawing(preview))
            }
            None => Ok(GestureOutcome::Ignored),
        }
    }

    /// Finish the current gesture.
    pub fn gesture_end(&mut self, screen: Point) -> GestureResult {
        let Some(cell) = self.cell_at(screen) else {
            return Ok(GestureOutcome::Ignored);
        };
        log::debug!("Gesture end at {}", cell);
        match self.tools.end(cell) {
            Some(ToolIntent::Draw { tool, footprint }) => self.draw(tool, footprint),
            Some(ToolIntent::Stamp { tool, cell }) => self.stamp(tool, cell),
            Some(ToolIntent::Select(_)) | None => Ok(GestureOutcome::Ignored),
        }
    }

    /// Abandon the current gesture.
    pub fn gesture_cancel(&mut self) {
        if self.tools.is_active() {
            log::debug!("Gesture cancelled");
            self.tools.cancel();
            self.redraw();
        }
    }

    fn draw(&mut self, tool: ToolKind, footprint: Footprint) -> GestureResult {
        let candidate: Element = match tool {
            ToolKind::Wall => Wall::new(footprint).into(),
            ToolKind::Room => Room::new(footprint.anchor, footprint.width, footprint.height).into(),
            _ => return Ok(GestureOutcome::Ignored),
        };
        self.place(candidate)
    }

    fn stamp(&mut self, tool: ToolKind, cell: GridCoord) -> GestureResult {
        let facing = self.tools.facing;
        let candidate: Element = match tool {
            ToolKind::Door => {
                let orientation = detect_opening_orientation(cell, &self.document.base_layer.walls);
                Door::new(cell, orientation).into()
            }
            ToolKind::Window => {
                let orientation = detect_opening_orientation(cell, &self.document.base_layer.walls);
                Window::new(cell, orientation).into()
            }
            ToolKind::Fan => {
                let resolved = resolve_fan_mount(
                    cell,
                    &self.document.base_layer.walls,
                    self.tools.mount_face,
                    self.tools.mount_offset,
                );
                match resolved {
                    Some(resolved) => Fan::mounted(resolved.cell, resolved.mount).into(),
                    None => return self.reject(EditError::FanRequiresWall { cell }),
                }
            }
            ToolKind::Chair => Chair::new(cell, facing).into(),
            ToolKind::Table => Table::new(cell, facing).into(),
            ToolKind::Bed => Bed::new(cell, facing).into(),
            ToolKind::Select | ToolKind::Wall | ToolKind::Room => {
                return Ok(GestureOutcome::Ignored);
            }
        };
        self.place(candidate)
    }

    fn place(&mut self, candidate: Element) -> GestureResult {
        match self.engine.submit_placement(&mut self.document, candidate) {
            Ok(placement) => {
                self.refresh_selection();
                self.persist();
                self.redraw();
                Ok(GestureOutcome::Placed(placement))
            }
            Err(err) => {
                self.redraw();
                self.reject(err.into())
            }
        }
    }

    fn reject<T>(&mut self, err: EditError) -> Result<T, EditError> {
        log::warn!("{}", err);
        self.notify(NotificationLevel::Warning, err.to_string());
        Err(err)
    }

    fn notify(&mut self, level: NotificationLevel, message: String) {
        self.notifications.push(Notification { level, message });
    }

    /// Drop the selection if its element is gone and refresh its index.
    fn refresh_selection(&mut self) {
        self.selection = self.selection.and_then(|selection| {
            let (kind, index) = self.document.position(selection.id)?;
            Some(Selection { kind, index, ..selection })
        });
    }

    /// Delete the selected element.
    pub fn delete_selected(&mut self) -> Result<Element, EditError> {
        let Some(selection) = self.selection.take() else {
            self.notify(NotificationLevel::Info, EditError::NothingSelected.to_string());
            return Err(EditError::NothingSelected);
        };
        let Some(removed) = self.engine.remove_element(&mut self.document, selection.id) else {
            return self.reject(EditError::NothingSelected);
        };
        self.notify(NotificationLevel::Info, format!("Deleted {}", removed.kind()));
        self.persist();
        self.redraw();
        Ok(removed)
    }

    /// Rotate the selected furniture a quarter turn clockwise.
    ///
    /// Tables and beds swap width and height; the new footprint must pass
    /// placement validation without displacing anything. Chairs and fans
    /// only change facing.
    pub fn rotate_selected(&mut self) -> Result<Element, EditError> {
        let Some(selection) = self.selection else {
            self.notify(NotificationLevel::Info, EditError::NothingSelected.to_string());
            return Err(EditError::NothingSelected);
        };
        let Some(element) = self.document.get(selection.id) else {
            self.selection = None;
            return self.reject(EditError::NothingSelected);
        };

        let kind = element.kind();
        let rotated: Element = match element {
            Element::Chair(chair) => Chair {
                facing: chair.facing.next(),
                ..chair
            }
            .into(),
            Element::Fan(fan) => Fan {
                airflow: fan.airflow.next(),
                ..fan
            }
            .into(),
            Element::Table(table) => table.rotated().into(),
            Element::Bed(bed) => bed.rotated().into(),
            _ => return self.reject(EditError::NotFurniture(kind)),
        };

        match self.engine.replace_element(&mut self.document, rotated.clone()) {
            Ok(Some(_)) => {
                log::info!("Rotated {} to {:?}", kind, rotated.facing());
                self.persist();
                self.redraw();
                Ok(rotated)
            }
            Ok(None) => self.reject(EditError::NothingSelected),
            Err(source) => self.reject(EditError::RotationBlocked { kind, source }),
        }
    }

    /// Replace the document wholesale and rebuild derived state.
    ///
    /// Elements outside the document's grid are dropped with a warning.
    pub fn load_document(&mut self, mut document: DesignDocument) {
        let dropped = document.constrain_to_grid();
        if !dropped.is_empty() {
            self.notify(
                NotificationLevel::Warning,
                format!("Dropped {} elements outside the grid", dropped.len()),
            );
        }
        log::info!(
            "Loading design {:?}: {} elements on a {}x{} grid",
            document.name,
            document.len(),
            document.grid_size,
            document.grid_size
        );
        self.tools.cancel();
        self.selection = None;
        self.surface.grid_size = document.grid_size;
        self.surface.cell_size = document.cell_size;
        self.document = document;
        self.engine.resync_from_document(&self.document);
        self.persist();
        self.redraw();
    }

    /// Restore the working design from the local cache.
    ///
    /// Returns whether a cached design was found. Cache failures are logged
    /// and treated as an empty cache.
    pub fn restore(&mut self) -> bool {
        let Some(cache) = self.cache.as_ref() else {
            return false;
        };
        match cache.get(&self.config.cache_key) {
            Ok(Some(document)) => {
                self.load_document(document);
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::warn!("Failed to read cached design: {}", e);
                false
            }
        }
    }

    fn persist(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            if let Err(e) = cache.set(&self.config.cache_key, &self.document) {
                log::warn!("Failed to cache design: {}", e);
            }
        }
    }

    fn redraw(&mut self) {
        let frame = Frame::new(&self.document)
            .with_interior(self.engine.mask())
            .with_selection(self.selection)
            .with_layer(self.active_layer)
            .with_preview(self.tools.preview());
        self.renderer.redraw(&frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CURRENT_DESIGN_KEY;
    use crate::storage::{FileCache, MemoryCache};

    fn at(x: i32, y: i32) -> Point {
        Point::new((x as f64 + 0.5) * 30.0, (y as f64 + 0.5) * 30.0)
    }

    #[derive(Default)]
    struct CountingRenderer {
        frames: usize,
        last_preview: Option<Footprint>,
    }

    impl Renderer for CountingRenderer {
        fn redraw(&mut self, frame: &Frame<'_>) {
            self.frames += 1;
            self.last_preview = frame.preview;
        }
    }

    fn session_with_room() -> EditingSession {
        let mut session = EditingSession::new(EditorConfig::default());
        session.set_tool(ToolKind::Room);
        session.gesture_begin(at(1, 1)).unwrap();
        session.gesture_end(at(10, 10)).unwrap();
        session
    }

    #[test]
    fn test_draw_wall() {
        let mut session = EditingSession::new(EditorConfig::default());
        session.set_tool(ToolKind::Wall);
        session.gesture_begin(at(2, 2)).unwrap();
        let moved = session.gesture_move(at(6, 3)).unwrap();
        assert_eq!(moved, GestureOutcome::Drawing(Footprint::new(GridCoord::new(2, 2), 5, 1)));

        let outcome = session.gesture_end(at(6, 3)).unwrap();
        assert!(matches!(outcome, GestureOutcome::Placed(_)));
        let wall = &session.document().base_layer.walls[0];
        assert_eq!((wall.x, wall.y, wall.width, wall.height), (2, 2, 5, 1));
    }

    #[test]
    fn test_outside_grid_ignored() {
        let mut session = EditingSession::new(EditorConfig::default());
        session.set_tool(ToolKind::Wall);
        assert_eq!(session.gesture_begin(at(25, 2)).unwrap(), GestureOutcome::Ignored);
        assert!(!session.tools().is_active());

        session.gesture_begin(at(2, 2)).unwrap();
        assert_eq!(session.gesture_end(at(2, -3)).unwrap(), GestureOutcome::Ignored);
        assert!(session.tools().is_active());
    }

    #[test]
    fn test_surface_rect_scales_pointer() {
        let mut session = EditingSession::new(EditorConfig::default());
        session.set_surface_rect(Rect::new(100.0, 50.0, 400.0, 350.0));
        session.set_tool(ToolKind::Wall);
        // Half-size surface: screen (100 + 15 * 4 + 1, 50 + 1) is cell (4, 0).
        session.gesture_begin(Point::new(161.0, 51.0)).unwrap();
        assert_eq!(
            session.tools().preview(),
            Some(Footprint::cell(GridCoord::new(4, 0)))
        );
        session.invalidate_surface();
        assert!(session.surface().surface_rect().is_none());
    }

    #[test]
    fn test_chair_needs_room() {
        let mut session = EditingSession::new(EditorConfig::default());
        session.set_tool(ToolKind::Chair);
        let err = session.gesture_begin(at(5, 5)).unwrap_err();
        assert!(matches!(err, EditError::Placement(PlacementError::RoomInteriorViolation { .. })));
        assert_eq!(session.document().count(ElementKind::Chair), 0);

        let notes = session.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Warning);
        assert!(notes[0].message.contains("inside a room"));
        assert!(session.take_notifications().is_empty());
    }

    #[test]
    fn test_fan_requires_wall() {
        let mut session = session_with_room();
        session.set_tool(ToolKind::Fan);
        let err = session.gesture_begin(at(5, 5)).unwrap_err();
        assert_eq!(err, EditError::FanRequiresWall { cell: GridCoord::new(5, 5) });
        assert_eq!(session.take_notifications().len(), 1);
    }

    #[test]
    fn test_fan_next_to_wall() {
        let mut session = session_with_room();
        session.set_tool(ToolKind::Wall);
        session.gesture_begin(at(2, 4)).unwrap();
        session.gesture_end(at(8, 4)).unwrap();

        session.set_tool(ToolKind::Fan);
        let outcome = session.gesture_begin(at(5, 5)).unwrap();
        let GestureOutcome::Placed(placement) = outcome else {
            panic!("fan was not placed");
        };
        let Element::Fan(fan) = placement.inserted else {
            panic!("placed element is not a fan");
        };
        assert_eq!((fan.x, fan.y), (5, 5));
        let mount = fan.mount.unwrap();
        assert_eq!(mount.face, Facing::S);
        assert_eq!(fan.airflow, Facing::S);
        assert_eq!(mount.wall, session.document().base_layer.walls[0].id());
    }

    #[test]
    fn test_select_and_delete() {
        let mut session = session_with_room();
        session.set_tool(ToolKind::Table);
        session.gesture_begin(at(3, 3)).unwrap();

        session.set_tool(ToolKind::Select);
        let outcome = session.gesture_begin(at(4, 3)).unwrap();
        let GestureOutcome::Selected(Some(selection)) = outcome else {
            panic!("table not hit");
        };
        assert_eq!(selection.kind, ElementKind::Table);
        session.gesture_end(at(4, 3)).unwrap();

        let removed = session.delete_selected().unwrap();
        assert_eq!(removed.kind(), ElementKind::Table);
        assert!(session.engine().index().is_empty());
        assert_eq!(session.delete_selected().unwrap_err(), EditError::NothingSelected);
    }

    #[test]
    fn test_set_layer_picks_default_tool() {
        let mut session = EditingSession::new(EditorConfig::default());
        session.set_layer(Layer::Furniture);
        assert_eq!(session.tools().current_tool, ToolKind::Fan);
        session.set_layer(Layer::Structural);
        assert_eq!(session.tools().current_tool, ToolKind::Wall);
        assert!(session.selection().is_none());
    }

    #[test]
    fn test_rotate_table() {
        let mut session = session_with_room();
        session.set_tool(ToolKind::Table);
        session.gesture_begin(at(3, 3)).unwrap();
        session.set_tool(ToolKind::Select);
        session.gesture_begin(at(3, 3)).unwrap();

        let rotated = session.rotate_selected().unwrap();
        assert_eq!(rotated.facing(), Some(Facing::E));
        let table = &session.document().furniture_layer.tables[0];
        assert_eq!((table.x, table.y, table.width, table.height), (3, 3, 1, 2));
    }

    #[test]
    fn test_rotate_blocked_keeps_dimensions() {
        let mut session = session_with_room();
        session.set_tool(ToolKind::Bed);
        session.gesture_begin(at(9, 5)).unwrap();
        session.set_tool(ToolKind::Select);
        session.gesture_begin(at(9, 5)).unwrap();

        let err = session.rotate_selected().unwrap_err();
        assert!(matches!(err, EditError::RotationBlocked { kind: ElementKind::Bed, .. }));
        let bed = &session.document().furniture_layer.beds[0];
        assert_eq!((bed.width, bed.height, bed.facing), (2, 3, Facing::N));
    }

    #[test]
    fn test_rotate_structural_rejected() {
        let mut session = session_with_room();
        session.set_tool(ToolKind::Select);
        session.gesture_begin(at(5, 5)).unwrap();
        assert_eq!(
            session.rotate_selected().unwrap_err(),
            EditError::NotFurniture(ElementKind::Room)
        );
    }

    #[test]
    fn test_rotate_chair_cycles_facing() {
        let mut session = session_with_room();
        session.set_facing(Facing::W);
        session.set_tool(ToolKind::Chair);
        session.gesture_begin(at(2, 2)).unwrap();
        session.set_tool(ToolKind::Select);
        session.gesture_begin(at(2, 2)).unwrap();
        session.rotate_selected().unwrap();
        assert_eq!(session.document().furniture_layer.chairs[0].facing, Facing::N);
    }

    #[test]
    fn test_cache_written_after_commit() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileCache::new(dir.path().to_path_buf()).unwrap();
        let mut session = session_with_room().with_cache(Box::new(cache));
        session.set_tool(ToolKind::Chair);
        session.gesture_begin(at(4, 4)).unwrap();

        let reader = FileCache::new(dir.path().to_path_buf()).unwrap();
        let cached = reader.get(CURRENT_DESIGN_KEY).unwrap().unwrap();
        assert_eq!(&cached, session.document());
    }

    #[test]
    fn test_restore_from_cache() {
        let mut saved = DesignDocument::default();
        saved.push(Room::new(GridCoord::new(0, 0), 8, 8).into());
        saved.push(Chair::new(GridCoord::new(4, 4), Facing::N).into());
        let mut cache = MemoryCache::new();
        cache.set(CURRENT_DESIGN_KEY, &saved).unwrap();

        let mut session = EditingSession::new(EditorConfig::default()).with_cache(Box::new(cache));
        assert!(session.restore());
        assert_eq!(session.document(), &saved);
        assert!(session.engine().index().is_occupied(GridCoord::new(4, 4)));
        assert!(session.engine().mask().is_interior(GridCoord::new(4, 4)));
    }

    #[test]
    fn test_restore_without_cache() {
        let mut session = EditingSession::new(EditorConfig::default());
        assert!(!session.restore());
    }

    #[test]
    fn test_renderer_sees_preview() {
        let mut session =
            EditingSession::with_renderer(EditorConfig::default(), CountingRenderer::default());
        session.set_tool(ToolKind::Room);
        session.gesture_begin(at(1, 1)).unwrap();
        session.gesture_move(at(3, 2)).unwrap();
        assert_eq!(
            session.renderer().last_preview,
            Some(Footprint::new(GridCoord::new(1, 1), 3, 2))
        );
        session.gesture_cancel();
        assert!(session.renderer().last_preview.is_none());
        assert!(session.renderer().frames >= 3);
    }
}
