//! End-to-end editing scenarios driven through the session API.

use floorplan_core::elements::{Chair, Table, Wall};
use floorplan_core::{
    DesignDocument, EditError, EditingSession, EditorConfig, ElementKind, Facing, Footprint,
    GestureOutcome, GridCoord, Orientation, Placeable, PlacementError, ToolKind,
};
use kurbo::Point;

fn at(x: i32, y: i32) -> Point {
    Point::new((x as f64 + 0.5) * 30.0, (y as f64 + 0.5) * 30.0)
}

fn drag(
    session: &mut EditingSession,
    tool: ToolKind,
    from: (i32, i32),
    to: (i32, i32),
) -> GestureOutcome {
    session.set_tool(tool);
    session.gesture_begin(at(from.0, from.1)).unwrap();
    session.gesture_move(at(to.0, to.1)).unwrap();
    session.gesture_end(at(to.0, to.1)).unwrap()
}

fn click(
    session: &mut EditingSession,
    tool: ToolKind,
    x: i32,
    y: i32,
) -> Result<GestureOutcome, EditError> {
    session.set_tool(tool);
    session.gesture_begin(at(x, y))
}

fn furnished() -> EditingSession {
    let mut session = EditingSession::new(EditorConfig::default());
    drag(&mut session, ToolKind::Room, (1, 1), (12, 12));
    session
}

#[test]
fn wall_snapping_is_deterministic() {
    let mut session = EditingSession::new(EditorConfig::default());
    drag(&mut session, ToolKind::Wall, (2, 2), (6, 3));
    drag(&mut session, ToolKind::Wall, (12, 2), (13, 6));

    let walls = &session.document().base_layer.walls;
    assert_eq!(walls.len(), 2);
    assert_eq!(Footprint::new(GridCoord::new(2, 2), 5, 1), walls[0].footprint());
    // (12,2) -> (13,6) snaps to a vertical run; width stays 1.
    assert_eq!(Footprint::new(GridCoord::new(12, 2), 1, 5), walls[1].footprint());
}

#[test]
fn door_orientation_follows_walls() {
    let mut session = EditingSession::new(EditorConfig::default());
    drag(&mut session, ToolKind::Wall, (2, 5), (8, 5));

    click(&mut session, ToolKind::Door, 4, 5).unwrap();
    click(&mut session, ToolKind::Door, 10, 10).unwrap();
    drag(&mut session, ToolKind::Wall, (15, 1), (15, 8));
    click(&mut session, ToolKind::Window, 16, 4).unwrap();

    let doors = &session.document().base_layer.doors;
    assert_eq!(doors[0].orientation, Orientation::Horizontal);
    assert_eq!(doors[1].orientation, Orientation::Horizontal);
    assert_eq!(session.document().base_layer.windows[0].orientation, Orientation::Vertical);
}

#[test]
fn chair_without_room_is_rejected() {
    let mut session = EditingSession::new(EditorConfig::default());
    let err = click(&mut session, ToolKind::Chair, 6, 6).unwrap_err();
    assert!(matches!(
        err,
        EditError::Placement(PlacementError::RoomInteriorViolation { .. })
    ));
    assert_eq!(session.document().count(ElementKind::Chair), 0);
}

#[test]
fn table_rotation_swaps_extent() {
    let mut session = furnished();
    click(&mut session, ToolKind::Table, 3, 3).unwrap();
    click(&mut session, ToolKind::Select, 3, 3).unwrap();

    session.rotate_selected().unwrap();
    let table = &session.document().furniture_layer.tables[0];
    assert_eq!((table.x, table.y, table.width, table.height), (3, 3, 1, 2));
    assert_eq!(table.facing, Facing::E);
}

#[test]
fn table_rotation_across_grid_edge_is_rejected() {
    // A room covering the whole grid so only the grid edge can block.
    let mut session = EditingSession::new(EditorConfig::default());
    drag(&mut session, ToolKind::Room, (0, 0), (19, 19));
    click(&mut session, ToolKind::Table, 3, 19).unwrap();
    click(&mut session, ToolKind::Select, 3, 19).unwrap();

    let err = session.rotate_selected().unwrap_err();
    assert!(matches!(
        err,
        EditError::RotationBlocked {
            kind: ElementKind::Table,
            source: PlacementError::OutOfBounds { .. },
        }
    ));
    let table = &session.document().furniture_layer.tables[0];
    assert_eq!((table.width, table.height, table.facing), (2, 1, Facing::N));
}

#[test]
fn failed_placement_leaves_state_untouched() {
    let mut session = furnished();
    drag(&mut session, ToolKind::Wall, (2, 6), (9, 6));
    click(&mut session, ToolKind::Bed, 5, 2).unwrap();

    let document = session.document().clone();
    let index = session.engine().index().clone();

    // Bed at (5,5) would cover the wall on row 6.
    let err = click(&mut session, ToolKind::Bed, 5, 5).unwrap_err();
    assert_eq!(
        err,
        EditError::Placement(PlacementError::ElementConflict {
            cell: GridCoord::new(5, 6),
            blocking: ElementKind::Wall,
        })
    );
    assert_eq!(session.document(), &document);
    assert_eq!(session.engine().index(), &index);
}

#[test]
fn overwrite_removes_every_displaced_element() {
    let mut session = furnished();
    click(&mut session, ToolKind::Chair, 4, 4).unwrap();
    click(&mut session, ToolKind::Chair, 5, 6).unwrap();
    click(&mut session, ToolKind::Table, 5, 4).unwrap();

    let outcome = click(&mut session, ToolKind::Bed, 4, 4).unwrap();
    let GestureOutcome::Placed(placement) = outcome else {
        panic!("bed was not placed");
    };
    assert_eq!(placement.removed.len(), 3);

    let doc = session.document();
    assert_eq!(doc.count(ElementKind::Chair), 0);
    assert_eq!(doc.count(ElementKind::Table), 0);
    assert_eq!(doc.count(ElementKind::Bed), 1);

    let bed_id = doc.furniture_layer.beds[0].id();
    let index = session.engine().index();
    for (cell, occupant) in index.iter() {
        assert_eq!(occupant.id, bed_id, "stale occupant at {}", cell);
    }
    // The table's right half at (6,4) is freed, not reassigned.
    assert!(!index.is_occupied(GridCoord::new(6, 4)));
}

#[test]
fn selection_respects_layer_priority() {
    let mut session = furnished();
    drag(&mut session, ToolKind::Wall, (2, 5), (8, 5));
    click(&mut session, ToolKind::Door, 4, 5).unwrap();

    let hit = click(&mut session, ToolKind::Select, 4, 5).unwrap();
    let GestureOutcome::Selected(Some(selection)) = hit else {
        panic!("nothing selected");
    };
    assert_eq!(selection.kind, ElementKind::Door);

    // The door displaced the wall, so the room is next under (3,5).
    let hit = click(&mut session, ToolKind::Select, 3, 5).unwrap();
    assert!(matches!(
        hit,
        GestureOutcome::Selected(Some(s)) if s.kind == ElementKind::Room
    ));
}

#[test]
fn load_resyncs_derived_state() {
    let mut doc = DesignDocument::default();
    doc.push(floorplan_core::elements::Room::new(GridCoord::new(0, 0), 6, 6).into());
    doc.push(Wall::new(Footprint::new(GridCoord::new(0, 6), 6, 1)).into());
    doc.push(Table::new(GridCoord::new(1, 1), Facing::S).into());
    doc.push(Chair::new(GridCoord::new(3, 3), Facing::W).into());

    let mut session = EditingSession::new(EditorConfig::default());
    session.load_document(doc.clone());

    assert_eq!(session.engine().index().len(), 6 + 2 + 1);
    assert!(session.engine().mask().is_interior(GridCoord::new(5, 5)));
    assert!(!session.engine().mask().is_interior(GridCoord::new(6, 5)));

    let err = click(&mut session, ToolKind::Chair, 2, 6).unwrap_err();
    assert!(matches!(err, EditError::Placement(PlacementError::RoomInteriorViolation { .. })));
}

#[test]
fn legacy_payload_loads_through_session() {
    let json = r#"{
        "base_layer": {
            "walls": [{"startX": 2, "startY": 5, "endX": 8, "endY": 5}],
            "rooms": [{"x": 1, "y": 1, "width": 10, "height": 10}]
        },
        "furniture_layer": {"chairs": [{"x": 3, "y": 3, "direction": "up"}]},
        "overlay_layer": {"heatmap": null},
        "grid_size": 20,
        "grid_cell_size": 30
    }"#;
    let doc = DesignDocument::from_json(json).unwrap();

    let mut session = EditingSession::new(EditorConfig::default());
    session.load_document(doc);

    // Legacy walls keep a one-cell hit tolerance.
    let hit = click(&mut session, ToolKind::Select, 5, 6).unwrap();
    assert!(matches!(
        hit,
        GestureOutcome::Selected(Some(s)) if s.kind == ElementKind::Wall
    ));
    let out = session.document().to_json().unwrap();
    assert!(out.contains("\"legacySegment\": true"));
}

#[test]
fn chair_turns_after_its_room_is_removed() {
    let mut session = EditingSession::new(EditorConfig::default());
    drag(&mut session, ToolKind::Room, (1, 1), (5, 5));
    click(&mut session, ToolKind::Chair, 2, 2).unwrap();

    session.set_tool(ToolKind::Wall);
    click(&mut session, ToolKind::Select, 4, 4).unwrap();
    assert_eq!(session.delete_selected().unwrap().kind(), ElementKind::Room);
    assert_eq!(session.engine().mask().interior_count(), 0);

    session.set_tool(ToolKind::Chair);
    let hit = click(&mut session, ToolKind::Select, 2, 2).unwrap();
    assert!(matches!(
        hit,
        GestureOutcome::Selected(Some(s)) if s.kind == ElementKind::Chair
    ));
    let turned = session.rotate_selected().unwrap();
    assert_eq!(turned.facing(), Some(Facing::E));
    assert_eq!(session.document().furniture_layer.chairs[0].facing, Facing::E);
    assert!(session.engine().index().is_occupied(GridCoord::new(2, 2)));
}

#[test]
fn load_drops_elements_beyond_the_grid() {
    let doc = DesignDocument::from_json(
        r#"{"baseLayer":{"walls":[{"x":2147483000,"y":0,"width":1000,"height":1}]}}"#,
    )
    .unwrap();

    let mut session = EditingSession::new(EditorConfig::default());
    session.load_document(doc);

    assert!(session.document().is_empty());
    assert!(session.engine().index().is_empty());
    let notes = session.take_notifications();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].message.contains("outside the grid"));

    drag(&mut session, ToolKind::Wall, (2, 2), (6, 2));
    assert_eq!(session.document().count(ElementKind::Wall), 1);
}

#[test]
fn load_caps_oversized_grid() {
    let doc = DesignDocument::from_json(r#"{"gridSize":4000000000}"#).unwrap();

    let mut session = EditingSession::new(EditorConfig::default());
    session.load_document(doc);

    assert_eq!(session.document().grid_size, floorplan_core::grid::MAX_GRID_SIZE);
    assert_eq!(session.engine().grid_size(), floorplan_core::grid::MAX_GRID_SIZE);
}
