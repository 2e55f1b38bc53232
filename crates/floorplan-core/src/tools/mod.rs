//! Tool system for the editor.

use crate::elements::{ElementKind, Facing, Layer};
use crate::geometry::Footprint;
use crate::grid::GridCoord;
use crate::selection::Selection;
use crate::snap::{room_footprint, wall_footprint};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Wall,
    Room,
    Door,
    Window,
    Fan,
    Chair,
    Table,
    Bed,
}

impl ToolKind {
    /// Element kind this tool creates, if any.
    pub fn element_kind(self) -> Option<ElementKind> {
        match self {
            ToolKind::Select => None,
            ToolKind::Wall => Some(ElementKind::Wall),
            ToolKind::Room => Some(ElementKind::Room),
            ToolKind::Door => Some(ElementKind::Door),
            ToolKind::Window => Some(ElementKind::Window),
            ToolKind::Fan => Some(ElementKind::Fan),
            ToolKind::Chair => Some(ElementKind::Chair),
            ToolKind::Table => Some(ElementKind::Table),
            ToolKind::Bed => Some(ElementKind::Bed),
        }
    }

    /// Layer this tool draws on. The select tool works on any layer.
    pub fn layer(self) -> Option<Layer> {
        self.element_kind().map(ElementKind::layer)
    }

    /// Whether the tool draws by dragging a rectangle.
    pub fn is_drag(self) -> bool {
        matches!(self, ToolKind::Wall | ToolKind::Room)
    }

    /// Tool activated when switching to a layer.
    pub fn default_for(layer: Layer) -> Self {
        match layer {
            Layer::Structural => ToolKind::Wall,
            Layer::Furniture => ToolKind::Fan,
        }
    }
}

/// State of the interaction state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// Waiting for a gesture.
    #[default]
    Idle,
    /// Dragging out a wall or room.
    Drawing {
        tool: ToolKind,
        anchor: GridCoord,
        current: GridCoord,
    },
    /// A selection gesture is in progress.
    Selecting {
        /// Result of the hit test, `None` if nothing was hit.
        hit: Option<Selection>,
    },
}

/// What a gesture asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolIntent {
    /// Hit-test at a cell.
    Select(GridCoord),
    /// Place a dragged rectangle.
    Draw { tool: ToolKind, footprint: Footprint },
    /// Place a single-click element at a cell.
    Stamp { tool: ToolKind, cell: GridCoord },
}

/// Manages the current tool, its state and the placement options.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Current state of the tool.
    pub state: InteractionState,
    /// Facing applied to new chairs, tables and beds.
    pub facing: Facing,
    /// Wall side used when a fan is dropped onto a wall.
    pub mount_face: Facing,
    /// Fractional position along the wall for such a fan.
    pub mount_offset: f64,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self {
            current_tool: ToolKind::default(),
            state: InteractionState::default(),
            facing: Facing::N,
            mount_face: Facing::S,
            mount_offset: 0.5,
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = InteractionState::Idle;
    }

    /// Begin a gesture at `cell`.
    pub fn begin(&mut self, cell: GridCoord) -> Option<ToolIntent> {
        let tool = self.current_tool;
        match tool {
            ToolKind::Select => {
                self.state = InteractionState::Selecting { hit: None };
                Some(ToolIntent::Select(cell))
            }
            ToolKind::Wall | ToolKind::Room => {
                self.state = InteractionState::Drawing {
                    tool,
                    anchor: cell,
                    current: cell,
                };
                None
            }
            _ => {
                self.state = InteractionState::Idle;
                Some(ToolIntent::Stamp { tool, cell })
            }
        }
    }

    /// Record the hit-test result of a selection gesture.
    pub fn selected(&mut self, hit: Option<Selection>) {
        if let InteractionState::Selecting { hit: slot } = &mut self.state {
            *slot = hit;
        }
    }

    /// Move the gesture to `cell`. Returns the live preview.
    pub fn update(&mut self, cell: GridCoord) -> Option<Footprint> {
        if let InteractionState::Drawing { current, .. } = &mut self.state {
            *current = cell;
        }
        self.preview()
    }

    /// End the gesture at `cell`.
    pub fn end(&mut self, cell: GridCoord) -> Option<ToolIntent> {
        match std::mem::take(&mut self.state) {
            InteractionState::Drawing { tool, anchor, .. } => Some(ToolIntent::Draw {
                tool,
                footprint: drawn_footprint(tool, anchor, cell),
            }),
            _ => None,
        }
    }

    /// Abandon the current gesture.
    pub fn cancel(&mut self) {
        self.state = InteractionState::Idle;
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, InteractionState::Idle)
    }

    /// Rectangle that would be placed if the drag ended now.
    pub fn preview(&self) -> Option<Footprint> {
        match self.state {
            InteractionState::Drawing { tool, anchor, current } => {
                Some(drawn_footprint(tool, anchor, current))
            }
            _ => None,
        }
    }
}

fn drawn_footprint(tool: ToolKind, anchor: GridCoord, end: GridCoord) -> Footprint {
    if tool == ToolKind::Wall {
        wall_footprint(anchor, end)
    } else {
        room_footprint(anchor, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_selection() {
        let mut manager = ToolManager::new();
        assert_eq!(manager.current_tool, ToolKind::Select);

        manager.set_tool(ToolKind::Wall);
        assert_eq!(manager.current_tool, ToolKind::Wall);
        assert_eq!(manager.current_tool.layer(), Some(Layer::Structural));
    }

    #[test]
    fn test_wall_drag() {
        let mut manager = ToolManager::new();
        manager.set_tool(ToolKind::Wall);

        assert_eq!(manager.begin(GridCoord::new(2, 2)), None);
        assert!(manager.is_active());

        let preview = manager.update(GridCoord::new(6, 3)).unwrap();
        assert_eq!(preview, Footprint::new(GridCoord::new(2, 2), 5, 1));

        let intent = manager.end(GridCoord::new(3, 6)).unwrap();
        assert_eq!(
            intent,
            ToolIntent::Draw {
                tool: ToolKind::Wall,
                footprint: Footprint::new(GridCoord::new(2, 2), 1, 5),
            }
        );
        assert!(!manager.is_active());
    }

    #[test]
    fn test_room_drag_unsnapped() {
        let mut manager = ToolManager::new();
        manager.set_tool(ToolKind::Room);
        manager.begin(GridCoord::new(1, 1));
        let intent = manager.end(GridCoord::new(4, 3)).unwrap();
        assert_eq!(
            intent,
            ToolIntent::Draw {
                tool: ToolKind::Room,
                footprint: Footprint::new(GridCoord::new(1, 1), 4, 3),
            }
        );
    }

    #[test]
    fn test_cancel_interaction() {
        let mut manager = ToolManager::new();
        manager.set_tool(ToolKind::Room);
        manager.begin(GridCoord::new(1, 1));
        manager.cancel();
        assert!(!manager.is_active());
        assert!(manager.end(GridCoord::new(5, 5)).is_none());
    }

    #[test]
    fn test_stamp_tools_fire_on_begin() {
        let mut manager = ToolManager::new();
        manager.set_tool(ToolKind::Chair);
        let intent = manager.begin(GridCoord::new(7, 8));
        assert_eq!(
            intent,
            Some(ToolIntent::Stamp {
                tool: ToolKind::Chair,
                cell: GridCoord::new(7, 8)
            })
        );
        assert!(!manager.is_active());
        assert!(manager.preview().is_none());
    }

    #[test]
    fn test_select_tool_records_hit() {
        let mut manager = ToolManager::new();
        assert_eq!(
            manager.begin(GridCoord::new(0, 0)),
            Some(ToolIntent::Select(GridCoord::new(0, 0)))
        );
        manager.selected(None);
        assert_eq!(manager.state, InteractionState::Selecting { hit: None });
        assert!(manager.end(GridCoord::new(0, 0)).is_none());
        assert_eq!(manager.state, InteractionState::Idle);
    }

    #[test]
    fn test_default_tool_per_layer() {
        assert_eq!(ToolKind::default_for(Layer::Structural), ToolKind::Wall);
        assert_eq!(ToolKind::default_for(Layer::Furniture), ToolKind::Fan);
        assert_eq!(ToolKind::Bed.layer(), Some(Layer::Furniture));
        assert_eq!(ToolKind::Select.layer(), None);
    }
}
