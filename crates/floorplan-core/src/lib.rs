//! Floor-plan editor core library.
//!
//! Platform-agnostic grid model, placement engine and interaction state
//! machine for a two-layer floor-plan editor.

pub mod config;
pub mod document;
pub mod elements;
pub mod geometry;
pub mod grid;
pub mod index;
pub mod interior;
pub mod mount;
pub mod placement;
pub mod render;
pub mod selection;
pub mod session;
pub mod snap;
pub mod storage;
pub mod tools;

pub use config::{CURRENT_DESIGN_KEY, ConfigError, EditorConfig};
pub use document::{DesignDocument, FurnitureLayer, Heatmap, OverlayLayer, StructuralLayer};
pub use elements::{Element, ElementId, ElementKind, Facing, Layer, Orientation, Placeable};
pub use geometry::Footprint;
pub use grid::{GridCoord, SurfaceTransform};
pub use index::{GridStateIndex, Occupant};
pub use interior::RoomInteriorMask;
pub use placement::{Placement, PlacementEngine, PlacementError, PlacementResult};
pub use render::{Frame, Renderer};
pub use selection::Selection;
pub use session::{EditError, EditingSession, GestureOutcome, Notification, NotificationLevel};
pub use storage::{LocalCache, Storage, StorageError, StorageResult};
pub use tools::{InteractionState, ToolKind, ToolManager};
