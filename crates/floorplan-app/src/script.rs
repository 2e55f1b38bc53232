//! Gesture scripts replayed through an editing session.
//!
//! A script is a JSON object with an optional editor `config`, a `strict`
//! flag and a list of `steps`. Each step is tagged by `action`:
//!
//! ```json
//! { "config": { "gridSize": 20 },
//!   "steps": [
//!     { "action": "drag", "tool": "room", "from": [1, 1], "to": [10, 10] },
//!     { "action": "click", "tool": "chair", "at": [4, 4] },
//!     { "action": "key", "key": "R" }
//!   ] }
//! ```
//!
//! `begin`/`move`/`end` take raw screen points; `click` and `drag` take
//! cells and go through the same pointer path at the cell centers.
//! Rejected edits are reported as notifications and the replay goes on,
//! unless the script is `strict`.

use crate::ascii::AsciiRenderer;
use crate::shortcuts::{Command, ShortcutRegistry};
use floorplan_core::{
    ConfigError, DesignDocument, EditError, EditingSession, EditorConfig, Facing, GestureOutcome,
    GridCoord, Layer, LocalCache, Notification, StorageError, ToolKind,
};
use kurbo::{Point, Rect};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that stop a replay.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("Step {step} failed: {source}")]
    Step {
        step: usize,
        #[source]
        source: EditError,
    },
    #[error("No binding for key {0:?}")]
    UnknownKey(String),
}

fn default_offset() -> f64 {
    0.5
}

/// One scripted input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Tool { tool: ToolKind },
    Layer { layer: Layer },
    Facing { facing: Facing },
    Mount {
        face: Facing,
        #[serde(default = "default_offset")]
        offset: f64,
    },
    /// Host reports where the drawing surface sits on screen.
    Surface { rect: Rect },
    /// Host reports a layout change.
    Invalidate,
    Begin { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    End { x: f64, y: f64 },
    Cancel,
    Click {
        #[serde(default)]
        tool: Option<ToolKind>,
        at: [i32; 2],
    },
    Drag {
        #[serde(default)]
        tool: Option<ToolKind>,
        from: [i32; 2],
        to: [i32; 2],
    },
    Key { key: String },
    Rotate,
    Delete,
    /// Replace the document with a design file.
    Load { path: PathBuf },
    /// Reload the working design from the local cache.
    Restore,
    /// Record the current frame.
    Snapshot,
}

/// A parsed gesture script.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    #[serde(default)]
    pub config: EditorConfig,
    /// Stop at the first rejected edit.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_json::from_str(json)?;
        script.config.validate()?;
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// What a replay produced.
#[derive(Debug, Clone)]
pub struct Report {
    pub document: DesignDocument,
    /// Final frame.
    pub frame: String,
    /// Frames recorded by `snapshot` steps.
    pub snapshots: Vec<String>,
    pub notifications: Vec<Notification>,
}

/// Drives an editing session from script steps.
pub struct Replay {
    session: EditingSession<AsciiRenderer>,
    strict: bool,
    snapshots: Vec<String>,
    notifications: Vec<Notification>,
}

impl Replay {
    pub fn new(config: EditorConfig, renderer: AsciiRenderer) -> Self {
        Self {
            session: EditingSession::with_renderer(config, renderer),
            strict: false,
            snapshots: Vec::new(),
            notifications: Vec::new(),
        }
    }

    /// Stop at the first rejected edit.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_cache(mut self, cache: Box<dyn LocalCache>) -> Self {
        self.session = self.session.with_cache(cache);
        self
    }

    pub fn session(&self) -> &EditingSession<AsciiRenderer> {
        &self.session
    }

    /// Run every step in order.
    pub fn run(&mut self, steps: &[Step]) -> Result<(), ScriptError> {
        for (index, step) in steps.iter().enumerate() {
            self.apply(index, step)?;
        }
        Ok(())
    }

    /// Run a single step.
    pub fn apply(&mut self, index: usize, step: &Step) -> Result<(), ScriptError> {
        log::debug!("Step {}: {:?}", index, step);
        let result = match step {
            Step::Tool { tool } => {
                self.session.set_tool(*tool);
                Ok(())
            }
            Step::Layer { layer } => {
                self.session.set_layer(*layer);
                Ok(())
            }
            Step::Facing { facing } => {
                self.session.set_facing(*facing);
                Ok(())
            }
            Step::Mount { face, offset } => {
                self.session.set_mount(*face, *offset);
                Ok(())
            }
            Step::Surface { rect } => {
                self.session.set_surface_rect(*rect);
                Ok(())
            }
            Step::Invalidate => {
                self.session.invalidate_surface();
                Ok(())
            }
            Step::Begin { x, y } => self.session.gesture_begin(Point::new(*x, *y)).map(drop),
            Step::Move { x, y } => self.session.gesture_move(Point::new(*x, *y)).map(drop),
            Step::End { x, y } => self.session.gesture_end(Point::new(*x, *y)).map(drop),
            Step::Cancel => {
                self.session.gesture_cancel();
                Ok(())
            }
            Step::Click { tool, at } => self.click(*tool, *at),
            Step::Drag { tool, from, to } => self.drag(*tool, *from, *to),
            Step::Key { key } => {
                let command = ShortcutRegistry::lookup(key)
                    .ok_or_else(|| ScriptError::UnknownKey(key.clone()))?;
                self.command(command)
            }
            Step::Rotate => self.command(Command::Rotate),
            Step::Delete => self.command(Command::Delete),
            Step::Load { path } => {
                let json = std::fs::read_to_string(path)?;
                self.session.load_document(DesignDocument::from_json(&json)?);
                Ok(())
            }
            Step::Restore => {
                if !self.session.restore() {
                    log::info!("No cached design to restore");
                }
                Ok(())
            }
            Step::Snapshot => {
                self.snapshots.push(self.frame().to_string());
                Ok(())
            }
        };
        self.notifications.extend(self.session.take_notifications());

        match result {
            Err(source) if self.strict => Err(ScriptError::Step { step: index, source }),
            Err(source) => {
                log::debug!("Step {} rejected: {}", index, source);
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }

    fn point(&self, cell: [i32; 2]) -> Point {
        self.session.surface().cell_to_screen(GridCoord::new(cell[0], cell[1]))
    }

    fn click(&mut self, tool: Option<ToolKind>, at: [i32; 2]) -> Result<(), EditError> {
        if let Some(tool) = tool {
            self.session.set_tool(tool);
        }
        let point = self.point(at);
        self.session.gesture_begin(point)?;
        self.session.gesture_end(point).map(drop)
    }

    fn drag(
        &mut self,
        tool: Option<ToolKind>,
        from: [i32; 2],
        to: [i32; 2],
    ) -> Result<(), EditError> {
        if let Some(tool) = tool {
            self.session.set_tool(tool);
        }
        let (start, end) = (self.point(from), self.point(to));
        self.session.gesture_begin(start)?;
        self.session.gesture_move(end)?;
        match self.session.gesture_end(end)? {
            GestureOutcome::Ignored => {
                log::debug!("Drag from {:?} to {:?} placed nothing", from, to)
            }
            outcome => log::trace!("Drag outcome: {:?}", outcome),
        }
        Ok(())
    }

    fn command(&mut self, command: Command) -> Result<(), EditError> {
        match command {
            Command::Tool(tool) => self.session.set_tool(tool),
            Command::ToggleLayer => {
                let layer = match self.session.active_layer() {
                    Layer::Structural => Layer::Furniture,
                    Layer::Furniture => Layer::Structural,
                };
                self.session.set_layer(layer);
            }
            Command::CycleFacing => {
                let facing = self.session.tools().facing.next();
                self.session.set_facing(facing);
            }
            Command::Rotate => {
                self.session.rotate_selected()?;
            }
            Command::Delete => {
                self.session.delete_selected()?;
            }
            Command::Cancel => self.session.gesture_cancel(),
        }
        Ok(())
    }

    /// Text of the latest frame.
    pub fn frame(&self) -> &str {
        self.session.renderer().last_frame()
    }

    pub fn into_report(self) -> Report {
        Report {
            frame: self.frame().to_string(),
            document: self.session.document().clone(),
            snapshots: self.snapshots,
            notifications: self.notifications,
        }
    }
}

/// Parse and replay a script.
pub fn run_script(script: &Script, renderer: AsciiRenderer) -> Result<Report, ScriptError> {
    let mut replay = Replay::new(script.config.clone(), renderer).strict(script.strict);
    replay.run(&script.steps)?;
    Ok(replay.into_report())
}
