//! Floor-plan editor shell
//!
//! Hosts an [`EditingSession`](floorplan_core::EditingSession) without a
//! window: pointer input comes from gesture scripts, frames are drawn as
//! text, and the working design is cached on disk between runs.

mod ascii;
mod script;
mod shortcuts;

pub use ascii::{AsciiRenderer, render_frame};
pub use script::{Replay, Report, Script, ScriptError, Step, run_script};
pub use shortcuts::{Command, Shortcut, ShortcutRegistry};
