//! Keyboard bindings for the editor shell.

use floorplan_core::ToolKind;

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Tool(ToolKind),
    ToggleLayer,
    CycleFacing,
    Rotate,
    Delete,
    Cancel,
}

/// A key binding.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, command: Command, description: &'static str) -> Self {
        Self {
            key,
            command,
            description,
        }
    }
}

/// Registry of all key bindings.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("V", Command::Tool(ToolKind::Select), "Select tool"),
            Shortcut::new("1", Command::Tool(ToolKind::Wall), "Wall tool"),
            Shortcut::new("2", Command::Tool(ToolKind::Room), "Room tool"),
            Shortcut::new("3", Command::Tool(ToolKind::Door), "Door tool"),
            Shortcut::new("4", Command::Tool(ToolKind::Window), "Window tool"),
            Shortcut::new("5", Command::Tool(ToolKind::Fan), "Fan tool"),
            Shortcut::new("6", Command::Tool(ToolKind::Chair), "Chair tool"),
            Shortcut::new("7", Command::Tool(ToolKind::Table), "Table tool"),
            Shortcut::new("8", Command::Tool(ToolKind::Bed), "Bed tool"),
            Shortcut::new("Tab", Command::ToggleLayer, "Switch between structure and furniture"),
            Shortcut::new("O", Command::CycleFacing, "Turn new furniture clockwise"),
            Shortcut::new("R", Command::Rotate, "Rotate selected furniture"),
            Shortcut::new("Delete", Command::Delete, "Delete selection"),
            Shortcut::new("Backspace", Command::Delete, "Delete selection"),
            Shortcut::new("Escape", Command::Cancel, "Cancel drawing"),
        ]
    }

    /// Find the command bound to `key` (case-insensitive).
    pub fn lookup(key: &str) -> Option<Command> {
        Self::all()
            .into_iter()
            .find(|s| s.key.eq_ignore_ascii_case(key))
            .map(|s| s.command)
    }

    /// One line per binding, for `--keys`.
    pub fn help() -> String {
        Self::all()
            .iter()
            .map(|s| format!("{:<10} {}", s.key, s.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        assert_eq!(ShortcutRegistry::lookup("r"), Some(Command::Rotate));
        assert_eq!(ShortcutRegistry::lookup("ESCAPE"), Some(Command::Cancel));
        assert_eq!(ShortcutRegistry::lookup("7"), Some(Command::Tool(ToolKind::Table)));
        assert_eq!(ShortcutRegistry::lookup("F13"), None);
    }

    #[test]
    fn test_keys_are_unique() {
        let all = ShortcutRegistry::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(!a.key.eq_ignore_ascii_case(b.key), "duplicate key {}", a.key);
            }
        }
    }
}
