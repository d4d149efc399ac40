//! Keyboard shortcut registry.

use crate::input::{KeyEvent, Modifiers};
use crate::tools::Mode;

/// Designer action triggered from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SetMode(Mode),
    Undo,
    Redo,
    DeleteSelected,
    DuplicateSelected,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub command: Command,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, command: Command, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            command,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key.to_ascii_uppercase())
        } else {
            self.key.to_string()
        }
    }

    fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        self.ctrl == modifiers.command() && self.key.eq_ignore_ascii_case(key)
    }
}

const SHORTCUTS: &[Shortcut] = &[
    Shortcut::new("v", false, Command::SetMode(Mode::Select), "Select tool"),
    Shortcut::new("r", false, Command::SetMode(Mode::Draw), "Draw rectangle"),
    Shortcut::new("p", false, Command::SetMode(Mode::Pen), "Pen tool"),
    Shortcut::new("z", true, Command::Undo, "Undo"),
    Shortcut::new("y", true, Command::Redo, "Redo"),
    Shortcut::new("d", true, Command::DuplicateSelected, "Duplicate selected zones"),
    Shortcut::new("Delete", false, Command::DeleteSelected, "Delete selected zones"),
    Shortcut::new("Backspace", false, Command::DeleteSelected, "Delete selected zones"),
];

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    pub fn all() -> &'static [Shortcut] {
        SHORTCUTS
    }

    /// Resolve a key press to a command.
    pub fn resolve(event: &KeyEvent, modifiers: Modifiers) -> Option<Command> {
        let key = event.pressed_key()?;
        SHORTCUTS
            .iter()
            .find(|s| s.matches(key, modifiers))
            .map(|s| s.command)
    }
}
