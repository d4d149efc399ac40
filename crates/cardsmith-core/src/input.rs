//! Host input events.

use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::NONE
        }
    }

    /// Ctrl, or Cmd on macOS hosts.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Keyboard event carrying the host's key name (`"v"`, `"Delete"`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

impl KeyEvent {
    pub fn pressed(key: impl Into<String>) -> Self {
        KeyEvent::Pressed(key.into())
    }

    /// Key name of a press, `None` for releases.
    pub fn pressed_key(&self) -> Option<&str> {
        match self {
            KeyEvent::Pressed(key) => Some(key),
            KeyEvent::Released(_) => None,
        }
    }
}
