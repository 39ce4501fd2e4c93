//! Frontend-agnostic input events.
//!
//! The terminal frontend translates crossterm's event stream into this enum
//! so the core logic only handles one event shape.

use crate::core::actions::Pointer;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};

#[derive(Debug, Clone, PartialEq)]
pub enum FrontendEvent {
    /// Keyboard input
    Key {
        code: KeyCode,
        modifiers: KeyModifiers,
    },
    /// Mouse input
    Mouse {
        kind: MouseEventKind,
        x: u16,
        y: u16,
        modifiers: KeyModifiers,
    },
    /// Terminal resize
    Resize { width: u16, height: u16 },
    /// Application quit signal
    Quit,
}

impl FrontendEvent {
    pub fn key(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::Key { code, modifiers }
    }

    pub fn mouse(kind: MouseEventKind, x: u16, y: u16, modifiers: KeyModifiers) -> Self {
        Self::Mouse {
            kind,
            x,
            y,
            modifiers,
        }
    }

    pub fn resize(width: u16, height: u16) -> Self {
        Self::Resize { width, height }
    }

    /// Key event for the input router, if this is a key press
    pub fn key_event(&self) -> Option<KeyEvent> {
        match self {
            Self::Key { code, modifiers } => Some(KeyEvent::new(*code, *modifiers)),
            _ => None,
        }
    }

    /// Pointer gesture for the core; only the left button and the wheel
    /// mean anything
    pub fn pointer(&self) -> Option<Pointer> {
        let Self::Mouse { kind, x, y, .. } = self else {
            return None;
        };
        let (col, row) = (*x, *y);
        match kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Pointer::Press { col, row }),
            MouseEventKind::Drag(MouseButton::Left) => Some(Pointer::Drag { col, row }),
            MouseEventKind::ScrollUp => Some(Pointer::ScrollUp),
            MouseEventKind::ScrollDown => Some(Pointer::ScrollDown),
            _ => None,
        }
    }
}
