//! Shared action vocabulary for every presentation mode.
//!
//! Raw key and mouse events are translated into semantic `Action`s and
//! `Pointer`s so the core never has to know which key was pressed.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Arrow directions; y grows downwards on the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector on the map plane
    pub fn delta(self) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Global
    Quit,
    NextMode,
    PreviousMode,
    CloseOverlay, // Esc
    CopyContact,  // y

    // Explore / mobile
    Move(Direction),
    Choose(usize), // 1-based, as shown on screen
    GoHome,
    ToggleInventory,
    ToggleQuestLog,
    ToggleMap,
    ScrollPanel(i16),
    PreviousZone,
    NextZone,
    FirstZone,
    LastZone,

    // Feed
    FeedStep(i32),
    FeedFirst,
    FeedLast,
    ToggleSectionSheet,
    JumpToSection(usize), // 1-based
    Like,

    // Grid
    GridMove(Direction),
    OpenDetail,

    // Key not bound in this mode
    None,
}

/// Mouse input, already stripped of terminal specifics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    Press { col: u16, row: u16 },
    Drag { col: u16, row: u16 },
    ScrollUp,
    ScrollDown,
}

/// Human-readable key name, used when logging unbound keys
pub fn key_event_to_string(key: KeyEvent) -> String {
    let mut parts = Vec::new();

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) && !matches!(key.code, KeyCode::Char(_)) {
        parts.push("Shift");
    }

    let key_str = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => {
            parts.retain(|p| *p != "Shift");
            parts.push("Shift");
            "Tab".to_string()
        }
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => return String::new(),
    };

    parts.push(&key_str);
    parts.join("+")
}
