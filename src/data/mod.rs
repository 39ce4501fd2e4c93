//! Data layer - Pure state without UI coupling
//!
//! This module contains UI state as pure data structures.
//! NO imports from frontend/ or any rendering code.
//! The TUI frontend reads from these structures to render.

pub mod ui_state;

pub use ui_state::*;
