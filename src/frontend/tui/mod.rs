//! TUI Frontend (ratatui-based)
//!
//! Implements the Frontend trait using ratatui for terminal rendering and
//! crossterm for events. One view module per presentation mode, plus the
//! widgets they share.

pub mod app;
pub mod colors;
pub mod dialog;
pub mod explore;
pub mod feed;
pub mod grid;
pub mod hud;
pub mod map;
pub mod mobile;
pub mod overlays;
pub mod panels;

pub use app::TuiFrontend;
