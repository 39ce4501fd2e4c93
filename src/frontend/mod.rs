//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the terminal frontend implements.
//! It provides a unified interface for event polling, rendering, and cleanup.

pub mod events;
pub mod tui;

use crate::core::AppCore;
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

/// Frontend trait
///
/// Separates rendering concerns from the core. The frontend reads AppCore to
/// draw and writes back the hit regions of the frame it just drew.
pub trait Frontend {
    /// Return all pending input events (empty if none)
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current application state
    ///
    /// Mutable because the drawn hit regions are stored on `core.ui`.
    fn render(&mut self, core: &mut AppCore) -> Result<()>;

    /// Restore the terminal; safe to call more than once
    fn cleanup(&mut self) -> Result<()>;
}
