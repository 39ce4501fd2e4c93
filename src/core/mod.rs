//! Core business logic layer
//!
//! This module contains the navigation state machine, progression, mode
//! selection and input routing.
//! NO imports from frontend/ or rendering code.
//! Core updates data structures in the data layer, frontends read and render.

pub mod actions;
pub mod app_core;
pub mod dialog;
pub mod input_router;
pub mod mode;
pub mod navigator;
pub mod progression;
pub mod zone;

pub use app_core::AppCore;
pub use mode::PresentationMode;
pub use navigator::Navigator;
