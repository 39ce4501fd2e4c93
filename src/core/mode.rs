//! Presentation mode selection
//!
//! A startup request (`--mode` or the config file) wins when it names a known
//! mode. Otherwise the terminal width decides: narrow terminals get the
//! mobile view, wide ones the configured default.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentationMode {
    Feed,
    Grid,
    Explore,
    Mobile,
}

impl PresentationMode {
    pub const ALL: [PresentationMode; 4] = [
        PresentationMode::Feed,
        PresentationMode::Grid,
        PresentationMode::Explore,
        PresentationMode::Mobile,
    ];

    /// Parse a mode identifier, accepting the legacy URL names too
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "feed" | "doom" => Some(PresentationMode::Feed),
            "grid" | "netflix" => Some(PresentationMode::Grid),
            "explore" | "adventure" => Some(PresentationMode::Explore),
            "mobile" | "mobile-rpg" | "mobile_rpg" => Some(PresentationMode::Mobile),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PresentationMode::Feed => "feed",
            PresentationMode::Grid => "grid",
            PresentationMode::Explore => "explore",
            PresentationMode::Mobile => "mobile",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PresentationMode::Feed => "Feed",
            PresentationMode::Grid => "Browse",
            PresentationMode::Explore => "Adventure",
            PresentationMode::Mobile => "Pocket Quest",
        }
    }

    /// Modes driven by the navigator
    pub fn is_exploration(self) -> bool {
        matches!(self, PresentationMode::Explore | PresentationMode::Mobile)
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for PresentationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportClass {
    Narrow,
    Wide,
}

impl ViewportClass {
    pub fn classify(width: u16, breakpoint: u16) -> Self {
        if width < breakpoint {
            ViewportClass::Narrow
        } else {
            ViewportClass::Wide
        }
    }
}

/// Resolve the mode to show at startup
///
/// Returns the mode and whether it came from an explicit request.
pub fn select_mode(
    request: Option<&str>,
    viewport: ViewportClass,
    wide_default: PresentationMode,
) -> (PresentationMode, bool) {
    if let Some(raw) = request {
        match PresentationMode::parse(raw) {
            Some(mode) => return (mode, true),
            None => tracing::warn!("Ignoring unknown presentation mode '{}'", raw),
        }
    }

    let mode = match viewport {
        ViewportClass::Narrow => PresentationMode::Mobile,
        ViewportClass::Wide => wide_default,
    };
    (mode, false)
}

/// Tracks the active mode across resizes and explicit switches
#[derive(Debug, Clone)]
pub struct ModeSelector {
    mode: PresentationMode,
    explicit: bool,
    breakpoint: u16,
    wide_default: PresentationMode,
}

impl ModeSelector {
    pub fn new(
        request: Option<&str>,
        width: u16,
        breakpoint: u16,
        wide_default: PresentationMode,
    ) -> Self {
        let (mode, explicit) = select_mode(
            request,
            ViewportClass::classify(width, breakpoint),
            wide_default,
        );
        tracing::info!(
            "Presentation mode: {} ({})",
            mode,
            if explicit { "requested" } else { "viewport" }
        );
        Self {
            mode,
            explicit,
            breakpoint,
            wide_default,
        }
    }

    pub fn mode(&self) -> PresentationMode {
        self.mode
    }

    #[cfg(test)]
    pub fn is_explicit(&self) -> bool {
        self.explicit
    }

    /// Re-run viewport selection; returns true if the mode changed
    pub fn on_resize(&mut self, width: u16) -> bool {
        if self.explicit {
            return false;
        }
        let (mode, _) = select_mode(
            None,
            ViewportClass::classify(width, self.breakpoint),
            self.wide_default,
        );
        self.switch(mode)
    }

    /// Switch modes on user request; the choice sticks across resizes
    pub fn set(&mut self, mode: PresentationMode) -> bool {
        self.explicit = true;
        self.switch(mode)
    }

    fn switch(&mut self, mode: PresentationMode) -> bool {
        if mode == self.mode {
            return false;
        }
        tracing::info!("Presentation mode {} -> {}", self.mode, mode);
        self.mode = mode;
        true
    }
}
