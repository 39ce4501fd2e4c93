//! UI State - overlays, per-mode selection, cosmetic timers and hit regions
//!
//! Nothing here affects navigation or progression. Frontends read it to
//! render and write back the screen regions they drew so that mouse input
//! can be resolved without knowing about the terminal.

use crate::core::zone::{Point, ZoneId};
use std::time::{Duration, Instant};

/// A rectangle of terminal cells
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x
            && row >= self.y
            && (col as u32) < self.x as u32 + self.width as u32
            && (row as u32) < self.y as u32 + self.height as u32
    }

    /// Map a cell inside the viewport to a point on the 0-100 map plane,
    /// using the cell centre
    pub fn to_percent(&self, col: u16, row: u16) -> Option<Point> {
        if !self.contains(col, row) {
            return None;
        }
        let x = ((col - self.x) as f64 + 0.5) / self.width as f64 * Point::MAX;
        let y = ((row - self.y) as f64 + 0.5) / self.height as f64 * Point::MAX;
        Some(Point::clamped(x, y))
    }
}

/// Screen regions drawn during the last frame
#[derive(Clone, Debug, Default)]
pub struct HitRegions {
    pub map: Option<Viewport>,
    pub taskbar: Vec<(Viewport, ZoneId)>,
    pub choices: Vec<(Viewport, usize)>,
}

impl HitRegions {
    pub fn taskbar_zone_at(&self, col: u16, row: u16) -> Option<ZoneId> {
        self.taskbar
            .iter()
            .find(|(area, _)| area.contains(col, row))
            .map(|(_, zone)| *zone)
    }

    pub fn choice_at(&self, col: u16, row: u16) -> Option<usize> {
        self.choices
            .iter()
            .find(|(area, _)| area.contains(col, row))
            .map(|(_, idx)| *idx)
    }
}

#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub text: String,
    pub expires: Instant,
}

/// Deadlines for purely visual effects
#[derive(Clone, Debug, Default)]
pub struct CosmeticTimers {
    moving_until: Option<Instant>,
    like_until: Option<Instant>,
    banner_index: usize,
    banner_next: Option<Instant>,
}

/// Application UI state
#[derive(Clone, Debug)]
pub struct UiState {
    pub show_map: bool,
    pub show_inventory: bool,
    pub show_quest_log: bool,

    /// Vertical scroll of the active content panel
    pub panel_scroll: u16,

    /// Feed: index into the feed order
    pub feed_index: usize,
    pub show_section_sheet: bool,
    liked: [bool; ZoneId::COUNT],

    /// Grid: selected row and tile
    pub grid_row: usize,
    pub grid_col: usize,
    /// Grid: zone whose detail overlay is open
    pub detail: Option<ZoneId>,

    pub status: Option<StatusMessage>,
    pub regions: HitRegions,
    timers: CosmeticTimers,
}

impl UiState {
    pub fn new(show_map: bool) -> Self {
        Self {
            show_map,
            show_inventory: false,
            show_quest_log: false,
            panel_scroll: 0,
            feed_index: 0,
            show_section_sheet: false,
            liked: [false; ZoneId::COUNT],
            grid_row: 0,
            grid_col: 0,
            detail: None,
            status: None,
            regions: HitRegions::default(),
            timers: CosmeticTimers::default(),
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, now: Instant, duration: Duration) {
        self.status = Some(StatusMessage {
            text: text.into(),
            expires: now + duration,
        });
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|s| s.text.as_str())
    }

    pub fn mark_moving(&mut self, now: Instant, duration: Duration) {
        self.timers.moving_until = Some(now + duration);
    }

    pub fn is_moving(&self, now: Instant) -> bool {
        self.timers.moving_until.is_some_and(|until| now < until)
    }

    /// Flip the like on a feed section; the heart animation only plays
    /// when liking
    pub fn toggle_like(&mut self, zone: ZoneId, now: Instant, duration: Duration) -> bool {
        let liked = &mut self.liked[zone.index()];
        *liked = !*liked;
        if *liked {
            self.timers.like_until = Some(now + duration);
        }
        *liked
    }

    pub fn is_liked(&self, zone: ZoneId) -> bool {
        self.liked[zone.index()]
    }

    pub fn like_animating(&self, now: Instant) -> bool {
        self.timers.like_until.is_some_and(|until| now < until)
    }

    pub fn banner_index(&self) -> usize {
        self.timers.banner_index
    }

    /// Expire finished effects and rotate the banner
    ///
    /// Returns true if anything visible changed.
    pub fn tick(&mut self, now: Instant, banner_len: usize, banner_every: Duration) -> bool {
        let mut changed = false;

        if self.status.as_ref().is_some_and(|s| now >= s.expires) {
            self.status = None;
            changed = true;
        }
        if self.timers.moving_until.is_some_and(|until| now >= until) {
            self.timers.moving_until = None;
            changed = true;
        }
        if self.timers.like_until.is_some_and(|until| now >= until) {
            self.timers.like_until = None;
            changed = true;
        }

        if banner_len > 1 && !banner_every.is_zero() {
            match self.timers.banner_next {
                None => self.timers.banner_next = Some(now + banner_every),
                Some(next) if now >= next => {
                    self.timers.banner_index = (self.timers.banner_index + 1) % banner_len;
                    self.timers.banner_next = Some(now + banner_every);
                    changed = true;
                }
                Some(_) => {}
            }
        }

        changed
    }

    /// Close the topmost overlay; returns false if none was open
    pub fn close_overlay(&mut self) -> bool {
        if self.detail.take().is_some() {
            self.panel_scroll = 0;
            return true;
        }
        for flag in [
            &mut self.show_section_sheet,
            &mut self.show_inventory,
            &mut self.show_quest_log,
        ] {
            if *flag {
                *flag = false;
                return true;
            }
        }
        false
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(true)
    }
}
