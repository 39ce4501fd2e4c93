use crate::clipboard;
use crate::config::Config;
use crate::content::{Avatar, ContentCatalog};
use crate::core::actions::{key_event_to_string, Action, Direction, Pointer};
use crate::core::input_router::route_key;
use crate::core::mode::{ModeSelector, PresentationMode};
use crate::core::navigator::{Navigator, Transition};
use crate::core::zone::ZoneId;
use crate::data::ui_state::{HitRegions, UiState};
use anyhow::{Context, Result};
use crossterm::event::KeyEvent;
use std::time::Instant;

/// Core application state (frontend-agnostic)
///
/// AppCore owns everything a session needs: settings, content, the
/// navigator with its progression, the mode selector and UI state. Input is
/// applied one event at a time; frontends only read it back to render.
pub struct AppCore {
    /// Application configuration
    pub config: Config,

    /// Portfolio content shown by the panels
    pub catalog: ContentCatalog,

    /// Zone-proximity state machine (explore and mobile modes)
    pub navigator: Navigator,

    /// Active presentation mode
    pub modes: ModeSelector,

    pub ui: UiState,

    pub avatar: Avatar,

    /// Application running flag
    pub running: bool,

    /// Set whenever something visible changed since the last frame
    pub needs_render: bool,
}

impl AppCore {
    pub fn new(
        config: Config,
        catalog: ContentCatalog,
        avatar: Avatar,
        mode_request: Option<&str>,
        width: u16,
    ) -> Result<Self> {
        let zones = catalog.zone_table().context("Invalid zone table")?;
        let dialogs = catalog.dialog_book().context("Invalid zone dialog")?;

        let request = mode_request.or(config.ui.mode.as_deref());
        let modes = ModeSelector::new(
            request,
            width,
            config.ui.narrow_width,
            config.ui.wide_default(),
        );
        let threshold = config.navigation.threshold_for(modes.mode());
        let navigator = Navigator::new(zones, dialogs, config.progression.clone(), threshold);
        let ui = UiState::new(config.ui.show_map);

        Ok(Self {
            config,
            catalog,
            navigator,
            modes,
            ui,
            avatar,
            running: true,
            needs_render: true,
        })
    }

    pub fn mode(&self) -> PresentationMode {
        self.modes.mode()
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let action = route_key(key, self.mode(), &self.ui);
        if action == Action::None {
            tracing::trace!("Unbound key in {} mode: {}", self.mode(), key_event_to_string(key));
            return;
        }
        self.handle_action(action, now);
    }

    pub fn handle_action(&mut self, action: Action, now: Instant) {
        tracing::debug!("Action {:?} in {} mode", action, self.mode());

        match action {
            Action::Quit => self.running = false,
            Action::NextMode => {
                let next = self.mode().next();
                self.switch_mode(next, now);
            }
            Action::PreviousMode => {
                let previous = self.mode().previous();
                self.switch_mode(previous, now);
            }
            Action::CloseOverlay => {
                if !self.ui.close_overlay() && self.mode().is_exploration() {
                    self.navigator.dismiss_dialog();
                }
            }
            Action::CopyContact => {
                let status = clipboard::copy_contact(self.catalog.primary_contact());
                self.set_status(status, now);
            }

            Action::Move(direction) => {
                let (dx, dy) = direction.delta();
                let step = self.config.navigation.step;
                self.ui.mark_moving(now, self.config.ui.move_highlight());
                let transition = self.navigator.move_cursor(dx * step, dy * step);
                self.apply_transition(transition, now);
            }
            Action::Choose(n) => {
                let transition = n.checked_sub(1).and_then(|idx| self.navigator.choose(idx));
                self.apply_transition(transition, now);
            }
            Action::GoHome => {
                let transition = self.navigator.navigate_to(Navigator::START_ZONE);
                self.apply_transition(Some(transition), now);
            }
            Action::ToggleInventory => self.ui.show_inventory = !self.ui.show_inventory,
            Action::ToggleQuestLog => self.ui.show_quest_log = !self.ui.show_quest_log,
            Action::ToggleMap => self.ui.show_map = !self.ui.show_map,
            Action::ScrollPanel(delta) => self.scroll_panel(delta),
            Action::PreviousZone => self.step_mobile(-1, now),
            Action::NextZone => self.step_mobile(1, now),
            Action::FirstZone => {
                if let Some(first) = self.catalog.mobile.order.first().copied() {
                    self.visit(first, now);
                }
            }
            Action::LastZone => {
                if let Some(last) = self.catalog.mobile.order.last().copied() {
                    self.visit(last, now);
                }
            }

            Action::FeedStep(delta) => {
                let target = self.ui.feed_index as i64 + delta as i64;
                self.set_feed_index(target);
            }
            Action::FeedFirst => self.set_feed_index(0),
            Action::FeedLast => self.set_feed_index(i64::MAX),
            Action::ToggleSectionSheet => {
                self.ui.show_section_sheet = !self.ui.show_section_sheet
            }
            Action::JumpToSection(n) => {
                if n >= 1 && n <= self.catalog.feed.sections.len() {
                    self.set_feed_index(n as i64 - 1);
                    self.ui.show_section_sheet = false;
                }
            }
            Action::Like => {
                if let Some(zone) = self.feed_zone() {
                    let liked = self
                        .ui
                        .toggle_like(zone, now, self.config.ui.like_animation());
                    tracing::debug!("{} section liked: {}", zone, liked);
                }
            }

            Action::GridMove(direction) => self.move_grid_selection(direction),
            Action::OpenDetail => {
                if let Some(row) = self.catalog.grid.rows.get(self.ui.grid_row) {
                    self.ui.detail = Some(row.zone);
                    self.ui.panel_scroll = 0;
                }
            }

            Action::None => return,
        }

        self.needs_render = true;
    }

    pub fn handle_pointer(&mut self, pointer: Pointer, now: Instant) {
        match pointer {
            Pointer::Press { col, row } | Pointer::Drag { col, row } => {
                if !self.mode().is_exploration() {
                    return;
                }
                let is_press = matches!(pointer, Pointer::Press { .. });

                if is_press {
                    if let Some(zone) = self.ui.regions.taskbar_zone_at(col, row) {
                        self.visit(zone, now);
                        self.needs_render = true;
                        return;
                    }
                    if let Some(idx) = self.ui.regions.choice_at(col, row) {
                        self.handle_action(Action::Choose(idx + 1), now);
                        return;
                    }
                }

                let target = self
                    .ui
                    .regions
                    .map
                    .and_then(|map| map.to_percent(col, row));
                if let Some(point) = target {
                    self.ui.mark_moving(now, self.config.ui.move_highlight());
                    let transition = self.navigator.jump_to(point);
                    self.apply_transition(transition, now);
                    self.needs_render = true;
                }
            }
            Pointer::ScrollUp | Pointer::ScrollDown => {
                let delta = if pointer == Pointer::ScrollUp { -1 } else { 1 };
                let action = match self.mode() {
                    PresentationMode::Feed => Action::FeedStep(delta),
                    PresentationMode::Grid if self.ui.detail.is_none() => {
                        Action::GridMove(if delta < 0 { Direction::Up } else { Direction::Down })
                    }
                    _ => Action::ScrollPanel(delta as i16),
                };
                self.handle_action(action, now);
            }
        }
    }

    pub fn handle_resize(&mut self, width: u16, height: u16, now: Instant) {
        tracing::debug!("Terminal resized to {}x{}", width, height);
        if self.modes.on_resize(width) {
            self.after_mode_change(now);
        }
        self.needs_render = true;
    }

    /// Advance cosmetic timers
    pub fn tick(&mut self, now: Instant) {
        let banner_len = self.catalog.profile.highlights.len();
        if self
            .ui
            .tick(now, banner_len, self.config.ui.banner_rotation())
        {
            self.needs_render = true;
        }
    }

    /// Zone shown by the feed right now
    pub fn feed_zone(&self) -> Option<ZoneId> {
        self.catalog.feed.sections.get(self.ui.feed_index).copied()
    }

    fn switch_mode(&mut self, mode: PresentationMode, now: Instant) {
        if self.modes.set(mode) {
            self.after_mode_change(now);
        }
    }

    fn after_mode_change(&mut self, now: Instant) {
        let mode = self.mode();
        self.navigator
            .set_threshold(self.config.navigation.threshold_for(mode));
        self.ui.regions = HitRegions::default();
        self.ui.panel_scroll = 0;
        self.set_status(format!("{} mode", mode.title()), now);
    }

    fn visit(&mut self, zone: ZoneId, now: Instant) {
        let transition = self.navigator.navigate_to(zone);
        self.apply_transition(Some(transition), now);
    }

    fn step_mobile(&mut self, delta: i64, now: Instant) {
        let order = &self.catalog.mobile.order;
        if order.is_empty() {
            return;
        }
        let current = self.navigator.current_zone();
        let target = match order.iter().position(|z| *z == current) {
            Some(idx) => (idx as i64 + delta).clamp(0, order.len() as i64 - 1) as usize,
            None => 0,
        };
        let zone = order[target];
        if zone != current {
            self.visit(zone, now);
        }
    }

    fn set_feed_index(&mut self, target: i64) {
        let len = self.catalog.feed.sections.len();
        if len == 0 {
            return;
        }
        let index = target.clamp(0, len as i64 - 1) as usize;
        if index != self.ui.feed_index {
            self.ui.feed_index = index;
            self.ui.panel_scroll = 0;
        }
    }

    fn move_grid_selection(&mut self, direction: Direction) {
        let rows = &self.catalog.grid.rows;
        if rows.is_empty() {
            return;
        }

        match direction {
            Direction::Up => self.ui.grid_row = self.ui.grid_row.saturating_sub(1),
            Direction::Down => self.ui.grid_row = (self.ui.grid_row + 1).min(rows.len() - 1),
            Direction::Left => self.ui.grid_col = self.ui.grid_col.saturating_sub(1),
            Direction::Right => self.ui.grid_col += 1,
        }

        let tiles = self.catalog.tiles(rows[self.ui.grid_row].zone).len();
        self.ui.grid_col = self.ui.grid_col.min(tiles.saturating_sub(1));
    }

    fn scroll_panel(&mut self, delta: i16) {
        self.ui.panel_scroll = if delta < 0 {
            self.ui.panel_scroll.saturating_sub(delta.unsigned_abs())
        } else {
            self.ui.panel_scroll.saturating_add(delta as u16)
        };
    }

    fn apply_transition(&mut self, transition: Option<Transition>, now: Instant) {
        let Some(transition) = transition else {
            return;
        };
        if !transition.changed_zone() {
            return;
        }

        self.ui.panel_scroll = 0;

        let zone = self.catalog.zone(transition.to);
        let mut status = format!("{}  +{} EXP", zone.name, transition.experience_gained);
        if let Some(milestone) = transition.milestone {
            status.push_str(&format!("  Quest complete: {}", milestone.title()));
        }
        if transition.levels_gained > 0 {
            status.push_str(&format!(
                "  Level up! Lv {}",
                self.navigator.progression().level
            ));
        }
        self.set_status(status, now);
    }

    fn set_status(&mut self, text: String, now: Instant) {
        self.ui.set_status(text, now, self.config.ui.status_duration());
        self.needs_render = true;
    }
}
