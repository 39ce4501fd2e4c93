//! Input routing per presentation mode
//!
//! Routes keyboard input to an `Action` based on:
//! - the active `PresentationMode`
//! - open overlays (the feed's section sheet, the grid's detail view)

use crate::core::actions::{Action, Direction};
use crate::core::mode::PresentationMode;
use crate::data::ui_state::UiState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Route a key event to an Action for the current mode
pub fn route_key(key: KeyEvent, mode: PresentationMode, ui: &UiState) -> Action {
    if let Some(action) = route_global(key) {
        return action;
    }

    match mode {
        PresentationMode::Explore => route_explore(key),
        PresentationMode::Mobile => route_mobile(key),
        PresentationMode::Feed => route_feed(key, ui),
        PresentationMode::Grid => route_grid(key, ui),
    }
}

fn route_global(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            _ => Some(Action::None),
        };
    }

    match key.code {
        KeyCode::Tab => Some(Action::NextMode),
        KeyCode::BackTab => Some(Action::PreviousMode),
        KeyCode::Esc => Some(Action::CloseOverlay),
        KeyCode::Char('y') => Some(Action::CopyContact),
        _ => None,
    }
}

fn digit(c: char) -> Option<usize> {
    c.to_digit(10).filter(|d| *d > 0).map(|d| d as usize)
}

/// Keys shared by the two navigator-driven modes
fn route_exploration_common(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('w') => Action::Move(Direction::Up),
        KeyCode::Char('a') => Action::Move(Direction::Left),
        KeyCode::Char('s') => Action::Move(Direction::Down),
        KeyCode::Char('d') => Action::Move(Direction::Right),
        KeyCode::Char(c) if digit(c).is_some() => digit(c).map_or(Action::None, Action::Choose),
        KeyCode::Enter => Action::Choose(1),
        KeyCode::Char('h') => Action::GoHome,
        KeyCode::Char('i') => Action::ToggleInventory,
        KeyCode::Char('q') => Action::ToggleQuestLog,
        KeyCode::PageUp => Action::ScrollPanel(-5),
        KeyCode::PageDown => Action::ScrollPanel(5),
        _ => Action::None,
    }
}

fn route_explore(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Up => Action::Move(Direction::Up),
        KeyCode::Down => Action::Move(Direction::Down),
        KeyCode::Left => Action::Move(Direction::Left),
        KeyCode::Right => Action::Move(Direction::Right),
        KeyCode::Char('m') => Action::ToggleMap,
        _ => route_exploration_common(key),
    }
}

fn route_mobile(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Left | KeyCode::Up => Action::PreviousZone,
        KeyCode::Right | KeyCode::Down => Action::NextZone,
        KeyCode::Home => Action::FirstZone,
        KeyCode::End => Action::LastZone,
        _ => route_exploration_common(key),
    }
}

fn route_feed(key: KeyEvent, ui: &UiState) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::PageUp | KeyCode::Char('k') => Action::FeedStep(-1),
        KeyCode::Down | KeyCode::PageDown | KeyCode::Char('j') | KeyCode::Char(' ') => {
            Action::FeedStep(1)
        }
        KeyCode::Home => Action::FeedFirst,
        KeyCode::End => Action::FeedLast,
        KeyCode::Char('s') => Action::ToggleSectionSheet,
        KeyCode::Char('l') => Action::Like,
        KeyCode::Char(c) if ui.show_section_sheet && digit(c).is_some() => {
            digit(c).map_or(Action::None, Action::JumpToSection)
        }
        _ => Action::None,
    }
}

fn route_grid(key: KeyEvent, ui: &UiState) -> Action {
    if ui.detail.is_some() {
        return match key.code {
            KeyCode::Up | KeyCode::PageUp => Action::ScrollPanel(-1),
            KeyCode::Down | KeyCode::PageDown => Action::ScrollPanel(1),
            KeyCode::Enter | KeyCode::Backspace => Action::CloseOverlay,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Up => Action::GridMove(Direction::Up),
        KeyCode::Down => Action::GridMove(Direction::Down),
        KeyCode::Left => Action::GridMove(Direction::Left),
        KeyCode::Right => Action::GridMove(Direction::Right),
        KeyCode::Enter => Action::OpenDetail,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_global_keys_work_in_every_mode() {
        let ui = UiState::default();
        for mode in PresentationMode::ALL {
            assert_eq!(route_key(key(KeyCode::Tab), mode, &ui), Action::NextMode);
            assert_eq!(route_key(key(KeyCode::BackTab), mode, &ui), Action::PreviousMode);
            assert_eq!(
                route_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), mode, &ui),
                Action::Quit
            );
            assert_eq!(route_key(key(KeyCode::Char('y')), mode, &ui), Action::CopyContact);
        }
    }

    #[test]
    fn test_explore_keys() {
        let ui = UiState::default();
        let mode = PresentationMode::Explore;
        assert_eq!(route_key(key(KeyCode::Up), mode, &ui), Action::Move(Direction::Up));
        assert_eq!(route_key(key(KeyCode::Char('3')), mode, &ui), Action::Choose(3));
        assert_eq!(route_key(key(KeyCode::Char('0')), mode, &ui), Action::None);
        assert_eq!(route_key(key(KeyCode::Char('q')), mode, &ui), Action::ToggleQuestLog);
        assert_eq!(route_key(key(KeyCode::Char('m')), mode, &ui), Action::ToggleMap);
    }

    #[test]
    fn test_mobile_arrows_walk_the_taskbar() {
        let ui = UiState::default();
        let mode = PresentationMode::Mobile;
        assert_eq!(route_key(key(KeyCode::Right), mode, &ui), Action::NextZone);
        assert_eq!(route_key(key(KeyCode::Up), mode, &ui), Action::PreviousZone);
        assert_eq!(route_key(key(KeyCode::Char('w')), mode, &ui), Action::Move(Direction::Up));
        assert_eq!(route_key(key(KeyCode::Char('m')), mode, &ui), Action::None);
    }

    #[test]
    fn test_feed_digits_need_the_sheet() {
        let mut ui = UiState::default();
        let mode = PresentationMode::Feed;
        assert_eq!(route_key(key(KeyCode::Char('2')), mode, &ui), Action::None);
        ui.show_section_sheet = true;
        assert_eq!(route_key(key(KeyCode::Char('2')), mode, &ui), Action::JumpToSection(2));
        assert_eq!(route_key(key(KeyCode::PageDown), mode, &ui), Action::FeedStep(1));
    }

    #[test]
    fn test_grid_detail_captures_arrows() {
        let mut ui = UiState::default();
        let mode = PresentationMode::Grid;
        assert_eq!(
            route_key(key(KeyCode::Left), mode, &ui),
            Action::GridMove(Direction::Left)
        );
        ui.detail = Some(crate::core::zone::ZoneId::Skills);
        assert_eq!(route_key(key(KeyCode::Left), mode, &ui), Action::None);
        assert_eq!(route_key(key(KeyCode::Down), mode, &ui), Action::ScrollPanel(1));
        assert_eq!(route_key(key(KeyCode::Esc), mode, &ui), Action::CloseOverlay);
    }
}
