//! Zone-proximity navigation state machine
//!
//! The navigator owns the cursor, the current zone, the visible dialog and
//! the session's progression. The cursor moves freely over the map; as soon
//! as it comes strictly within the proximity threshold of a zone other than
//! the current one, the navigator transitions there, snaps the cursor onto
//! the zone anchor and awards experience.

use super::dialog::{Dialog, DialogBook};
use super::progression::{Milestone, ProgressionRules, ProgressionState};
use super::zone::{Point, ZoneId, ZoneTable};

/// Where the visitor is
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigatorState {
    pub current_zone: ZoneId,
    pub cursor: Point,
}

/// Outcome of a `navigate_to` call
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub from: ZoneId,
    pub to: ZoneId,
    pub experience_gained: u32,
    pub milestone: Option<Milestone>,
    pub levels_gained: u32,
}

impl Transition {
    /// False for a same-zone re-centre, which awards nothing
    pub fn changed_zone(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    zones: ZoneTable,
    dialogs: DialogBook,
    rules: ProgressionRules,
    threshold: f64,
    state: NavigatorState,
    progression: ProgressionState,
    dialog: Option<Dialog>,
}

impl Navigator {
    pub const START_ZONE: ZoneId = ZoneId::Home;

    pub fn new(
        zones: ZoneTable,
        dialogs: DialogBook,
        rules: ProgressionRules,
        threshold: f64,
    ) -> Self {
        let start = zones.get(Self::START_ZONE).position;
        let dialog = Some(dialogs.for_zone(Self::START_ZONE).clone());
        let progression = ProgressionState::new(&rules);

        Self {
            zones,
            dialogs,
            rules,
            threshold,
            state: NavigatorState {
                current_zone: Self::START_ZONE,
                cursor: start,
            },
            progression,
            dialog,
        }
    }

    pub fn current_zone(&self) -> ZoneId {
        self.state.current_zone
    }

    pub fn cursor(&self) -> Point {
        self.state.cursor
    }

    pub fn zones(&self) -> &ZoneTable {
        &self.zones
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    /// Dialog currently on screen, if not dismissed
    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        if (self.threshold - threshold).abs() > f64::EPSILON {
            tracing::debug!("Proximity threshold {} -> {}", self.threshold, threshold);
            self.threshold = threshold;
        }
    }

    /// Move the cursor by a delta, clamped to the map, then check proximity
    pub fn move_cursor(&mut self, dx: f64, dy: f64) -> Option<Transition> {
        self.state.cursor = self.state.cursor.offset(dx, dy);
        self.check_proximity()
    }

    /// Place the cursor at an absolute map position, then check proximity
    pub fn jump_to(&mut self, position: Point) -> Option<Transition> {
        self.state.cursor = Point::clamped(position.x, position.y);
        self.check_proximity()
    }

    /// Transition to the nearest zone under the threshold, if it is not the
    /// current one
    pub fn check_proximity(&mut self) -> Option<Transition> {
        let nearest = self.zones.nearest_within(self.state.cursor, self.threshold)?;
        if nearest == self.state.current_zone {
            return None;
        }
        Some(self.navigate_to(nearest))
    }

    pub fn navigate_to(&mut self, zone: ZoneId) -> Transition {
        let from = self.state.current_zone;
        self.state.cursor = self.zones.get(zone).position;
        self.dialog = Some(self.dialogs.for_zone(zone).clone());

        if from == zone {
            return Transition {
                from,
                to: zone,
                experience_gained: 0,
                milestone: None,
                levels_gained: 0,
            };
        }

        self.state.current_zone = zone;

        let milestone = Milestone::for_zone(zone).filter(|m| self.progression.complete(*m));
        let mut experience = self.rules.base_award;
        if milestone.is_some() {
            experience = experience.saturating_add(self.rules.milestone_bonus);
        }
        let levels_gained = self.progression.gain_experience(experience, &self.rules);

        tracing::info!(
            "Entered {} from {} (+{} exp{}{})",
            zone,
            from,
            experience,
            milestone
                .map(|m| format!(", completed '{}'", m.title()))
                .unwrap_or_default(),
            if levels_gained > 0 {
                format!(", now level {}", self.progression.level)
            } else {
                String::new()
            }
        );

        Transition {
            from,
            to: zone,
            experience_gained: experience,
            milestone,
            levels_gained,
        }
    }

    /// Follow a choice of the visible dialog (0-based)
    pub fn choose(&mut self, index: usize) -> Option<Transition> {
        let target = self.dialog.as_ref()?.choices.get(index)?.target;
        Some(self.navigate_to(target))
    }

    pub fn dismiss_dialog(&mut self) -> bool {
        self.dialog.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dialog::tests::simple_book;
    use crate::core::zone::tests::adventure_table;

    fn navigator() -> Navigator {
        Navigator::new(
            adventure_table(),
            simple_book(),
            ProgressionRules::default(),
            15.0,
        )
    }

    #[test]
    fn test_initial_state() {
        let nav = navigator();
        assert_eq!(nav.current_zone(), ZoneId::Home);
        assert_eq!(nav.cursor(), Point::new(50.0, 80.0));
        assert_eq!(nav.progression().level, 1);
        assert_eq!(nav.progression().experience, 0);
        assert_eq!(nav.progression().experience_to_next_level, 100);
        assert_eq!(nav.progression().health, 100);
        assert_eq!(nav.progression().mana, 50);
        assert_eq!(nav.progression().completed_count(), 0);
        assert_eq!(nav.dialog().map(|d| d.text.as_str()), Some("Welcome to home"));
    }

    #[test]
    fn test_walking_into_a_zone_transitions() {
        let mut nav = navigator();

        // (50,75), (50,70), (50,65) are out of every zone's reach
        for _ in 0..3 {
            assert!(nav.move_cursor(0.0, -5.0).is_none());
            assert_eq!(nav.current_zone(), ZoneId::Home);
        }

        // (50,60) is ~14.1 from Education at (40,50)
        let transition = nav.move_cursor(0.0, -5.0).expect("entered education");
        assert_eq!(transition.from, ZoneId::Home);
        assert_eq!(transition.to, ZoneId::Education);
        assert_eq!(transition.milestone, Some(Milestone::AncientKnowledge));
        assert_eq!(transition.experience_gained, 75);
        assert_eq!(nav.current_zone(), ZoneId::Education);
        assert_eq!(nav.cursor(), Point::new(40.0, 50.0));
        assert_eq!(nav.progression().experience, 75);
    }

    #[test]
    fn test_near_current_zone_is_not_a_transition() {
        let mut nav = navigator();
        assert!(nav.move_cursor(5.0, 0.0).is_none());
        assert_eq!(nav.current_zone(), ZoneId::Home);
        assert_eq!(nav.progression().experience, 0);
    }

    #[test]
    fn test_same_zone_navigation_awards_nothing() {
        let mut nav = navigator();
        nav.move_cursor(5.0, 0.0);
        nav.dismiss_dialog();

        let transition = nav.navigate_to(ZoneId::Home);
        assert!(!transition.changed_zone());
        assert_eq!(transition.experience_gained, 0);
        assert_eq!(nav.cursor(), Point::new(50.0, 80.0));
        assert!(nav.dialog().is_some());
        assert_eq!(nav.progression().experience, 0);
    }

    #[test]
    fn test_first_visit_to_about() {
        let mut nav = navigator();
        nav.navigate_to(ZoneId::About);

        assert_eq!(nav.current_zone(), ZoneId::About);
        assert_eq!(nav.cursor(), Point::new(20.0, 40.0));
        assert_eq!(nav.progression().experience, 75);
        assert_eq!(nav.progression().level, 1);
        assert!(nav.progression().is_completed(Milestone::ArtificersTale));
    }

    #[test]
    fn test_milestone_bonus_only_once() {
        let mut nav = navigator();

        let first = nav.navigate_to(ZoneId::About);
        assert_eq!(first.milestone, Some(Milestone::ArtificersTale));
        assert_eq!(first.experience_gained, 75);

        nav.navigate_to(ZoneId::Home);
        let again = nav.navigate_to(ZoneId::About);
        assert_eq!(again.milestone, None);
        assert_eq!(again.experience_gained, 25);
        assert!(nav.progression().is_completed(Milestone::ArtificersTale));
        assert_eq!(nav.progression().completed_count(), 1);
    }

    #[test]
    fn test_level_up_on_transition() {
        let mut nav = navigator();
        nav.progression.experience = 95;

        let transition = nav.navigate_to(ZoneId::Contact);
        assert_eq!(transition.levels_gained, 1);
        assert_eq!(nav.progression().level, 2);
        assert_eq!(nav.progression().experience, 20);
        assert_eq!(nav.progression().experience_to_next_level, 150);
        assert_eq!(nav.progression().max_health, 120);
        assert_eq!(nav.progression().max_mana, 60);
    }

    #[test]
    fn test_cursor_stays_on_the_map() {
        let mut nav = navigator();
        let deltas = [
            (-500.0, 0.0),
            (0.0, 900.0),
            (1e9, -1e9),
            (f64::INFINITY, f64::NEG_INFINITY),
            (f64::NAN, 3.0),
            (-7.5, 12.25),
        ];
        for (dx, dy) in deltas {
            nav.move_cursor(dx, dy);
            assert!(nav.cursor().in_bounds(), "{:?} escaped", nav.cursor());
        }
    }

    #[test]
    fn test_jump_to_clamps_and_transitions() {
        let mut nav = navigator();
        let transition = nav.jump_to(Point::new(82.0, 38.0)).expect("near certifications");
        assert_eq!(transition.to, ZoneId::Certifications);

        nav.jump_to(Point::new(-20.0, 250.0));
        assert_eq!(nav.cursor(), Point::new(0.0, 100.0));
        assert_eq!(nav.current_zone(), ZoneId::Certifications);
    }

    #[test]
    fn test_wider_threshold_reaches_further() {
        let mut nav = navigator();
        // ~18 from Education, ~20.6 from About
        assert!(nav.jump_to(Point::new(25.0, 60.0)).is_none());
        assert_eq!(nav.current_zone(), ZoneId::Home);

        nav.set_threshold(20.0);
        let transition = nav.check_proximity().expect("now in reach");
        assert_eq!(transition.to, ZoneId::Education);
    }

    #[test]
    fn test_dialog_choices() {
        let mut nav = navigator();
        let transition = nav.choose(0).expect("first choice");
        assert_eq!(transition.to, ZoneId::About);
        assert!(nav.choose(7).is_none());

        nav.dismiss_dialog();
        assert!(nav.choose(0).is_none());
        assert_eq!(nav.current_zone(), ZoneId::About);
    }
}
