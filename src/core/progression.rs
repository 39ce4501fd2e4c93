//! Experience, levels and milestone quests
//!
//! Progression only ever grows during a session: experience is awarded on
//! zone transitions, levels never go down and a completed milestone stays
//! completed. Nothing here is persisted.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::zone::ZoneId;

/// One-time quests, each tied to the first visit of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Milestone {
    ArtificersTale,
    GrimoireOfSkills,
    LegendaryArtifacts,
    SacredScrolls,
    AncientKnowledge,
}

impl Milestone {
    pub const COUNT: usize = 5;

    pub const ALL: [Milestone; Self::COUNT] = [
        Milestone::ArtificersTale,
        Milestone::GrimoireOfSkills,
        Milestone::LegendaryArtifacts,
        Milestone::SacredScrolls,
        Milestone::AncientKnowledge,
    ];

    /// Milestone completed by entering `zone`, if any
    pub fn for_zone(zone: ZoneId) -> Option<Self> {
        match zone {
            ZoneId::About => Some(Milestone::ArtificersTale),
            ZoneId::Skills => Some(Milestone::GrimoireOfSkills),
            ZoneId::Projects => Some(Milestone::LegendaryArtifacts),
            ZoneId::Certifications => Some(Milestone::SacredScrolls),
            ZoneId::Education => Some(Milestone::AncientKnowledge),
            ZoneId::Home | ZoneId::Contact => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Milestone::ArtificersTale => "The Artificer's Tale",
            Milestone::GrimoireOfSkills => "Grimoire of Skills",
            Milestone::LegendaryArtifacts => "Legendary Artifacts",
            Milestone::SacredScrolls => "Sacred Scrolls",
            Milestone::AncientKnowledge => "Ancient Knowledge",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Milestone::ArtificersTale => "Learn about Mohammed's background",
            Milestone::GrimoireOfSkills => "Discover the technical abilities",
            Milestone::LegendaryArtifacts => "Explore the legendary projects",
            Milestone::SacredScrolls => "Examine the sacred certification scrolls",
            Milestone::AncientKnowledge => "Study the ancient records of education",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Tunable progression constants, read from the `[progression]` config table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionRules {
    #[serde(default = "default_base_award")]
    pub base_award: u32,
    #[serde(default = "default_milestone_bonus")]
    pub milestone_bonus: u32,
    #[serde(default = "default_starting_level")]
    pub starting_level: u32,
    #[serde(default = "default_starting_experience_cap")]
    pub starting_experience_cap: u32,
    #[serde(default = "default_starting_health")]
    pub starting_health: u32,
    #[serde(default = "default_starting_mana")]
    pub starting_mana: u32,
    #[serde(default = "default_experience_cap_multiplier")]
    pub experience_cap_multiplier: f64,
    #[serde(default = "default_vital_multiplier")]
    pub vital_multiplier: f64,
}

fn default_base_award() -> u32 {
    25
}

fn default_milestone_bonus() -> u32 {
    50
}

fn default_starting_level() -> u32 {
    1
}

fn default_starting_experience_cap() -> u32 {
    100
}

fn default_starting_health() -> u32 {
    100
}

fn default_starting_mana() -> u32 {
    50
}

fn default_experience_cap_multiplier() -> f64 {
    1.5
}

fn default_vital_multiplier() -> f64 {
    1.2
}

impl Default for ProgressionRules {
    fn default() -> Self {
        Self {
            base_award: default_base_award(),
            milestone_bonus: default_milestone_bonus(),
            starting_level: default_starting_level(),
            starting_experience_cap: default_starting_experience_cap(),
            starting_health: default_starting_health(),
            starting_mana: default_starting_mana(),
            experience_cap_multiplier: default_experience_cap_multiplier(),
            vital_multiplier: default_vital_multiplier(),
        }
    }
}

impl ProgressionRules {
    /// Reject rules that would shrink caps or stall the level-up loop
    pub fn validate(&self) -> Result<()> {
        if self.starting_level == 0 {
            bail!("starting_level must be at least 1");
        }
        if self.starting_experience_cap == 0 {
            bail!("starting_experience_cap must be at least 1");
        }
        for (name, value) in [
            ("experience_cap_multiplier", self.experience_cap_multiplier),
            ("vital_multiplier", self.vital_multiplier),
        ] {
            if !value.is_finite() || value < 1.0 {
                bail!("{} must be a finite number >= 1.0 (got {})", name, value);
            }
        }
        Ok(())
    }
}

/// Scale `value` by `factor`, rounding down
fn scale(value: u32, factor: f64) -> u32 {
    // `as` saturates at u32::MAX
    (value as f64 * factor).floor() as u32
}

/// Session progression counters
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionState {
    pub level: u32,
    pub experience: u32,
    pub experience_to_next_level: u32,
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    completed: [bool; Milestone::COUNT],
}

impl ProgressionState {
    pub fn new(rules: &ProgressionRules) -> Self {
        Self {
            level: rules.starting_level,
            experience: 0,
            experience_to_next_level: rules.starting_experience_cap,
            health: rules.starting_health,
            max_health: rules.starting_health,
            mana: rules.starting_mana,
            max_mana: rules.starting_mana,
            completed: [false; Milestone::COUNT],
        }
    }

    pub fn is_completed(&self, milestone: Milestone) -> bool {
        self.completed[milestone.index()]
    }

    pub fn completed_count(&self) -> usize {
        self.completed.iter().filter(|done| **done).count()
    }

    /// Mark a milestone complete; returns false if it already was
    pub fn complete(&mut self, milestone: Milestone) -> bool {
        let slot = &mut self.completed[milestone.index()];
        if *slot {
            return false;
        }
        *slot = true;
        true
    }

    /// Add experience and apply any level-ups it causes
    ///
    /// Returns the number of levels gained. Overflow carries into the next
    /// level, so a single large award can raise several levels at once.
    pub fn gain_experience(&mut self, amount: u32, rules: &ProgressionRules) -> u32 {
        self.experience = self.experience.saturating_add(amount);

        let mut levels = 0;
        while self.experience >= self.experience_to_next_level {
            self.experience -= self.experience_to_next_level;
            self.level = self.level.saturating_add(1);
            self.experience_to_next_level =
                scale(self.experience_to_next_level, rules.experience_cap_multiplier).max(1);
            self.max_health = scale(self.max_health, rules.vital_multiplier);
            self.health = self.max_health;
            self.max_mana = scale(self.max_mana, rules.vital_multiplier);
            self.mana = self.max_mana;
            levels += 1;
        }
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_state() {
        let rules = ProgressionRules::default();
        let state = ProgressionState::new(&rules);
        assert_eq!(state.level, 1);
        assert_eq!(state.experience, 0);
        assert_eq!(state.experience_to_next_level, 100);
        assert_eq!((state.health, state.max_health), (100, 100));
        assert_eq!((state.mana, state.max_mana), (50, 50));
        assert_eq!(state.completed_count(), 0);
    }

    #[test]
    fn test_gain_without_level_up() {
        let rules = ProgressionRules::default();
        let mut state = ProgressionState::new(&rules);
        assert_eq!(state.gain_experience(25, &rules), 0);
        assert_eq!(state.experience, 25);
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_level_up_carries_overflow() {
        let rules = ProgressionRules::default();
        let mut state = ProgressionState::new(&rules);
        state.experience = 95;
        state.health = 40;

        assert_eq!(state.gain_experience(25, &rules), 1);
        assert_eq!(state.level, 2);
        assert_eq!(state.experience, 20);
        assert_eq!(state.experience_to_next_level, 150);
        assert_eq!((state.health, state.max_health), (120, 120));
        assert_eq!((state.mana, state.max_mana), (60, 60));
    }

    #[test]
    fn test_large_award_raises_several_levels() {
        let rules = ProgressionRules::default();
        let mut state = ProgressionState::new(&rules);

        // 100 + 150 + 225 = 475 needed for level 4
        assert_eq!(state.gain_experience(500, &rules), 3);
        assert_eq!(state.level, 4);
        assert_eq!(state.experience, 25);
        assert_eq!(state.experience_to_next_level, 337);
        assert_eq!(state.max_health, 172);
        assert_eq!(state.max_mana, 86);
        assert!(state.experience < state.experience_to_next_level);
    }

    #[test]
    fn test_milestones_complete_once() {
        let rules = ProgressionRules::default();
        let mut state = ProgressionState::new(&rules);
        assert!(state.complete(Milestone::SacredScrolls));
        assert!(!state.complete(Milestone::SacredScrolls));
        assert!(state.is_completed(Milestone::SacredScrolls));
        assert_eq!(state.completed_count(), 1);
    }

    #[test]
    fn test_milestone_zone_mapping_round_trips() {
        // Every milestone is reachable from exactly one zone
        for milestone in Milestone::ALL {
            let zones = ZoneId::ALL
                .iter()
                .filter(|z| Milestone::for_zone(**z) == Some(milestone))
                .count();
            assert_eq!(zones, 1, "{:?}", milestone);
        }
        assert_eq!(Milestone::for_zone(ZoneId::Home), None);
        assert_eq!(Milestone::for_zone(ZoneId::Contact), None);
    }

    #[test]
    fn test_rules_validation() {
        assert!(ProgressionRules::default().validate().is_ok());

        let shrinking = ProgressionRules {
            experience_cap_multiplier: 0.5,
            ..Default::default()
        };
        assert!(shrinking.validate().is_err());

        let nan = ProgressionRules {
            vital_multiplier: f64::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());

        let zero_cap = ProgressionRules {
            starting_experience_cap: 0,
            ..Default::default()
        };
        assert!(zero_cap.validate().is_err());
    }

    #[test]
    fn test_rules_partial_table_uses_defaults() {
        let rules: ProgressionRules = toml::from_str("base_award = 10").unwrap();
        assert_eq!(rules.base_award, 10);
        assert_eq!(rules.milestone_bonus, 50);
        assert_eq!(rules.experience_cap_multiplier, 1.5);
    }
}
