//! Configuration loader plus strongly typed settings structures.
//!
//! Settings live in `~/.folio/config.toml` (override the directory with
//! `FOLIO_DIR`). The shipped defaults are embedded at compile time and
//! extracted on first run; missing keys fall back to the same defaults.

use anyhow::{Context, Result};
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::mode::PresentationMode;
use crate::core::progression::ProgressionRules;

// Embed default configuration files at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

// Everything under defaults/ is extracted into the data directory
static DEFAULTS_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/defaults");

pub const CONFIG_FILE: &str = "config.toml";
pub const CONTENT_FILE: &str = "content.toml";
pub const LOG_FILE: &str = "folio.log";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub progression: ProgressionRules,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Terminals narrower than this are classified as narrow
    #[serde(default = "default_narrow_width")]
    pub narrow_width: u16,
    #[serde(default = "default_wide_default_mode")]
    pub wide_default_mode: String,
    /// Startup mode request, same values as `--mode`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(default = "default_true")]
    pub show_map: bool,
    #[serde(default = "default_banner_rotation_secs")]
    pub banner_rotation_secs: u64,
    #[serde(default = "default_move_highlight_ms")]
    pub move_highlight_ms: u64,
    #[serde(default = "default_like_animation_ms")]
    pub like_animation_ms: u64,
    #[serde(default = "default_status_duration_ms")]
    pub status_duration_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            narrow_width: default_narrow_width(),
            wide_default_mode: default_wide_default_mode(),
            mode: None,
            show_map: default_true(),
            banner_rotation_secs: default_banner_rotation_secs(),
            move_highlight_ms: default_move_highlight_ms(),
            like_animation_ms: default_like_animation_ms(),
            status_duration_ms: default_status_duration_ms(),
        }
    }
}

impl UiConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn banner_rotation(&self) -> Duration {
        Duration::from_secs(self.banner_rotation_secs)
    }

    pub fn move_highlight(&self) -> Duration {
        Duration::from_millis(self.move_highlight_ms)
    }

    pub fn like_animation(&self) -> Duration {
        Duration::from_millis(self.like_animation_ms)
    }

    pub fn status_duration(&self) -> Duration {
        Duration::from_millis(self.status_duration_ms)
    }

    /// Mode for wide terminals when nothing was requested
    pub fn wide_default(&self) -> PresentationMode {
        PresentationMode::parse(&self.wide_default_mode).unwrap_or(PresentationMode::Grid)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Cursor step per arrow key, in map units
    #[serde(default = "default_step")]
    pub step: f64,
    #[serde(default = "default_proximity_threshold")]
    pub proximity_threshold: f64,
    #[serde(default = "default_mobile_proximity_threshold")]
    pub mobile_proximity_threshold: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            proximity_threshold: default_proximity_threshold(),
            mobile_proximity_threshold: default_mobile_proximity_threshold(),
        }
    }
}

impl NavigationConfig {
    pub fn threshold_for(&self, mode: PresentationMode) -> f64 {
        match mode {
            PresentationMode::Mobile => self.mobile_proximity_threshold,
            _ => self.proximity_threshold,
        }
    }
}

fn default_tick_ms() -> u64 {
    33
}

fn default_narrow_width() -> u16 {
    100
}

fn default_wide_default_mode() -> String {
    "grid".to_string()
}

fn default_true() -> bool {
    true
}

fn default_banner_rotation_secs() -> u64 {
    5
}

fn default_move_highlight_ms() -> u64 {
    300
}

fn default_like_animation_ms() -> u64 {
    1000
}

fn default_status_duration_ms() -> u64 {
    2500
}

fn default_step() -> f64 {
    5.0
}

fn default_proximity_threshold() -> f64 {
    15.0
}

fn default_mobile_proximity_threshold() -> f64 {
    20.0
}

impl Config {
    /// Load settings from `path`, or from the data directory when `None`
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                // Idempotent: only creates missing files
                Self::extract_defaults()?;
                Self::config_path()?
            }
        };
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        Self::from_toml_str(&contents).context(format!("Failed to parse config file: {:?}", path))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        config.sanitize();
        Ok(config)
    }

    /// The configuration shipped with the binary
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG).context("Failed to parse embedded config.toml")
    }

    /// Replace values that would break navigation or progression
    fn sanitize(&mut self) {
        if let Err(e) = self.progression.validate() {
            tracing::warn!("Invalid [progression] settings ({}), using defaults", e);
            self.progression = ProgressionRules::default();
        }

        let defaults = NavigationConfig::default();
        let nav = &mut self.navigation;
        for (name, value, fallback) in [
            ("step", &mut nav.step, defaults.step),
            (
                "proximity_threshold",
                &mut nav.proximity_threshold,
                defaults.proximity_threshold,
            ),
            (
                "mobile_proximity_threshold",
                &mut nav.mobile_proximity_threshold,
                defaults.mobile_proximity_threshold,
            ),
        ] {
            if !value.is_finite() || *value <= 0.0 {
                tracing::warn!(
                    "navigation.{} must be a positive number (got {}), using {}",
                    name,
                    value,
                    fallback
                );
                *value = fallback;
            }
        }

        if PresentationMode::parse(&self.ui.wide_default_mode).is_none() {
            tracing::warn!(
                "Unknown ui.wide_default_mode '{}', using grid",
                self.ui.wide_default_mode
            );
            self.ui.wide_default_mode = default_wide_default_mode();
        }

        if self.ui.tick_ms == 0 {
            tracing::warn!("ui.tick_ms must be at least 1, using {}", default_tick_ms());
            self.ui.tick_ms = default_tick_ms();
        }
    }

    /// Write any embedded default missing from the data directory
    pub fn extract_defaults() -> Result<()> {
        Self::extract_defaults_to(&Self::base_dir()?)
    }

    pub fn extract_defaults_to(dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).context(format!("Failed to create data directory {:?}", dir))?;

        for file in DEFAULTS_DIR.files() {
            let filename = file
                .path()
                .file_name()
                .and_then(|n| n.to_str())
                .context("Invalid default filename")?;
            let target = dir.join(filename);

            if !target.exists() {
                fs::write(&target, file.contents())
                    .context(format!("Failed to write {}", filename))?;
                tracing::info!("Extracted {} to {:?}", filename, target);
            }
        }

        Ok(())
    }

    /// Get the base folio directory (~/.folio/)
    /// Can be overridden with FOLIO_DIR environment variable
    pub fn base_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var("FOLIO_DIR") {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".folio"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join(CONFIG_FILE))
    }

    pub fn content_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join(CONTENT_FILE))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join(LOG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let embedded = Config::embedded().expect("embedded config parses");
        assert_eq!(embedded, Config::default());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = Config::from_toml_str("[ui]\ntick_ms = 50\n").unwrap();
        assert_eq!(config.ui.tick_ms, 50);
        assert_eq!(config.ui.narrow_width, 100);
        assert_eq!(config.navigation, NavigationConfig::default());
        assert_eq!(config.progression, ProgressionRules::default());
    }

    #[test]
    fn test_invalid_progression_falls_back() {
        let config = Config::from_toml_str(
            "[progression]\nbase_award = 40\nexperience_cap_multiplier = 0.25\n",
        )
        .unwrap();
        assert_eq!(config.progression, ProgressionRules::default());
    }

    #[test]
    fn test_invalid_navigation_values_fall_back() {
        let config = Config::from_toml_str(
            "[navigation]\nstep = -3.0\nproximity_threshold = 0.0\nmobile_proximity_threshold = 30.0\n",
        )
        .unwrap();
        assert_eq!(config.navigation.step, 5.0);
        assert_eq!(config.navigation.proximity_threshold, 15.0);
        assert_eq!(config.navigation.mobile_proximity_threshold, 30.0);
    }

    #[test]
    fn test_wide_default_mode() {
        let config = Config::from_toml_str("[ui]\nwide_default_mode = \"netflix\"\n").unwrap();
        assert_eq!(config.ui.wide_default(), PresentationMode::Grid);

        let config = Config::from_toml_str("[ui]\nwide_default_mode = \"explore\"\n").unwrap();
        assert_eq!(config.ui.wide_default(), PresentationMode::Explore);

        let config = Config::from_toml_str("[ui]\nwide_default_mode = \"cinema\"\n").unwrap();
        assert_eq!(config.ui.wide_default_mode, "grid");
    }

    #[test]
    fn test_threshold_per_mode() {
        let nav = NavigationConfig::default();
        assert_eq!(nav.threshold_for(PresentationMode::Explore), 15.0);
        assert_eq!(nav.threshold_for(PresentationMode::Mobile), 20.0);
    }

    #[test]
    fn test_extract_defaults_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        Config::extract_defaults_to(dir.path()).unwrap();

        let config_path = dir.path().join(CONFIG_FILE);
        assert!(config_path.exists());
        assert!(dir.path().join(CONTENT_FILE).exists());

        // User edits survive a second extraction
        fs::write(&config_path, "[ui]\ntick_ms = 99\n").unwrap();
        Config::extract_defaults_to(dir.path()).unwrap();
        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.ui.tick_ms, 99);
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[ui\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));
    }
}
