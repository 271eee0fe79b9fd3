//! Planner configuration.
//!
//! Optional TOML file under the platform config directory controlling the
//! view window, slot granularity, week start, and theme preference. Any
//! missing or malformed value falls back to the defaults.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::models::grid::TimeGrid;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub view_start_hour: u32,
    pub view_end_hour: u32,
    pub slots_per_hour: u32,
    /// 0 = Sunday, 1 = Monday.
    pub first_day_of_week: u8,
    /// "light" or "dark"; ignored when `use_system_theme` is set.
    pub theme: String,
    pub use_system_theme: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            view_start_hour: 5,
            view_end_hour: 23,
            slots_per_hour: 2,
            first_day_of_week: 0,
            theme: "light".to_string(),
            use_system_theme: true,
        }
    }
}

impl PlannerConfig {
    /// Load from the platform config dir, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(data) = fs::read_to_string(path) else {
            return Self::default();
        };
        match toml::from_str::<Self>(&data) {
            Ok(config) => config.sanitized(),
            Err(err) => {
                log::warn!("Malformed config {}; using defaults: {}", path.display(), err);
                Self::default()
            }
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "timeblocks").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Build the time grid described by this config.
    pub fn grid(&self) -> TimeGrid {
        TimeGrid {
            view_start_hour: self.view_start_hour,
            view_end_hour: self.view_end_hour,
            slots_per_hour: self.slots_per_hour,
        }
    }

    /// Repair values a hand-edited file could break. The grid needs a
    /// non-empty window and at least one slot per hour.
    fn sanitized(mut self) -> Self {
        if self.view_end_hour > 24
            || self.view_start_hour >= self.view_end_hour
            || self.slots_per_hour == 0
        {
            let defaults = Self::default();
            log::warn!(
                "Config window {}..{} x{} is unusable; using default window",
                self.view_start_hour,
                self.view_end_hour,
                self.slots_per_hour
            );
            self.view_start_hour = defaults.view_start_hour;
            self.view_end_hour = defaults.view_end_hour;
            self.slots_per_hour = defaults.slots_per_hour;
        }
        if self.first_day_of_week > 6 {
            self.first_day_of_week = 0;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid() {
        let grid = PlannerConfig::default().grid();
        assert_eq!(grid.total_slots(), 36);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlannerConfig::load_from(&dir.path().join("absent.toml"));
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "slots_per_hour = 4\ntheme = \"dark\"\n").unwrap();
        let config = PlannerConfig::load_from(&path);
        assert_eq!(config.slots_per_hour, 4);
        assert_eq!(config.theme, "dark");
        assert_eq!(config.view_start_hour, 5);
    }

    #[test]
    fn test_unusable_window_is_repaired() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "view_start_hour = 23\nview_end_hour = 5\n").unwrap();
        let config = PlannerConfig::load_from(&path);
        assert_eq!(config.grid(), TimeGrid::default());
    }

    #[test]
    fn test_malformed_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "view_start_hour = \"lots\"").unwrap();
        assert_eq!(PlannerConfig::load_from(&path), PlannerConfig::default());
    }
}
