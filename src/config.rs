//! Configuration loading and management
//!
//! Handles parsing of `.todo.toml` configuration files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::reminder::DEFAULT_WINDOW_HOURS;
use crate::task::Priority;

pub const CONFIG_FILE: &str = ".todo.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Task defaults
    #[serde(default)]
    pub tasks: TasksConfig,

    /// Reminder configuration
    #[serde(default)]
    pub reminders: ReminderConfig,
}

/// Task-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Priority for new tasks that do not specify one
    #[serde(default)]
    pub default_priority: Priority,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            default_priority: Priority::Medium,
        }
    }
}

/// Reminder-related configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// How far ahead a task counts as upcoming, in hours
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,
}

fn default_window_hours() -> u32 {
    DEFAULT_WINDOW_HOURS
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            window_hours: default_window_hours(),
        }
    }
}

impl Config {
    /// Load configuration from a `.todo.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Self::default();
        }
        match Self::load(&config_path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %config_path.display(), error = %err, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        self.reminders.validate()
    }
}

impl ReminderConfig {
    fn validate(&self) -> Result<()> {
        if self.window_hours == 0 {
            return Err(Error::InvalidConfig(
                "reminders.window_hours must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_are_expected() {
        let cfg = Config::default();
        assert_eq!(cfg.tasks.default_priority, Priority::Medium);
        assert_eq!(cfg.reminders.window_hours, 24);
    }

    #[test]
    fn load_parses_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        let content = r#"
[tasks]
default_priority = "high"

[reminders]
window_hours = 48
"#;
        fs::write(&path, content.trim()).expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg.tasks.default_priority, Priority::High);
        assert_eq!(cfg.reminders.window_hours, 48);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "").expect("write config");

        let cfg = Config::load(&path).expect("load config");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn zero_window_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[reminders]\nwindow_hours = 0").expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        match err {
            Error::InvalidConfig(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_priority_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[tasks]\ndefault_priority = \"urgent\"").expect("write config");

        let err = Config::load(&path).expect_err("invalid config");
        assert!(matches!(err, Error::TomlParse(_)));
    }

    #[test]
    fn load_from_dir_defaults_when_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from_dir(dir.path());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_writes_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out.toml");
        let mut cfg = Config::default();
        cfg.reminders.window_hours = 12;
        cfg.save(&path).expect("save config");

        let written = fs::read_to_string(&path).expect("read config");
        assert!(written.contains("window_hours = 12"));
        assert!(written.contains("default_priority = \"medium\""));
        assert_eq!(Config::load(&path).expect("reload"), cfg);
    }
}
