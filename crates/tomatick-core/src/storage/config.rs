//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Durations for newly added steps
//! - An optional custom seed sequence
//! - Terminal UI toggles
//!
//! Configuration is stored at `~/.config/tomatick/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::error::{ConfigError, ValidationError};
use crate::timer::{default_seed, DefaultDurations, StepList, StepTemplate, TimerEngine};

/// Durations (seconds) used when the user adds a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationsConfig {
    #[serde(default = "default_work")]
    pub work: u64,
    #[serde(default = "default_short_break")]
    pub short_break: u64,
    #[serde(default = "default_long_break")]
    pub long_break: u64,
    /// Seconds added or removed by one press of `+`/`-`.
    #[serde(default = "default_adjust_step")]
    pub adjust_step: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_help: bool,
    /// Mirror the countdown into the terminal window title.
    #[serde(default = "default_true")]
    pub mirror_title: bool,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/tomatick/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub durations: DurationsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Custom seed override. The built-in eight-step sequence when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<Vec<StepTemplate>>,
}

fn default_work() -> u64 {
    15
}
fn default_short_break() -> u64 {
    3
}
fn default_long_break() -> u64 {
    6
}
fn default_adjust_step() -> u64 {
    1
}
fn default_true() -> bool {
    true
}

impl Default for DurationsConfig {
    fn default() -> Self {
        Self {
            work: default_work(),
            short_break: default_short_break(),
            long_break: default_long_break(),
            adjust_step: default_adjust_step(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_help: true,
            mirror_title: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            durations: DurationsConfig::default(),
            ui: UiConfig::default(),
            seed: None,
        }
    }
}

impl From<&DurationsConfig> for DefaultDurations {
    fn from(cfg: &DurationsConfig) -> Self {
        Self {
            work: cfg.work,
            short_break: cfg.short_break,
            long_break: cfg.long_break,
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let new_value = match obj.get(part) {
                    Some(serde_json::Value::Bool(_)) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    Some(serde_json::Value::Number(_)) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    Some(serde_json::Value::String(_)) => serde_json::Value::String(value.into()),
                    // Structured or unset optional values (e.g. `seed`) take JSON.
                    Some(_) => serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?,
                    None if key == "seed" => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    None => return Err(unknown()),
                };
                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let mut json = serde_json::to_value(&*self).map_err(|e| invalid(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| invalid(e.to_string()))?;
        if updated.durations.work == 0
            || updated.durations.short_break == 0
            || updated.durations.long_break == 0
        {
            return Err(invalid("durations must be at least one second".into()));
        }
        updated.seed_steps().map_err(|e| invalid(e.to_string()))?;
        *self = updated;
        Ok(())
    }

    pub fn default_durations(&self) -> DefaultDurations {
        DefaultDurations::from(&self.durations)
    }

    /// The sequence a session starts from and `restart` returns to.
    pub fn seed_steps(&self) -> Result<StepList, ValidationError> {
        match &self.seed {
            Some(custom) => StepList::from_templates(custom),
            None => StepList::from_templates(&default_seed()),
        }
    }

    /// A fresh engine over the configured seed and default durations.
    pub fn engine(&self) -> crate::error::Result<TimerEngine> {
        let engine = TimerEngine::new(self.seed_steps()?).with_durations(self.default_durations());
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::timer::StepKind;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert!(!toml_str.contains("seed"));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[durations]\nwork = 1500\n").unwrap();
        assert_eq!(parsed.durations.work, 1500);
        assert_eq!(parsed.durations.short_break, 3);
        assert!(parsed.ui.show_help);
    }

    #[test]
    fn custom_seed_from_toml() {
        let parsed: Config = toml::from_str(
            r#"
            [[seed]]
            kind = "work"
            duration_secs = 1500

            [[seed]]
            kind = "Stretch"
            duration_secs = 120
            "#,
        )
        .unwrap();
        let list = parsed.seed_steps().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.steps()[0].kind, StepKind::Work);
        assert_eq!(list.steps()[1].kind, StepKind::Custom("Stretch".into()));
    }

    #[test]
    fn get_and_set_by_dotted_key() {
        let mut cfg = Config::default();
        assert_eq!(cfg.get("durations.work").as_deref(), Some("15"));
        cfg.set("durations.work", "25").unwrap();
        assert_eq!(cfg.durations.work, 25);
        cfg.set("ui.show_help", "false").unwrap();
        assert!(!cfg.ui.show_help);
    }

    #[test]
    fn set_rejects_bad_input() {
        let mut cfg = Config::default();
        assert!(matches!(cfg.set("durations.nope", "1"), Err(ConfigError::UnknownKey(_))));
        assert!(matches!(
            cfg.set("durations.work", "abc"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            cfg.set("durations.work", "0"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(cfg.set("seed", "[]"), Err(ConfigError::InvalidValue { .. })));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_seed_from_json() {
        let mut cfg = Config::default();
        cfg.set("seed", r#"[{"kind":"long break","duration_secs":60}]"#)
            .unwrap();
        let list = cfg.seed_steps().unwrap();
        assert_eq!(list.front().map(|s| s.kind.clone()), Some(StepKind::LongBreak));
    }

    #[test]
    fn load_writes_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let mut edited = cfg.clone();
        edited.durations.long_break = 900;
        edited.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().durations.long_break, 900);
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "durations = 3").unwrap();
        assert!(matches!(Config::load_from(&path), Err(ConfigError::LoadFailed { .. })));
    }

    #[test]
    fn engine_reports_invalid_seed() {
        let mut cfg = Config::default();
        cfg.durations.work = 40;
        let engine = cfg.engine().unwrap();
        assert_eq!(engine.remaining_secs(), 15);
        assert_eq!(engine.step_list().len(), 8);

        cfg.seed = Some(Vec::new());
        assert!(matches!(
            cfg.engine(),
            Err(CoreError::Validation(ValidationError::EmptyCollection(_)))
        ));
    }

    #[test]
    fn unreadable_file_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let original = b"[durations]\nwork = 1500\n# caf\xe9\n".to_vec();
        std::fs::write(&path, &original).unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::LoadFailed { .. })));
        assert_eq!(std::fs::read(&path).unwrap(), original);
    }
}
