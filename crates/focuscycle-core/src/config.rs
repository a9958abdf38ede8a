//! TOML-based session configuration.
//!
//! Everything the engine needs is carried on one immutable [`SessionConfig`]
//! value passed into the controller and scheduler at construction:
//! - Work/break durations and the live-update cadence
//! - Progress bar shape (column budget and glyph scale)
//! - The reflection question sets written into the session log
//!
//! Configuration is stored at `~/.config/focuscycle/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration as StdDuration;

use crate::error::{ConfigError, Result};

/// Timing configuration, all values in the units their names say.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimingConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u64,
    /// Cadence of live progress updates during a phase.
    #[serde(default = "default_update_interval_secs")]
    pub update_interval_secs: u64,
}

/// Progress bar shape.
///
/// `width` is a column budget: the bar gets `width / 25` columns. `glyphs`
/// is the fill scale from empty to full; its length is the quantization
/// level count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BarConfig {
    #[serde(default = "default_bar_width")]
    pub width: u32,
    #[serde(default = "default_bar_glyphs")]
    pub glyphs: Vec<String>,
}

impl BarConfig {
    /// Number of columns in the rendered bar.
    pub fn columns(&self) -> usize {
        (self.width / 25) as usize
    }
}

/// Reflection question sets written into the session log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionsConfig {
    /// Asked once at setup; answers go into the initial log entry.
    #[serde(default = "default_initial_questions")]
    pub initial: Vec<String>,
    /// Written under each "plan" marker for the upcoming cycle.
    #[serde(default = "default_cycle_start_questions")]
    pub cycle_start: Vec<String>,
    /// Written under each "debrief" marker for the finished cycle.
    #[serde(default = "default_cycle_end_questions")]
    pub cycle_end: Vec<String>,
}

/// Session configuration.
///
/// Serialized to/from TOML at `~/.config/focuscycle/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub bar: BarConfig,
    #[serde(default)]
    pub questions: QuestionsConfig,
}

// Default functions
fn default_work_minutes() -> u64 {
    30
}
fn default_break_minutes() -> u64 {
    10
}
fn default_update_interval_secs() -> u64 {
    10
}
fn default_bar_width() -> u32 {
    320
}
fn default_bar_glyphs() -> Vec<String> {
    ["\u{1F311}", "\u{1F312}", "\u{1F313}", "\u{1F314}", "\u{1F315}"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_initial_questions() -> Vec<String> {
    [
        "What am I trying to accomplish?",
        "Why is this important and valuable?",
        "How will I know this is complete?",
        "Potential distractions? How am I going to deal with them?",
        "Is this concrete/measurable or subjective/ambiguous?",
        "Anything else noteworthy?",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_cycle_start_questions() -> Vec<String> {
    [
        "What am I trying to accomplish this cycle?",
        "How will I get started?",
        "Any hazards? How will I counter them?",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
fn default_cycle_end_questions() -> Vec<String> {
    [
        "Any distractions?",
        "Anything noteworthy?",
        "Things to improve next cycle?",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
            update_interval_secs: default_update_interval_secs(),
        }
    }
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: default_bar_width(),
            glyphs: default_bar_glyphs(),
        }
    }
}

impl Default for QuestionsConfig {
    fn default() -> Self {
        Self {
            initial: default_initial_questions(),
            cycle_start: default_cycle_start_questions(),
            cycle_end: default_cycle_end_questions(),
        }
    }
}

impl SessionConfig {
    /// Work phase duration.
    pub fn work_duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.timing.work_minutes as i64)
    }

    /// Break phase duration.
    pub fn break_duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.timing.break_minutes as i64)
    }

    /// One full cycle: work followed by break.
    pub fn cycle_duration(&self) -> chrono::Duration {
        self.work_duration() + self.break_duration()
    }

    /// Cadence of live progress updates.
    pub fn update_interval(&self) -> StdDuration {
        StdDuration::from_secs(self.timing.update_interval_secs)
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timing.work_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timing.work_minutes".into(),
                message: "must be positive".into(),
            });
        }
        if self.timing.break_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timing.break_minutes".into(),
                message: "must be positive".into(),
            });
        }
        if self.timing.update_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timing.update_interval_secs".into(),
                message: "must be positive".into(),
            });
        }
        if self.bar.columns() == 0 {
            return Err(ConfigError::InvalidValue {
                key: "bar.width".into(),
                message: "must be at least 25".into(),
            });
        }
        if self.bar.glyphs.len() < 2 {
            return Err(ConfigError::InvalidValue {
                key: "bar.glyphs".into(),
                message: "needs at least an empty and a full glyph".into(),
            });
        }
        Ok(())
    }

    /// Location of the config file on this platform.
    pub fn path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("focuscycle").join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// fails validation, or if the default config cannot be written.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: SessionConfig =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path: path.clone(),
                        message: e.to_string(),
                    })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::SaveFailed {
                path: path.clone(),
                message: e.to_string(),
            })?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.clone(),
            message: e.to_string(),
        })?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}
