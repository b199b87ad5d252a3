//! Run configuration
//!
//! Goals and workout shape come from a JSON settings file bundled with the
//! deployment. Credentials come from the environment (see
//! [`crate::intervals::IntervalsConfig`]). Everything is validated here so
//! the load and builder code can assume sane numbers.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{TrainingGoals, WorkoutShapeParams};

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

pub const DEFAULT_CONFIG_PATH: &str = "config.json";
pub const CONFIG_PATH_ENV: &str = "AUTOPLAN_CONFIG";
const DEFAULT_NAME_PREFIX: &str = "Auto-Plan:";
const DEFAULT_START_HOUR: u32 = 7;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Failed to read {path}: {message}")]
  Io { path: String, message: String },

  #[error("Failed to parse configuration: {0}")]
  Parse(String),

  #[error("Invalid value for {field}: {reason}")]
  Invalid { field: &'static str, reason: String },

  #[error("Failed to build HTTP client: {0}")]
  HttpClient(String),
}

/// ---------------------------------------------------------------------------
/// Settings File
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
  pub training_goals: TrainingGoals,
  pub workout_settings: WorkoutSettings,
  #[serde(default)]
  pub operational_settings: OperationalSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSettings {
  #[serde(flatten)]
  pub shape: WorkoutShapeParams,
  #[serde(default = "default_name_prefix")]
  pub name_prefix: String,
  /// Local start time of the planned ride, "HH:MM"
  #[serde(default = "default_start_time", with = "hh_mm")]
  pub start_time: NaiveTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationalSettings {
  /// Upload to the calendar. When false the run is a dry run.
  #[serde(default)]
  pub live_mode: bool,
}

fn default_name_prefix() -> String {
  DEFAULT_NAME_PREFIX.to_string()
}

fn default_start_time() -> NaiveTime {
  NaiveTime::from_hms_opt(DEFAULT_START_HOUR, 0, 0).unwrap_or_default()
}

mod hh_mm {
  use chrono::NaiveTime;
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.format("%H:%M").to_string())
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    NaiveTime::parse_from_str(&raw, "%H:%M")
      .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M:%S"))
      .map_err(|e| serde::de::Error::custom(format!("invalid start_time {:?}: {}", raw, e)))
  }
}

impl AppConfig {
  /// Parse and validate settings from JSON text
  pub fn from_json(json: &str) -> Result<Self, ConfigError> {
    let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
  }

  /// Read, parse and validate the settings file at `path`
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
      path: path.display().to_string(),
      message: e.to_string(),
    })?;
    Self::from_json(&text)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    let goals = &self.training_goals;
    require_finite("training_goals.target_ctl", goals.target_ctl)?;
    if goals.target_ctl < 0.0 {
      return Err(ConfigError::Invalid {
        field: "training_goals.target_ctl",
        reason: format!("must be >= 0, got {}", goals.target_ctl),
      });
    }
    require_finite("training_goals.target_tsb", goals.target_tsb)?;
    require_finite("training_goals.alb_lower_bound", goals.alb_lower_bound)?;

    let shape = &self.workout_settings.shape;
    require_fraction("workout_settings.power_target_pct", shape.power_target_pct)?;
    require_fraction("workout_settings.ramp_start_pct", shape.ramp_start_pct)?;

    Ok(())
  }
}

fn require_finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
  if value.is_finite() {
    Ok(())
  } else {
    Err(ConfigError::Invalid {
      field,
      reason: format!("must be a finite number, got {}", value),
    })
  }
}

/// Fractions of FTP must lie in (0, 1]
fn require_fraction(field: &'static str, value: f64) -> Result<(), ConfigError> {
  require_finite(field, value)?;
  if value > 0.0 && value <= 1.0 {
    Ok(())
  } else {
    Err(ConfigError::Invalid {
      field,
      reason: format!("must be in (0, 1], got {}", value),
    })
  }
}

/// Settings file location: explicit path, then `AUTOPLAN_CONFIG`, then
/// `config.json` in the working directory.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
  explicit
    .or_else(|| env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
    .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
