//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use hr_core::types::{parse_time_of_day, parse_weekday};
use hr_core::{ValidationError, WeekendPolicy};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// Latest clock-in time of day that still counts as on time.
    pub on_time_cutoff: String,

    /// Weekday names treated as the weekend.
    pub weekend_days: Vec<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("on_time_cutoff", &self.on_time_cutoff)
            .field("weekend_days", &self.weekend_days)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("hr.db"),
            on_time_cutoff: "09:00".to_string(),
            weekend_days: vec!["Sat".to_string(), "Sun".to_string()],
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (HR_*)
        figment = figment.merge(Env::prefixed("HR_"));

        figment.extract()
    }

    /// Parsed on-time cutoff.
    pub fn cutoff(&self) -> Result<NaiveTime, ValidationError> {
        parse_time_of_day(&self.on_time_cutoff)
    }

    /// Parsed weekend rule.
    pub fn weekend_policy(&self) -> Result<WeekendPolicy, ValidationError> {
        let days = self
            .weekend_days
            .iter()
            .map(|day| parse_weekday(day))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(WeekendPolicy::new(days))
    }
}

/// Returns the platform-specific config directory for hr.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("hr"))
}

/// Returns the platform-specific data directory for hr.
///
/// On Linux: `~/.local/share/hr`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("hr"))
}
