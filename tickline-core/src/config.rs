use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::{ConfigError, TicklineError};

pub const DEFAULT_PREFIX: &str = "TICKLINE_";
pub const DEFAULT_PERIOD_MS: u64 = 1000;
pub const DEFAULT_ELEMENT: &str = "time";
pub const DEFAULT_ZONE: &str = "local";

/// How out-of-range calendar fields are treated when building an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarPolicy {
    /// Overflowing fields carry into the next larger unit.
    #[default]
    Rollover,
    /// Any field outside its natural range is rejected.
    Strict,
}

impl FromStr for CalendarPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "rollover" | "lenient" => Ok(CalendarPolicy::Rollover),
            "strict" | "reject" => Ok(CalendarPolicy::Strict),
            other => Err(format!("unknown calendar policy {other:?}")),
        }
    }
}

/// Settings for the reporter and the periodic clock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockConfig {
    pub period_ms: u64,
    pub element: String,
    /// Raw zone name: `local`, `utc` or a `+HH:MM` offset.
    pub zone: String,
    pub calendar_policy: CalendarPolicy,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            period_ms: DEFAULT_PERIOD_MS,
            element: DEFAULT_ELEMENT.to_string(),
            zone: DEFAULT_ZONE.to_string(),
            calendar_policy: CalendarPolicy::default(),
        }
    }
}

impl ClockConfig {
    /// Loads configuration from the process environment (and `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_prefix(DEFAULT_PREFIX)
    }

    /// Loads configuration from env vars prefixed with the provided value.
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(prefix, |key| match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(env::VarError::NotPresent) => Ok(None),
            Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode {
                key: key.to_string(),
            }),
        })
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let key = |suffix: &str| format!("{}{}", prefix, suffix);
        let mut config = Self::default();

        let period_key = key("PERIOD_MS");
        if let Some(raw) = lookup(&period_key)? {
            config.period_ms = match raw.trim().parse::<u64>() {
                Ok(0) | Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: period_key,
                        value: raw,
                        reason: "expected a positive number of milliseconds".into(),
                    })
                }
                Ok(ms) => ms,
            };
        }

        let element_key = key("ELEMENT");
        if let Some(raw) = lookup(&element_key)? {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: element_key,
                    value: raw,
                    reason: "element name must not be empty".into(),
                });
            }
            config.element = trimmed.to_string();
        }

        if let Some(raw) = lookup(&key("ZONE"))? {
            config.zone = raw.trim().to_string();
        }

        let policy_key = key("CALENDAR_POLICY");
        if let Some(raw) = lookup(&policy_key)? {
            config.calendar_policy = raw.parse().map_err(|reason| ConfigError::InvalidValue {
                key: policy_key,
                value: raw.clone(),
                reason,
            })?;
        }

        Ok(config)
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

/// Helper that loads config and converts to the canonical error type.
pub fn load_clock_config() -> Result<ClockConfig, TicklineError> {
    Ok(ClockConfig::from_env()?)
}
