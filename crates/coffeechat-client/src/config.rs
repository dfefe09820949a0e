//! Client configuration.
//!
//! All settings live in a single `config.toml` file at
//! `~/.config/coffeechat/config.toml` by default:
//!
//! ```toml
//! debug = false
//!
//! [schedule]
//! timezone = "America/New_York"
//! no_response_after_days = 3
//! unknown_status = "surface"   # or "fallback"
//!
//! [storage]
//! reached_out_path = "/path/to/reached_out.json"
//! ```

use std::path::{Path, PathBuf};

use coffeechat_core::{
    DEFAULT_NO_RESPONSE_AFTER_DAYS, DEFAULT_TIMEZONE, ResolverOptions, UnknownStatusPolicy,
    parse_timezone,
};
use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Configuration for the coffeechat client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Debug mode.
    pub debug: bool,

    /// Status resolution settings.
    pub schedule: ScheduleSettings,

    /// Local storage settings.
    pub storage: StorageSettings,
}

/// Settings that feed [`ResolverOptions`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    /// IANA name of the reference timezone.
    pub timezone: String,

    /// Days before an untouched match shows as having no responses.
    pub no_response_after_days: i64,

    /// What to do with statuses the client does not know.
    pub unknown_status: UnknownStatusPolicy,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.name().to_string(),
            no_response_after_days: DEFAULT_NO_RESPONSE_AFTER_DAYS,
            unknown_status: UnknownStatusPolicy::default(),
        }
    }
}

/// Local storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Where reached-out flags are kept.
    pub reached_out_path: Option<PathBuf>,
}

impl ClientConfig {
    /// Loads configuration from the default path, or defaults if it does
    /// not exist.
    pub fn load() -> ClientResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ClientResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClientError::Config(format!("failed to read config: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| ClientError::Config(format!("failed to parse config: {}", e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coffeechat")
    }

    /// Returns the default data directory.
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coffeechat")
    }

    /// Returns where reached-out flags are stored.
    pub fn reached_out_path(&self) -> PathBuf {
        self.storage
            .reached_out_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join("reached_out.json"))
    }

    /// Builds resolver options, validating the timezone.
    pub fn to_resolver_options(&self) -> ClientResult<ResolverOptions> {
        let timezone = parse_timezone(&self.schedule.timezone)?;
        if self.schedule.no_response_after_days < 0 {
            return Err(ClientError::Config(format!(
                "no_response_after_days must not be negative (got {})",
                self.schedule.no_response_after_days
            )));
        }
        Ok(ResolverOptions::new(timezone)
            .with_no_response_after_days(self.schedule.no_response_after_days)
            .with_unknown_status(self.schedule.unknown_status))
    }
}
