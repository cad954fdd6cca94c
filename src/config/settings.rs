//! User settings for usercat
//!
//! Stored as JSON in the base directory. Missing fields take their defaults, so
//! an empty object or an absent file both give the default settings.

use serde::{Deserialize, Serialize};

use super::paths::CatalogPaths;
use crate::error::CatalogError;
use crate::storage::{read_json, write_json_atomic};

/// Log output format
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// User settings for usercat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Load the sample users at startup
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,

    /// Tracing filter directive used when `USERCAT_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Audit records per page in `logs list`
    #[serde(default = "default_logs_page_size")]
    pub logs_page_size: usize,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_seed_sample_data() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_logs_page_size() -> usize {
    15
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed_sample_data: default_seed_sample_data(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
            logs_page_size: default_logs_page_size(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or the defaults if the file doesn't exist
    pub fn load_or_create(paths: &CatalogPaths) -> Result<Self, CatalogError> {
        let settings: Settings = read_json(paths.settings_file()).map_err(|e| {
            CatalogError::Config(format!("Failed to load settings: {}", e))
        })?;

        if settings.logs_page_size == 0 {
            return Err(CatalogError::Config(
                "logs_page_size must be at least 1".into(),
            ));
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CatalogPaths) -> Result<(), CatalogError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
