//! Application settings
//!
//! Layered with the `config` crate: built-in defaults, then
//! `vehicle-check.toml` in the working directory (optional), then an
//! explicit `--config` file, then `VEHICLE_CHECK_*` environment variables
//! (`VEHICLE_CHECK_VALIDATION__REFERENCE_YEAR=2025`).

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use vehicle_validator::ValidationConfig;

/// Settings file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "vehicle-check";

const ENV_PREFIX: &str = "VEHICLE_CHECK";

/// Log line format on stderr
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_level: String,
    pub log_format: LogFormat,
    pub validation: ValidationConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
            validation: ValidationConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load settings; `path` must exist when given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            Config::builder().add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false));
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
