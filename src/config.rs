use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::narrative::NarrativeConfig;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub stats: StatsConfig,
    #[serde(default)]
    pub narrative: NarrativeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// CSV file holding the match history
    pub path: PathBuf,
    /// Keep only matches from the last N calendar years relative to the
    /// newest match; `None` keeps everything
    #[serde(default = "default_years_back")]
    pub years_back: Option<u32>,
    /// Strip organizational club prefixes ("as ", "ssc ", "fc ") when
    /// normalizing team names
    #[serde(default = "default_strip_prefixes")]
    pub strip_prefixes: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/matches.csv"),
            years_back: default_years_back(),
            strip_prefixes: default_strip_prefixes(),
        }
    }
}

fn default_years_back() -> Option<u32> {
    Some(10)
}

fn default_strip_prefixes() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    /// Matches in the recent-form window
    #[serde(default = "default_form_window")]
    pub form_window: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            form_window: default_form_window(),
        }
    }
}

fn default_form_window() -> usize {
    crate::stats::engine::DEFAULT_FORM_WINDOW
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info,scoutline=debug".to_string()
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("SCOUTLINE_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (SCOUTLINE_DATASET__PATH, etc.)
            .add_source(
                Environment::with_prefix("SCOUTLINE")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}
