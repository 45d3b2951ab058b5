//! Configuration loading utilities

use crate::Config;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the settings file.
pub const SETTINGS_FILE_ENV: &str = "TOMMYJOHNS_SETTINGS_FILE";

/// Settings file picked up from the working directory when nothing else is named.
pub const DEFAULT_SETTINGS_FILE: &str = "tommyjohns.toml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file '{path}': {source}")]
    IoError {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name
        var: String,
        /// Parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),
}

impl From<ConfigError> for tommyjohns_common::TjError {
    fn from(err: ConfigError) -> Self {
        tommyjohns_common::TjError::config_with_source("Failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse TOML text without overrides or validation
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Resolve the settings file and load it.
    ///
    /// Resolution order: the explicit path, then `TOMMYJOHNS_SETTINGS_FILE`,
    /// then `tommyjohns.toml` in the working directory, then built-in
    /// defaults. A file that is named but missing is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_config(path);
        }

        if let Ok(path) = env::var(SETTINGS_FILE_ENV) {
            debug!("Using settings file from {}", SETTINGS_FILE_ENV);
            return Self::load_config(path);
        }

        if Path::new(DEFAULT_SETTINGS_FILE).exists() {
            return Self::load_config(DEFAULT_SETTINGS_FILE);
        }

        info!("No settings file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Apply process environment overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides from any variable lookup.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("TOMMYJOHNS_DATABASE") {
            config.database.path = path;
        }

        if let Some(path) = lookup("TOMMYJOHNS_CSV_PATH") {
            config.data.csv_path = path;
        }

        if let Some(dir) = lookup("TOMMYJOHNS_CHARTS_DIR") {
            config.data.charts_dir = dir;
        }

        if let Some(address) = lookup("TOMMYJOHNS_BIND_ADDRESS") {
            config.server.bind_address = address;
        }

        if let Some(bins) = lookup("TOMMYJOHNS_HISTOGRAM_BINS") {
            config.charts.histogram_bins =
                bins.parse().map_err(|e| ConfigError::EnvParseError {
                    var: "TOMMYJOHNS_HISTOGRAM_BINS".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Some(key) = lookup("TOMMYJOHNS_SHEETS_API_KEY") {
            config.sheets.api_key = key;
        }

        if let Some(id) = lookup("TOMMYJOHNS_SHEET_ID") {
            config.sheets.sheet_id = id;
        }

        if let Some(level) = lookup("TOMMYJOHNS_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            [database]
            path = "/var/lib/tj/tj.db"

            [charts]
            histogram_bins = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.database.path, "/var/lib/tj/tj.db");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.charts.histogram_bins, 30);
        assert_eq!(config.charts.width, 900);
        assert_eq!(config.data.columns.id, "mlbamid");
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let result = ConfigLoader::parse("[database\npath = 1");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("TOMMYJOHNS_DATABASE", "override.db"),
            ("TOMMYJOHNS_CSV_PATH", "data/tj.csv"),
            ("TOMMYJOHNS_BIND_ADDRESS", "0.0.0.0:8080"),
            ("TOMMYJOHNS_HISTOGRAM_BINS", "40"),
            ("TOMMYJOHNS_SHEET_ID", "1AbC"),
        ]);

        ConfigLoader::apply_overrides(&mut config, lookup).unwrap();

        assert_eq!(config.database.path, "override.db");
        assert_eq!(config.data.csv_path, "data/tj.csv");
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.charts.histogram_bins, 40);
        assert_eq!(config.sheets.sheet_id, "1AbC");
        assert_eq!(config.data.charts_dir, "charts");
    }

    #[test]
    fn test_override_parse_error() {
        let mut config = Config::default();
        let lookup = lookup_from(&[("TOMMYJOHNS_HISTOGRAM_BINS", "many")]);

        let err = ConfigLoader::apply_overrides(&mut config, lookup).unwrap_err();
        assert!(err.to_string().contains("TOMMYJOHNS_HISTOGRAM_BINS"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = ConfigLoader::load(Some(Path::new("/nonexistent/tommyjohns.toml")));
        assert!(matches!(result, Err(ConfigError::IoError { .. })));
    }
}
