//! Configuration schema definitions using serde with validation attributes.

use serde::{Deserialize, Serialize};
use tommyjohns_common::{LogFormat, LoggingConfig};
use validator::Validate;

/// Main configuration structure for Tommy Johns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// SQLite database settings.
    #[validate]
    pub database: DatabaseConfig,
    /// Surgery dataset input and chart output locations.
    #[validate]
    pub data: DataConfig,
    /// HTTP server settings.
    #[validate]
    pub server: ServerConfig,
    /// Chart rendering settings.
    #[validate]
    pub charts: ChartsConfig,
    /// Google Sheets importer settings.
    pub sheets: SheetsConfig,
    /// Logging settings.
    #[validate]
    pub logging: LogConfig,
}

/// SQLite database configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file.
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub path: String,
    /// Maximum number of pooled connections.
    #[validate(range(min = 1, max = 64, message = "Max connections must be between 1 and 64"))]
    pub max_connections: u32,
}

/// Dataset configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the surgery CSV file.
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub csv_path: String,
    /// Directory the chart fragments are written to.
    #[validate(custom(function = "crate::validation::validate_file_path"))]
    pub charts_dir: String,
    /// CSV column headers.
    #[validate]
    pub columns: CsvColumns,
}

/// Header names of the CSV columns the loader reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CsvColumns {
    /// Player identifier column.
    #[validate(length(min = 1, message = "Column name cannot be empty"))]
    pub id: String,
    /// Surgery date column.
    #[validate(length(min = 1, message = "Column name cannot be empty"))]
    pub surgery_date: String,
    /// League level flag column (`Y`/`N`).
    #[validate(length(min = 1, message = "Column name cannot be empty"))]
    pub level: String,
    /// Age at surgery column.
    #[validate(length(min = 1, message = "Column name cannot be empty"))]
    pub age: String,
    /// Recovery time in months column.
    #[validate(length(min = 1, message = "Column name cannot be empty"))]
    pub recovery_months: String,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. `127.0.0.1:5000`.
    #[validate(custom(function = "crate::validation::validate_bind_address"))]
    pub bind_address: String,
}

/// Chart rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ChartsConfig {
    /// Chart width in pixels.
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,
    /// Chart height in pixels.
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,
    /// Number of bins in the age histogram.
    #[validate(range(min = 1, max = 200, message = "Histogram bins must be between 1 and 200"))]
    pub histogram_bins: usize,
    /// Which charts are built.
    pub enabled: EnabledChartsConfig,
    /// Chart colors.
    #[validate]
    pub colors: ColorsConfig,
}

/// Enabled charts configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnabledChartsConfig {
    /// Stacked bar chart of surgeries per year.
    pub surgeries_by_year: bool,
    /// Histogram of major leaguers' age at surgery.
    pub age_histogram: bool,
    /// Time series of major leaguers' recovery times.
    pub recovery_times: bool,
}

/// Color configuration, all `#RRGGBB`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ColorsConfig {
    /// Major league bars and series.
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Majors color must be a valid hex color"))]
    pub majors: String,
    /// Minor league bars.
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Minors color must be a valid hex color"))]
    pub minors: String,
    /// Chart background.
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be a valid hex color"))]
    pub background: String,
}

/// Google Sheets importer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsConfig {
    /// API key used for the Sheets v4 REST API.
    pub api_key: String,
    /// Spreadsheet identifier.
    pub sheet_id: String,
    /// A1 range fetched by the importer.
    pub range: String,
    /// Base URL of the Sheets API.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `tommyjohns_charts=debug`.
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Optional log file path.
    pub file: Option<String>,
}

impl From<&LogConfig> for LoggingConfig {
    fn from(config: &LogConfig) -> Self {
        Self {
            level: config.level.clone(),
            format: config.format,
            file_path: config.file.clone(),
            ..Self::default()
        }
    }
}

impl Config {
    /// Validate every section, including the cross-field checks the
    /// derive cannot express.
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()?;

        let mut errors = validator::ValidationErrors::new();
        if !(self.charts.enabled.surgeries_by_year
            || self.charts.enabled.age_histogram
            || self.charts.enabled.recovery_times)
        {
            errors.add(
                "charts",
                validator::ValidationError::new("no_charts_enabled"),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl SheetsConfig {
    /// Whether both the API key and the sheet id are set.
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.sheet_id.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate_all().is_ok());
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        let mut config = Config::default();
        config.charts.width = 50;
        assert!(config.validate_all().is_err());

        let mut config = Config::default();
        config.charts.height = 5000;
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_invalid_color_rejected() {
        let mut config = Config::default();
        config.charts.colors.majors = "blue".to_string();
        let errors = config.validate_all().unwrap_err();
        assert!(errors.errors().contains_key("charts"));
    }

    #[test]
    fn test_invalid_bind_address_rejected() {
        let mut config = Config::default();
        config.server.bind_address = "localhost".to_string();
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_all_charts_disabled_rejected() {
        let mut config = Config::default();
        config.charts.enabled.surgeries_by_year = false;
        config.charts.enabled.age_histogram = false;
        config.charts.enabled.recovery_times = false;
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_empty_column_name_rejected() {
        let mut config = Config::default();
        config.data.columns.age = String::new();
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_sheets_credentials() {
        let mut sheets = SheetsConfig::default();
        assert!(!sheets.has_credentials());

        sheets.api_key = "key".to_string();
        sheets.sheet_id = "1AbC".to_string();
        assert!(sheets.has_credentials());
    }

    #[test]
    fn test_log_config_conversion() {
        let log = LogConfig {
            level: "debug".to_string(),
            format: LogFormat::Json,
            file: Some("tj.log".to_string()),
        };
        let logging = LoggingConfig::from(&log);
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);
        assert_eq!(logging.file_path.as_deref(), Some("tj.log"));
    }
}
