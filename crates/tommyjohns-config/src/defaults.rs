//! Default values for every configuration section.

use crate::schema::*;
use tommyjohns_common::LogFormat;

/// Default SQLite database file.
pub const DEFAULT_DATABASE_PATH: &str = "tommyjohns.db";
/// Default surgery dataset location.
pub const DEFAULT_CSV_PATH: &str = "devstuff/TJList.csv";
/// Default chart fragment directory.
pub const DEFAULT_CHARTS_DIR: &str = "charts";
/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";
/// Default number of age histogram bins.
pub const DEFAULT_HISTOGRAM_BINS: usize = 25;
/// Google Sheets v4 REST endpoint.
pub const DEFAULT_SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_DATABASE_PATH.to_string(),
            max_connections: 5,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            csv_path: DEFAULT_CSV_PATH.to_string(),
            charts_dir: DEFAULT_CHARTS_DIR.to_string(),
            columns: CsvColumns::default(),
        }
    }
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            id: "mlbamid".to_string(),
            surgery_date: "TJ Surgery Date".to_string(),
            level: "Majors".to_string(),
            age: "Age".to_string(),
            recovery_months: "Recovery Time (months)".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 500,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            enabled: EnabledChartsConfig::default(),
            colors: ColorsConfig::default(),
        }
    }
}

impl Default for EnabledChartsConfig {
    fn default() -> Self {
        Self {
            surgeries_by_year: true,
            age_histogram: true,
            recovery_times: true,
        }
    }
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            majors: "#1f77b4".to_string(),
            minors: "#ff7f0e".to_string(),
            background: "#ffffff".to_string(),
        }
    }
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            sheet_id: String::new(),
            range: "Sheet1".to_string(),
            base_url: DEFAULT_SHEETS_BASE_URL.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}
