//! Chart types and styling structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The charts built at startup, one artifact file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartKind {
    SurgeriesByYear,
    AgeHistogram,
    RecoveryTimes,
}

impl ChartKind {
    /// Every chart, in build order.
    pub const ALL: [ChartKind; 3] = [
        ChartKind::SurgeriesByYear,
        ChartKind::AgeHistogram,
        ChartKind::RecoveryTimes,
    ];

    /// Stable name used for the artifact file and the fragment's element id.
    pub const fn name(self) -> &'static str {
        match self {
            Self::SurgeriesByYear => "surgeries_by_year",
            Self::AgeHistogram => "age_histogram",
            Self::RecoveryTimes => "recovery_times",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::SurgeriesByYear => "Tommy John Surgeries by Year",
            Self::AgeHistogram => "Age at Surgery (Major Leaguers)",
            Self::RecoveryTimes => "Recovery Time (Major Leaguers)",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.html", self.name())
    }

    /// Fixed location of this chart's fragment inside `charts_dir`.
    pub fn artifact_path(self, charts_dir: &Path) -> PathBuf {
        charts_dir.join(self.file_name())
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Graph configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub style: StyleConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            title: "Graph".to_string(),
            width: 800,
            height: 600,
            x_label: None,
            y_label: None,
            style: StyleConfig::default(),
        }
    }
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 12,
        }
    }
}

/// Margin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 20,
            bottom: 40,
            left: 60,
        }
    }
}

/// Styling shared by every chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// `#RRGGBB` colors, one per data series in drawing order
    pub series_colors: Vec<String>,
    pub background_color: Option<String>,
    pub title_font: FontConfig,
    pub axis_font: FontConfig,
    pub margins: MarginConfig,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            series_colors: vec!["#1f77b4".to_string(), "#ff7f0e".to_string()],
            background_color: Some("#FFFFFF".to_string()),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 20,
            },
            axis_font: FontConfig::default(),
            margins: MarginConfig::default(),
        }
    }
}
