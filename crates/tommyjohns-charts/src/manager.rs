//! Builds every enabled chart from the surgery table into the charts directory

use crate::{
    AgeAggregator, AgeHistogramChart, ChartKind, DataAggregator, GraphConfig,
    GraphRenderer, RecoveryTimeAggregator, RecoveryTimesChart, StyleConfig, SurgeriesByYearChart,
    SurgeryTable, YearAggregator,
};
use std::path::{Path, PathBuf};
use tommyjohns_common::{Result, TjError};
use tommyjohns_config::ChartsConfig;
use tracing::{info, instrument};

/// A chart fragment written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartArtifact {
    pub kind: ChartKind,
    pub path: PathBuf,
    pub bytes: usize,
}

/// Renders the configured charts into one output directory.
#[derive(Debug, Clone)]
pub struct ChartManager {
    config: ChartsConfig,
    output_dir: PathBuf,
}

impl ChartManager {
    pub fn new(config: ChartsConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            config,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn is_enabled(&self, kind: ChartKind) -> bool {
        let enabled = &self.config.enabled;
        match kind {
            ChartKind::SurgeriesByYear => enabled.surgeries_by_year,
            ChartKind::AgeHistogram => enabled.age_histogram,
            ChartKind::RecoveryTimes => enabled.recovery_times,
        }
    }

    /// Graph settings for one chart, derived from the charts section.
    pub fn graph_config(&self, kind: ChartKind) -> GraphConfig {
        let colors = &self.config.colors;
        GraphConfig {
            title: kind.title().to_string(),
            width: self.config.width,
            height: self.config.height,
            x_label: None,
            y_label: None,
            style: StyleConfig {
                series_colors: vec![colors.majors.clone(), colors.minors.clone()],
                background_color: Some(colors.background.clone()),
                ..StyleConfig::default()
            },
        }
    }

    fn renderer_for(&self, kind: ChartKind, table: &SurgeryTable) -> Box<dyn GraphRenderer> {
        match kind {
            ChartKind::SurgeriesByYear => {
                Box::new(SurgeriesByYearChart::new(YearAggregator::new().aggregate(table)))
            }
            ChartKind::AgeHistogram => Box::new(AgeHistogramChart::new(
                AgeAggregator::new().aggregate(table),
                self.config.histogram_bins,
            )),
            ChartKind::RecoveryTimes => Box::new(RecoveryTimesChart::new(
                RecoveryTimeAggregator::new().aggregate(table),
            )),
        }
    }

    /// Aggregate, render, and write every enabled chart.
    ///
    /// Creates the output directory when missing. The first chart that
    /// fails to render aborts the build.
    #[instrument(skip_all, fields(dir = %self.output_dir.display()))]
    pub async fn build_all(&self, table: &SurgeryTable) -> Result<Vec<ChartArtifact>> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| {
                TjError::graph_with_source(
                    format!("failed to create charts directory {}", self.output_dir.display()),
                    e,
                )
            })?;

        let mut artifacts = Vec::new();
        for kind in ChartKind::ALL {
            if !self.is_enabled(kind) {
                info!("Skipping disabled chart {}", kind);
                continue;
            }

            let renderer = self.renderer_for(kind, table);
            let path = kind.artifact_path(&self.output_dir);
            let bytes = renderer
                .render_to_file(&self.graph_config(kind), &path)
                .await?;
            artifacts.push(ChartArtifact { kind, path, bytes });
        }

        info!("Built {} charts", artifacts.len());
        Ok(artifacts)
    }
}
