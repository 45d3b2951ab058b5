//! Histogram of major leaguers' age at surgery

use crate::renderer::fill_background;
use crate::{ChartKind, GraphConfig, GraphRenderer};
use async_trait::async_trait;
use plotters::prelude::*;
use serde::Serialize;
use tommyjohns_common::{Result, TjError};
use tracing::debug;

/// Equal-width bins over `min..=max` of a sample.
///
/// The maximum falls in the last bin. When every value is the same the
/// width is zero and the first bin holds everything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBins {
    min: f64,
    width: f64,
    counts: Vec<u32>,
}

impl HistogramBins {
    /// Bin the finite values of `values` into `bins` buckets.
    ///
    /// Returns `None` for zero bins or when there is nothing to bin.
    pub fn compute(values: &[f64], bins: usize) -> Option<Self> {
        if bins == 0 {
            return None;
        }

        let finite = values.iter().copied().filter(|v| v.is_finite());
        let (min, max) = finite.clone().fold(None, |acc: Option<(f64, f64)>, v| {
            Some(acc.map_or((v, v), |(lo, hi)| (lo.min(v), hi.max(v))))
        })?;

        let width = (max - min) / bins as f64;
        let mut counts = vec![0u32; bins];
        for value in finite {
            let index = if width > 0.0 {
                (((value - min) / width).floor() as usize).min(bins - 1)
            } else {
                0
            };
            counts[index] += 1;
        }

        Some(Self { min, width, counts })
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Bin width used for drawing; a degenerate sample is drawn one unit wide.
    fn draw_width(&self) -> f64 {
        if self.width > 0.0 {
            self.width
        } else {
            1.0
        }
    }

    /// Left and right edge of bin `index` as drawn.
    pub fn edges(&self, index: usize) -> (f64, f64) {
        let w = self.draw_width();
        let left = self.min + w * index as f64;
        (left, left + w)
    }
}

/// Age histogram graph renderer
#[derive(Debug, Clone)]
pub struct AgeHistogramChart {
    ages: Vec<f64>,
    bins: usize,
}

impl AgeHistogramChart {
    pub fn new(ages: Vec<f64>, bins: usize) -> Self {
        Self { ages, bins }
    }

    pub fn bins(&self) -> Option<HistogramBins> {
        HistogramBins::compute(&self.ages, self.bins)
    }
}

#[async_trait]
impl GraphRenderer for AgeHistogramChart {
    fn chart_kind(&self) -> ChartKind {
        ChartKind::AgeHistogram
    }

    fn render_svg(&self, config: &GraphConfig) -> Result<String> {
        let bins = self
            .bins()
            .ok_or_else(|| TjError::graph("No ages to render"))?;

        let bar_color = self.series_color(config, 0, RGBColor(31, 119, 180));
        let (x_min, _) = bins.edges(0);
        let (_, x_max) = bins.edges(bins.len() - 1);
        let y_max = f64::from(bins.counts().iter().copied().max().unwrap_or(0).max(1)) * 1.1;

        let mut svg = String::new();
        {
            let root =
                SVGBackend::with_string(&mut svg, (config.width, config.height)).into_drawing_area();
            fill_background(self, &root, config)?;

            let title_font = &config.style.title_font;
            let axis_font = &config.style.axis_font;
            let mut chart = ChartBuilder::on(&root)
                .caption(&config.title, (title_font.family.as_str(), title_font.size))
                .margin_top(config.style.margins.top)
                .margin_right(config.style.margins.right)
                .x_label_area_size(config.style.margins.bottom)
                .y_label_area_size(config.style.margins.left)
                .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

            chart
                .configure_mesh()
                .label_style((axis_font.family.as_str(), axis_font.size))
                .disable_x_mesh()
                .x_label_formatter(&|x| format!("{x:.1}"))
                .y_label_formatter(&|y| format!("{y:.0}"))
                .x_desc(config.x_label.as_deref().unwrap_or("Age"))
                .y_desc(config.y_label.as_deref().unwrap_or("Surgeries"))
                .draw()?;

            chart.draw_series(bins.counts().iter().enumerate().map(|(i, &count)| {
                let (left, right) = bins.edges(i);
                Rectangle::new([(left, 0.0), (right, f64::from(count))], bar_color.filled())
            }))?;

            root.present()?;
        }

        debug!("Rendered {} ages into {} bins", bins.total(), bins.len());
        Ok(svg)
    }
}
