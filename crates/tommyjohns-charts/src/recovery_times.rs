//! Recovery time series for major leaguers

use crate::renderer::fill_background;
use crate::{ChartKind, GraphConfig, GraphRenderer, RecoveryPoint};
use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;
use tommyjohns_common::{Result, TjError};
use tracing::debug;

/// Days of padding on each side of the date axis
const DATE_PADDING_DAYS: i32 = 30;

/// Recovery time graph renderer
#[derive(Debug, Clone)]
pub struct RecoveryTimesChart {
    points: Vec<RecoveryPoint>,
}

impl RecoveryTimesChart {
    /// Points are expected in date order, as the aggregator yields them.
    pub fn new(points: Vec<RecoveryPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[RecoveryPoint] {
        &self.points
    }

    fn prepare_plot_data(&self) -> Vec<(i32, f64)> {
        self.points
            .iter()
            .map(|p| (p.date.num_days_from_ce(), p.months))
            .collect()
    }

    fn max_months(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.months)
            .fold(1.0, f64::max)
    }
}

fn format_day(day: &i32) -> String {
    NaiveDate::from_num_days_from_ce_opt(*day)
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_default()
}

#[async_trait]
impl GraphRenderer for RecoveryTimesChart {
    fn chart_kind(&self) -> ChartKind {
        ChartKind::RecoveryTimes
    }

    fn render_svg(&self, config: &GraphConfig) -> Result<String> {
        let plot_data = self.prepare_plot_data();
        let (first, last) = match (plot_data.first(), plot_data.last()) {
            (Some(first), Some(last)) => (first.0, last.0),
            _ => return Err(TjError::graph("No recovery times to render")),
        };

        let line_color = self.series_color(config, 0, RGBColor(31, 119, 180));
        let y_max = self.max_months() * 1.1;

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
                .build_cartesian_2d(
                    (first - DATE_PADDING_DAYS)..(last + DATE_PADDING_DAYS),
                    0f64..y_max,
                )?;

            chart
                .configure_mesh()
                .label_style((axis_font.family.as_str(), axis_font.size))
                .x_labels(8)
                .x_label_formatter(&format_day)
                .x_desc(config.x_label.as_deref().unwrap_or("Surgery date"))
                .y_desc(config.y_label.as_deref().unwrap_or("Recovery (months)"))
                .draw()?;

            chart.draw_series(LineSeries::new(plot_data.iter().copied(), &line_color))?;
            chart.draw_series(
                plot_data
                    .iter()
                    .map(|&point| Circle::new(point, 3, line_color.filled())),
            )?;

            root.present()?;
        }

        debug!("Rendered {} recovery points", plot_data.len());
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(y: i32, m: u32, d: u32, months: f64) -> RecoveryPoint {
        RecoveryPoint {
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            months,
        }
    }

    #[test]
    fn test_plot_data_uses_day_numbers() {
        let chart = RecoveryTimesChart::new(vec![point(2012, 1, 1, 12.0), point(2012, 1, 11, 14.0)]);
        let data = chart.prepare_plot_data();
        assert_eq!(data[1].0 - data[0].0, 10);
        assert_eq!(data[1].1, 14.0);
    }

    #[test]
    fn test_format_day_round_trips_month() {
        let day = NaiveDate::from_ymd_opt(2015, 7, 19).unwrap().num_days_from_ce();
        assert_eq!(format_day(&day), "2015-07");
    }

    #[test]
    fn test_render_series() {
        let chart = RecoveryTimesChart::new(vec![
            point(2010, 3, 14, 13.2),
            point(2011, 8, 20, 15.0),
            point(2012, 4, 25, 14.1),
        ]);
        let fragment = chart.render_to_string(&GraphConfig::default()).unwrap();
        assert!(fragment.starts_with(r#"<div class="chart" id="recovery_times">"#));
        assert!(fragment.contains("<svg"));
    }

    #[test]
    fn test_single_point_renders() {
        let chart = RecoveryTimesChart::new(vec![point(2010, 3, 14, 13.2)]);
        assert!(chart.render_svg(&GraphConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_series_is_error() {
        let chart = RecoveryTimesChart::new(Vec::new());
        assert!(matches!(
            chart.render_svg(&GraphConfig::default()),
            Err(TjError::Graph { .. })
        ));
    }
}
