//! Stacked bar chart of surgeries per year, majors below minors

use crate::renderer::fill_background;
use crate::{ChartKind, GraphConfig, GraphRenderer, YearTable};
use async_trait::async_trait;
use plotters::prelude::*;
use tommyjohns_common::{Result, TjError};
use tracing::debug;

const BAR_HALF_WIDTH: f64 = 0.4;

/// Surgeries-by-year graph renderer
#[derive(Debug, Clone)]
pub struct SurgeriesByYearChart {
    data: YearTable,
}

impl SurgeriesByYearChart {
    pub fn new(data: YearTable) -> Self {
        Self { data }
    }

    pub fn data(&self) -> &YearTable {
        &self.data
    }

    /// Tallest stacked bar, never below one so the axis is non-degenerate
    fn max_total(&self) -> f64 {
        self.data
            .rows()
            .iter()
            .map(|row| row.total())
            .max()
            .unwrap_or(0)
            .max(1) as f64
    }

    fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.data.rows().first()?.year;
        let last = self.data.rows().last()?.year;
        Some((first, last))
    }
}

#[async_trait]
impl GraphRenderer for SurgeriesByYearChart {
    fn chart_kind(&self) -> ChartKind {
        ChartKind::SurgeriesByYear
    }

    fn render_svg(&self, config: &GraphConfig) -> Result<String> {
        let (first, last) = self
            .year_span()
            .ok_or_else(|| TjError::graph("No surgery years to render"))?;

        let majors_color = self.series_color(config, 0, RGBColor(31, 119, 180));
        let minors_color = self.series_color(config, 1, RGBColor(255, 127, 14));
        let y_max = self.max_total() * 1.1;
        let year_count = (last - first + 1) as usize;

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
                    (first as f64 - 1.0)..(last as f64 + 1.0),
                    0f64..y_max,
                )?;

            chart
                .configure_mesh()
                .label_style((axis_font.family.as_str(), axis_font.size))
                .disable_x_mesh()
                .x_labels(year_count.min(20) + 2)
                .x_label_formatter(&|x| {
                    if x.fract() == 0.0 {
                        format!("{x:.0}")
                    } else {
                        String::new()
                    }
                })
                .x_desc(config.x_label.as_deref().unwrap_or("Year"))
                .y_desc(config.y_label.as_deref().unwrap_or("Surgeries"))
                .draw()?;

            let rows = self.data.rows();

            chart
                .draw_series(rows.iter().map(|row| {
                    let x = row.year as f64;
                    Rectangle::new(
                        [(x - BAR_HALF_WIDTH, 0.0), (x + BAR_HALF_WIDTH, row.majors as f64)],
                        majors_color.filled(),
                    )
                }))?
                .label("Majors")
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], majors_color.filled())
                });

            // Minors sit on top of the majors bar for the same year
            chart
                .draw_series(rows.iter().map(|row| {
                    let x = row.year as f64;
                    Rectangle::new(
                        [
                            (x - BAR_HALF_WIDTH, row.majors as f64),
                            (x + BAR_HALF_WIDTH, row.total() as f64),
                        ],
                        minors_color.filled(),
                    )
                }))?
                .label("Minors")
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], minors_color.filled())
                });

            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperLeft)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()?;

            root.present()?;
        }

        debug!("Rendered {} years as stacked bars", self.data.len());
        Ok(svg)
    }
}
