//! Graph rendering trait and shared styling helpers

use crate::{ChartKind, GraphConfig};
use async_trait::async_trait;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;
use tommyjohns_common::{Result, TjError};
use tracing::info;

/// Trait for rendering one chart to an embeddable HTML fragment.
///
/// Implementors draw onto an SVG backend in [`render_svg`](Self::render_svg);
/// the provided methods wrap and persist the result.
#[async_trait]
pub trait GraphRenderer: Send + Sync {
    /// Which chart this renderer draws
    fn chart_kind(&self) -> ChartKind;

    /// Draw the chart and return the raw SVG document
    fn render_svg(&self, config: &GraphConfig) -> Result<String>;

    /// Render the chart as `<div class="chart" id="{name}">…</div>`
    fn render_to_string(&self, config: &GraphConfig) -> Result<String> {
        let svg = self.render_svg(config)?;
        Ok(wrap_fragment(self.chart_kind(), &svg))
    }

    /// Render the fragment and write it to `path`, returning the byte count
    async fn render_to_file(&self, config: &GraphConfig, path: &Path) -> Result<usize> {
        let fragment = self.render_to_string(config)?;
        tokio::fs::write(path, fragment.as_bytes())
            .await
            .map_err(|e| {
                TjError::graph_with_source(format!("failed to write {}", path.display()), e)
            })?;
        info!("Rendered {} to {}", self.chart_kind(), path.display());
        Ok(fragment.len())
    }

    /// Parse every configured series color
    fn get_colors(&self, colors: &[String]) -> Vec<RGBColor> {
        colors.iter().map(|c| self.parse_color(c)).collect()
    }

    /// Parse a `#RRGGBB` string, falling back to black
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        RGBColor(0, 0, 0)
    }

    /// Get background color from style config
    fn get_background_color(&self, config: &GraphConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_ref()
            .map(|color| self.parse_color(color))
            .unwrap_or(RGBColor(255, 255, 255))
    }

    /// The `index`th configured series color, or `fallback`
    fn series_color(&self, config: &GraphConfig, index: usize, fallback: RGBColor) -> RGBColor {
        self.get_colors(&config.style.series_colors)
            .get(index)
            .copied()
            .unwrap_or(fallback)
    }
}

/// Wrap an SVG document in the chart's container element.
pub fn wrap_fragment(kind: ChartKind, svg: &str) -> String {
    format!(r#"<div class="chart" id="{}">{}</div>"#, kind.name(), svg)
}

/// Fill the drawing area with the configured background
pub(crate) fn fill_background<R: GraphRenderer + ?Sized>(
    renderer: &R,
    root: &DrawingArea<SVGBackend<'_>, Shift>,
    config: &GraphConfig,
) -> Result<()> {
    root.fill(&renderer.get_background_color(config))?;
    Ok(())
}
