//! Plotters-powered anomaly chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - per-point colors for the mood scatter
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::chart::BandSeries;

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call (see
/// `chart::ChartData`), so `render()` only draws.
pub struct MoodPlottersChart<'a> {
    /// Monthly anomaly line.
    pub line: &'a [(f64, f64)],
    /// Rolling mean line.
    pub rolling: &'a [(f64, f64)],
    /// One colored scatter series per mood.
    pub bands: &'a [BandSeries],
    /// X bounds (fractional year).
    pub x_bounds: [f64; 2],
    /// Y bounds (°C).
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl Widget for MoodPlottersChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_desc(self.x_label)
                .y_desc(self.y_label)
                .x_labels(5)
                .y_labels(5)
                .x_label_formatter(&|v| (self.fmt_x)(*v))
                .y_label_formatter(&|v| (self.fmt_y)(*v))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            let baseline_color = RGBColor(110, 110, 110);
            let line_color = RGBColor(150, 150, 150);
            let rolling_color = WHITE;

            // 1) Zero anomaly baseline.
            chart.draw_series(LineSeries::new([(x0, 0.0), (x1, 0.0)], &baseline_color))?;

            // 2) Monthly anomaly line, muted so the mood dots stand out.
            chart.draw_series(LineSeries::new(self.line.iter().copied(), &line_color))?;

            // 3) Mood dots. `Pixel` rather than `Circle`: the backend maps
            // circle radii to canvas units and draws huge circles.
            for series in self.bands {
                let [r, g, b] = series.band.color;
                let color = RGBColor(r, g, b);
                chart.draw_series(series.points.iter().map(|&(x, y)| Pixel::new((x, y), color)))?;
            }

            // 4) Rolling mean on top.
            chart.draw_series(LineSeries::new(self.rolling.iter().copied(), &rolling_color))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
