//! Plotters-powered diagram widget for Ratatui.
//!
//! Every panel draws the same shape of picture: a few curves, optional scatter
//! points and one highlighted equilibrium. Plotters output is written into the
//! Ratatui buffer through `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

pub const CYAN: RGBColor = RGBColor(0, 255, 255);
pub const GRAY: RGBColor = RGBColor(128, 128, 128);
pub const GREEN: RGBColor = RGBColor(0, 255, 0);

/// One polyline and its color.
#[derive(Clone, Copy)]
pub struct ChartLine<'a> {
    pub points: &'a [(f64, f64)],
    pub color: RGBColor,
}

/// Render-only chart description; all series and bounds are computed by the caller.
pub struct DiagramChart<'a> {
    pub lines: &'a [ChartLine<'a>],
    /// Plain scatter (white).
    pub points: &'a [(f64, f64)],
    /// Drawn last so it sits on top of everything else.
    pub highlight: &'a [(f64, f64)],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub fmt_x: fn(f64) -> String,
    pub fmt_y: fn(f64) -> String,
}

impl<'a> Widget for DiagramChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Plotters may fail to lay out a chart in a tiny area.
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
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
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

            for line in self.lines {
                chart.draw_series(LineSeries::new(line.points.iter().copied(), &line.color))?;
            }

            chart.draw_series(self.points.iter().map(|&(x, y)| Pixel::new((x, y), WHITE)))?;

            // `Circle` radii are mis-scaled by the ratatui backend; a colored
            // pixel is the reliable marker.
            chart.draw_series(self.highlight.iter().map(|&(x, y)| Pixel::new((x, y), RED)))?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
