//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! A plot is a list of series, each drawn either as a connected line or as
//! isolated markers. Lines are drawn first so markers always sit on top.

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Line,
    Points,
}

/// One data series with its glyph.
#[derive(Debug, Clone, Copy)]
pub struct Series<'a> {
    pub points: &'a [(f64, f64)],
    pub glyph: char,
    pub mark: Mark,
}

impl<'a> Series<'a> {
    pub fn line(points: &'a [(f64, f64)], glyph: char) -> Self {
        Self { points, glyph, mark: Mark::Line }
    }

    pub fn points(points: &'a [(f64, f64)], glyph: char) -> Self {
        Self { points, glyph, mark: Mark::Points }
    }
}

/// Grid size, axis labels and optional fixed bounds.
///
/// Without explicit bounds the x-range is the data range and the y-range is
/// the data range padded by 5%.
#[derive(Debug, Clone)]
pub struct PlotSpec {
    pub width: usize,
    pub height: usize,
    pub x_label: String,
    pub y_label: String,
    pub x_bounds: Option<[f64; 2]>,
    pub y_bounds: Option<[f64; 2]>,
}

impl PlotSpec {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            x_bounds: None,
            y_bounds: None,
        }
    }

    pub fn labels(mut self, x: &str, y: &str) -> Self {
        self.x_label = x.to_string();
        self.y_label = y.to_string();
        self
    }

    pub fn bounds(mut self, x: [f64; 2], y: [f64; 2]) -> Self {
        self.x_bounds = Some(x);
        self.y_bounds = Some(y);
        self
    }
}

/// Render the series into a text block (header line + grid rows).
pub fn render_ascii_plot(series: &[Series<'_>], spec: &PlotSpec) -> String {
    let width = spec.width.max(10);
    let height = spec.height.max(5);

    let (x_min, x_max) = spec
        .x_bounds
        .map(|[a, b]| (a, b))
        .filter(|&(a, b)| valid_range(a, b))
        .or_else(|| data_range(series, |p| p.0))
        .unwrap_or((0.0, 1.0));
    let (y_min, y_max) = spec
        .y_bounds
        .map(|[a, b]| (a, b))
        .filter(|&(a, b)| valid_range(a, b))
        .or_else(|| data_range(series, |p| p.1).map(|(a, b)| pad_range(a, b, 0.05)))
        .unwrap_or((0.0, 1.0));

    let frame = Frame { x_min, x_max, y_min, y_max, width, height };
    let mut grid = vec![vec![' '; width]; height];

    for s in series.iter().filter(|s| s.mark == Mark::Line) {
        draw_polyline(&mut grid, s.points, &frame, s.glyph);
    }
    for s in series.iter().filter(|s| s.mark == Mark::Points) {
        for &(x, y) in s.points {
            if let Some((col, row)) = frame.cell(x, y) {
                grid[row][col] = s.glyph;
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {}=[{x_min:.3}, {x_max:.3}] | {}=[{y_min:.3}, {y_max:.3}]\n",
        spec.x_label, spec.y_label
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
    width: usize,
    height: usize,
}

impl Frame {
    /// Grid cell for a data point, `None` when outside the frame or non-finite.
    fn cell(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let eps_x = (self.x_max - self.x_min) * 1e-9;
        let eps_y = (self.y_max - self.y_min) * 1e-9;
        let inside = x.is_finite()
            && y.is_finite()
            && x >= self.x_min - eps_x
            && x <= self.x_max + eps_x
            && y >= self.y_min - eps_y
            && y <= self.y_max + eps_y;
        inside.then(|| {
            (
                map_x(x, self.x_min, self.x_max, self.width),
                map_y(y, self.y_min, self.y_max, self.height),
            )
        })
    }
}

fn valid_range(min: f64, max: f64) -> bool {
    min.is_finite() && max.is_finite() && max > min
}

fn data_range(series: &[Series<'_>], pick: impl Fn(&(f64, f64)) -> f64) -> Option<(f64, f64)> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for s in series {
        for p in s.points.iter().filter(|p| p.0.is_finite() && p.1.is_finite()) {
            let v = pick(p);
            min = min.min(v);
            max = max.max(v);
        }
    }
    if !(min.is_finite() && max.is_finite()) {
        return None;
    }
    if max > min {
        Some((min, max))
    } else {
        // Flat data: open a unit window around the single value.
        Some((min - 0.5, max + 0.5))
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Connect consecutive in-frame points; a point outside the frame breaks the line.
fn draw_polyline(grid: &mut [Vec<char>], points: &[(f64, f64)], frame: &Frame, ch: char) {
    let mut prev: Option<(usize, usize)> = None;
    for &(x, y) in points {
        match frame.cell(x, y) {
            Some((col, row)) => {
                match prev {
                    Some((c0, r0)) => draw_line(grid, c0, r0, col, row, ch),
                    None => {
                        if grid[row][col] == ' ' {
                            grid[row][col] = ch;
                        }
                    }
                }
                prev = Some((col, row));
            }
            None => prev = None,
        }
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
