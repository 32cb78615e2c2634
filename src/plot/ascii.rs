//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - monthly samples: the band glyph (`c`, `s`, `w`, `h` on the Earth scale)
//! - rolling mean: `~` line
//! - zero anomaly baseline: `.` row

use crate::chart::{ChartData, x_range, y_range};
use crate::domain::ChartFile;

const ROLLING: char = '~';
const BASELINE: char = '.';
const UNKNOWN_MOOD: char = 'o';

/// Everything drawn on the grid, already in data coordinates.
struct Layers {
    points: Vec<(f64, f64, char)>,
    rolling: Vec<(f64, f64)>,
    legend: Vec<(char, String)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Render a plot for prepared chart series.
pub fn render_ascii_plot(chart: &ChartData, width: usize, height: usize) -> String {
    let points = chart
        .by_band
        .iter()
        .flat_map(|s| s.points.iter().map(move |&(x, y)| (x, y, s.band.glyph)))
        .collect();
    let legend = chart
        .by_band
        .iter()
        .map(|s| (s.band.glyph, s.band.label.to_string()))
        .collect();

    render_plot(
        &Layers {
            points,
            rolling: chart.rolling.clone(),
            legend,
            x_bounds: chart.x_bounds,
            y_bounds: chart.y_bounds,
        },
        width,
        height,
    )
}

/// Render a plot from a saved chart JSON file.
pub fn render_ascii_plot_from_chart_file(chart: &ChartFile, width: usize, height: usize) -> String {
    let points: Vec<(f64, f64, char)> = chart
        .points
        .iter()
        .map(|p| {
            let glyph = chart
                .bands
                .iter()
                .find(|b| b.label == p.mood)
                .map(|b| b.glyph)
                .unwrap_or(UNKNOWN_MOOD);
            (p.x, p.anomaly, glyph)
        })
        .collect();
    let rolling: Vec<(f64, f64)> = chart.rolling_mean.iter().map(|r| (r.x, r.mean)).collect();

    let line: Vec<(f64, f64)> = points.iter().map(|&(x, y, _)| (x, y)).collect();
    let x_bounds = if line.is_empty() { x_range(&rolling) } else { x_range(&line) };
    let y_bounds = y_range(&line, &rolling);

    render_plot(
        &Layers {
            points,
            rolling,
            legend: chart.bands.iter().map(|b| (b.glyph, b.label.clone())).collect(),
            x_bounds,
            y_bounds,
        },
        width,
        height,
    )
}

fn render_plot(layers: &Layers, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);
    let [x_min, x_max] = layers.x_bounds;
    let [y_min, y_max] = layers.y_bounds;

    let mut grid = vec![vec![' '; width]; height];

    // Baseline first, then the rolling mean, then samples on top.
    if y_min <= 0.0 && 0.0 <= y_max {
        let row = map_y(0.0, y_min, y_max, height);
        grid[row].iter_mut().for_each(|c| *c = BASELINE);
    }

    let mut prev = None;
    for &(x, y) in &layers.rolling {
        let cell = (map_x(x, x_min, x_max, width), map_y(y, y_min, y_max, height));
        match prev {
            Some(p) => draw_line(&mut grid, p, cell, ROLLING),
            None => draw_line(&mut grid, cell, cell, ROLLING),
        }
        prev = Some(cell);
    }

    for &(x, y, glyph) in &layers.points {
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = glyph;
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: year=[{x_min:.2}, {x_max:.2}] | anomaly=[{y_min:.2}, {y_max:.2}]°C\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    let moods: Vec<String> = layers
        .legend
        .iter()
        .map(|(glyph, label)| format!("{glyph}={label}"))
        .collect();
    out.push_str(&format!(
        "Legend: {} | {ROLLING} rolling mean | {BASELINE} baseline\n",
        moods.join(" ")
    ));

    out
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

/// Integer line drawing (Bresenham). Only paints empty or baseline cells.
fn draw_line(grid: &mut [Vec<char>], from: (usize, usize), to: (usize, usize), ch: char) {
    let (mut x0, mut y0) = (from.0 as isize, from.1 as isize);
    let (x1, y1) = (to.0 as isize, to.1 as isize);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if let Some(cell) = usize::try_from(y0)
            .ok()
            .and_then(|r| grid.get_mut(r))
            .and_then(|row| usize::try_from(x0).ok().and_then(|c| row.get_mut(c)))
        {
            if *cell == ' ' || *cell == BASELINE {
                *cell = ch;
            }
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
