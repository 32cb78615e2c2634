//! Chart data preparation.
//!
//! `prepare` is the core transform: every sample is classified on a mood scale,
//! keeping input order and length. Everything else here shapes the classified
//! series into plot-ready series (filters, rolling mean, per-mood scatter,
//! bounds) without touching the samples.

use chrono::NaiveDate;

use crate::domain::{AnomalySample, DashboardConfig, MoodBand, MoodResult};
use crate::error::AppError;
use crate::math::rolling_mean;
use crate::mood::MoodScale;

/// Classify each sample on the Earth scale.
pub fn prepare(samples: &[AnomalySample]) -> Result<Vec<MoodResult>, AppError> {
    prepare_with(MoodScale::earth(), samples)
}

/// Classify each sample on `scale`, preserving order.
///
/// An empty input yields an empty output. A NaN value fails the whole call.
pub fn prepare_with(scale: MoodScale<'_>, samples: &[AnomalySample]) -> Result<Vec<MoodResult>, AppError> {
    samples
        .iter()
        .map(|sample| {
            let band = scale.classify(sample.value).map_err(|e| {
                AppError::invalid_input(format!("Sample dated {}: {e}", sample.date))
            })?;
            Ok(MoodResult {
                sample: *sample,
                band: *band,
            })
        })
        .collect()
}

/// Keep results whose date falls inside `[from, to]` (either end optional).
pub fn filter_date_range(
    results: &[MoodResult],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<MoodResult> {
    results
        .iter()
        .filter(|r| from.is_none_or(|d| r.sample.date >= d))
        .filter(|r| to.is_none_or(|d| r.sample.date <= d))
        .copied()
        .collect()
}

/// Keep results whose band label is in `labels` (case-insensitive).
///
/// An empty label list keeps everything.
pub fn filter_moods(results: &[MoodResult], labels: &[String]) -> Vec<MoodResult> {
    if labels.is_empty() {
        return results.to_vec();
    }
    results
        .iter()
        .filter(|r| labels.iter().any(|l| r.band.label.eq_ignore_ascii_case(l.trim())))
        .copied()
        .collect()
}

/// Apply the config's date window and mood filter.
pub fn visible(results: &[MoodResult], config: &DashboardConfig) -> Vec<MoodResult> {
    let (from, to) = config.date_window();
    let in_range = filter_date_range(results, from, to);
    filter_moods(&in_range, &config.moods)
}

/// Rolling mean of the anomaly aligned with `results`.
pub fn rolling_values(results: &[MoodResult], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    let values: Vec<f64> = results.iter().map(|r| r.sample.value).collect();
    rolling_mean(&values, window, min_periods)
}

/// Scatter points for one mood.
#[derive(Debug, Clone)]
pub struct BandSeries {
    pub band: MoodBand,
    pub points: Vec<(f64, f64)>,
}

/// Plot-ready series. The x axis is the fractional year.
#[derive(Debug, Clone)]
pub struct ChartData {
    /// Anomaly line over the visible results.
    pub line: Vec<(f64, f64)>,
    /// Rolling mean of the full series, clipped to the visible x range.
    pub rolling: Vec<(f64, f64)>,
    /// One scatter series per scale band (possibly empty), in scale order.
    pub by_band: Vec<BandSeries>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ChartData {
    /// Build chart series.
    ///
    /// The rolling mean is computed over `all` so the first visible points
    /// still average a full window of history.
    pub fn build(
        scale: MoodScale<'_>,
        all: &[MoodResult],
        visible: &[MoodResult],
        window: usize,
        min_periods: usize,
    ) -> Self {
        let line: Vec<(f64, f64)> = visible
            .iter()
            .map(|r| (r.sample.fractional_year(), r.sample.value))
            .collect();

        let by_band = scale
            .bands()
            .iter()
            .map(|band| BandSeries {
                band: *band,
                points: visible
                    .iter()
                    .filter(|r| r.band.label == band.label)
                    .map(|r| (r.sample.fractional_year(), r.sample.value))
                    .collect(),
            })
            .collect();

        let x_bounds = x_bounds(&line, all);

        let rolling = all
            .iter()
            .zip(rolling_values(all, window, min_periods))
            .filter_map(|(r, m)| m.map(|m| (r.sample.fractional_year(), m)))
            .filter(|&(x, _)| x >= x_bounds[0] && x <= x_bounds[1])
            .collect::<Vec<_>>();

        let y_bounds = y_range(&line, &rolling);

        Self {
            line,
            rolling,
            by_band,
            x_bounds,
            y_bounds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }
}

fn x_bounds(line: &[(f64, f64)], all: &[MoodResult]) -> [f64; 2] {
    if line.is_empty() {
        let xs: Vec<(f64, f64)> = all.iter().map(|r| (r.sample.fractional_year(), 0.0)).collect();
        return x_range(&xs);
    }
    x_range(line)
}

/// X extent of a series, widened to one year when degenerate.
pub fn x_range(points: &[(f64, f64)]) -> [f64; 2] {
    let lo = points.iter().map(|&(x, _)| x).fold(f64::INFINITY, f64::min);
    let hi = points.iter().map(|&(x, _)| x).fold(f64::NEG_INFINITY, f64::max);
    if !(lo.is_finite() && hi.is_finite()) {
        return [0.0, 1.0];
    }
    if hi - lo < 1e-9 {
        return [lo - 0.5, hi + 0.5];
    }
    [lo, hi]
}

/// Padded y extent of the line and rolling series, always including y = 0.
pub fn y_range(line: &[(f64, f64)], rolling: &[(f64, f64)]) -> [f64; 2] {
    // The baseline (y = 0) is always drawn, so keep it in range.
    let mut lo = 0.0_f64;
    let mut hi = 0.0_f64;
    for &(_, y) in line.iter().chain(rolling) {
        lo = lo.min(y);
        hi = hi.max(y);
    }
    if hi - lo < 1e-9 {
        lo -= 0.5;
        hi += 0.5;
    }
    let pad = ((hi - lo) * 0.05).max(1e-12);
    [lo - pad, hi + pad]
}
