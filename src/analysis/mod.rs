//! Dashboard analytics over classified anomaly series.
//!
//! Headline metrics are computed on the full series; distribution views
//! (mood frequency, histogram) are computed on whatever the caller passes,
//! usually the filtered, visible series.

use chrono::NaiveDate;

use crate::domain::{DashboardConfig, MoodBand, MoodResult};
use crate::math::{Histogram, fit_line, histogram, mean, pearson};
use crate::mood::MoodScale;

/// Sign of the recent trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Warming,
    Cooling,
}

impl TrendDirection {
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            TrendDirection::Warming
        } else {
            TrendDirection::Cooling
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrendDirection::Warming => "Warming",
            TrendDirection::Cooling => "Cooling",
        }
    }
}

/// Linear projection of the anomaly for a calendar year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub year: i32,
    pub anomaly: f64,
}

/// Mean anomalies of two years side by side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearComparison {
    pub year_a: i32,
    pub mean_a: f64,
    pub year_b: i32,
    pub mean_b: f64,
    /// `mean_b - mean_a`.
    pub delta: f64,
}

/// How often a mood occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodCount {
    pub band: MoodBand,
    pub count: usize,
    /// Fraction of all counted results (0..=1).
    pub share: f64,
}

/// Headline metrics shown at the top of every report.
#[derive(Debug, Clone)]
pub struct ClimateSummary {
    pub n_samples: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub latest: Option<MoodResult>,
    pub trend_years: usize,
    /// °C per year over the trailing `trend_years`.
    pub trend_per_year: f64,
    pub trend_direction: TrendDirection,
    /// Pearson correlation between calendar year and anomaly.
    pub correlation: Option<f64>,
    pub projections: Vec<Projection>,
}

/// Compute the headline metrics over the full series.
pub fn summarize(results: &[MoodResult], config: &DashboardConfig) -> ClimateSummary {
    let trend_per_year = trend_per_year(results, config.trend_years);
    ClimateSummary {
        n_samples: results.len(),
        first_date: results.first().map(|r| r.sample.date),
        last_date: results.last().map(|r| r.sample.date),
        latest: results.last().copied(),
        trend_years: config.trend_years,
        trend_per_year,
        trend_direction: TrendDirection::from_slope(trend_per_year),
        correlation: year_correlation(results),
        projections: project(results, &config.projection_years),
    }
}

/// Slope of the trailing `years * 12` monthly samples, in °C per year.
///
/// Returns `0.0` when fewer than two samples are available.
pub fn trend_per_year(results: &[MoodResult], years: usize) -> f64 {
    let take = years.saturating_mul(12).min(results.len());
    let recent = &results[results.len() - take..];
    if recent.len() < 2 {
        return 0.0;
    }

    let xs: Vec<f64> = (0..recent.len()).map(|i| i as f64).collect();
    let ys: Vec<f64> = recent.iter().map(|r| r.sample.value).collect();
    fit_line(&xs, &ys).map(|fit| fit.slope * 12.0).unwrap_or(0.0)
}

/// Correlation between the (integer) calendar year and the anomaly.
pub fn year_correlation(results: &[MoodResult]) -> Option<f64> {
    let (xs, ys) = year_value_columns(results);
    pearson(&xs, &ys)
}

/// Evaluate a year-vs-anomaly least squares line at each target year.
///
/// Returns an empty list when the series cannot support a line fit.
pub fn project(results: &[MoodResult], years: &[i32]) -> Vec<Projection> {
    let (xs, ys) = year_value_columns(results);
    let Some(fit) = fit_line(&xs, &ys) else {
        return Vec::new();
    };
    years
        .iter()
        .map(|&year| Projection {
            year,
            anomaly: fit.predict(year as f64),
        })
        .collect()
}

/// Mean anomaly of one calendar year.
pub fn year_mean(results: &[MoodResult], year: i32) -> Option<f64> {
    let values: Vec<f64> = results
        .iter()
        .filter(|r| r.sample.year() == year)
        .map(|r| r.sample.value)
        .collect();
    mean(&values)
}

/// Compare the mean anomaly of two years. `None` if either year has no data.
pub fn compare_years(results: &[MoodResult], year_a: i32, year_b: i32) -> Option<YearComparison> {
    let mean_a = year_mean(results, year_a)?;
    let mean_b = year_mean(results, year_b)?;
    Some(YearComparison {
        year_a,
        mean_a,
        year_b,
        mean_b,
        delta: mean_b - mean_a,
    })
}

/// Count results per mood, most frequent first.
///
/// Moods that never occur are omitted. Ties keep scale order.
pub fn mood_frequency(scale: MoodScale<'_>, results: &[MoodResult]) -> Vec<MoodCount> {
    let total = results.len();
    let mut counts: Vec<MoodCount> = scale
        .bands()
        .iter()
        .map(|band| {
            let count = results.iter().filter(|r| r.band.label == band.label).count();
            MoodCount {
                band: *band,
                count,
                share: if total == 0 { 0.0 } else { count as f64 / total as f64 },
            }
        })
        .filter(|c| c.count > 0)
        .collect();

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Histogram of anomaly values.
pub fn anomaly_histogram(results: &[MoodResult], bins: usize) -> Option<Histogram> {
    let values: Vec<f64> = results.iter().map(|r| r.sample.value).collect();
    histogram(&values, bins)
}

fn year_value_columns(results: &[MoodResult]) -> (Vec<f64>, Vec<f64>) {
    results
        .iter()
        .map(|r| (r.sample.year() as f64, r.sample.value))
        .unzip()
}
