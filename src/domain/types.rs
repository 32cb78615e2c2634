//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while classifying and charting
//! - exported to JSON/CSV
//! - reloaded later for plotting

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Default rolling-mean window (months).
pub const DEFAULT_ROLLING_WINDOW: usize = 120;

/// Minimum samples inside the window before a rolling mean is reported.
pub const DEFAULT_ROLLING_MIN_PERIODS: usize = 30;

/// Trailing window (years) for the warming/cooling trend metric.
pub const DEFAULT_TREND_YEARS: usize = 10;

/// Years the linear projection is evaluated at.
pub const DEFAULT_PROJECTION_YEARS: [i32; 2] = [2030, 2050];

/// Number of histogram bins for the anomaly distribution.
pub const DEFAULT_HISTOGRAM_BINS: usize = 40;

/// One monthly temperature anomaly observation (°C vs the 1951–1980 baseline).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalySample {
    pub date: NaiveDate,
    pub value: f64,
}

impl AnomalySample {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Time axis used by charts: `year + (month - 1) / 12`.
    pub fn fractional_year(&self) -> f64 {
        self.date.year() as f64 + (self.date.month0() as f64) / 12.0
    }
}

/// A contiguous anomaly interval `[lower, upper)` mapped to one emoji/label pair.
///
/// The last band of a scale also owns `+inf`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodBand {
    pub lower: f64,
    pub upper: f64,
    pub emoji: &'static str,
    pub label: &'static str,
    /// Chart color as RGB.
    pub color: [u8; 3],
    /// Single-cell marker for ASCII plots.
    pub glyph: char,
}

impl MoodBand {
    /// Whether `value` falls inside this band (lower-inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && (value < self.upper || self.upper == f64::INFINITY)
    }

    /// Label plus emoji, e.g. `Hot 🔥`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.label, self.emoji)
    }

    pub fn color_hex(&self) -> String {
        let [r, g, b] = self.color;
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

/// A sample together with the band it classified into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoodResult {
    pub sample: AnomalySample,
    pub band: MoodBand,
}

/// Where the anomaly series comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Fetch the GISTEMP table over HTTP.
    Remote,
    /// Read a local CSV (GISTEMP table or `date,anomaly` long format).
    File(PathBuf),
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub source: DataSource,

    /// Inclusive visible year range.
    pub from_year: Option<i32>,
    pub to_year: Option<i32>,

    /// Visible mood labels (case-insensitive). Empty means all moods.
    pub moods: Vec<String>,

    pub rolling_window: usize,
    pub rolling_min_periods: usize,
    pub trend_years: usize,
    pub projection_years: Vec<i32>,
    pub compare: Option<(i32, i32)>,
    pub histogram_bins: usize,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_results: Option<PathBuf>,
    pub export_chart: Option<PathBuf>,
    pub export_report: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: DataSource::Remote,
            from_year: None,
            to_year: None,
            moods: Vec::new(),
            rolling_window: DEFAULT_ROLLING_WINDOW,
            rolling_min_periods: DEFAULT_ROLLING_MIN_PERIODS,
            trend_years: DEFAULT_TREND_YEARS,
            projection_years: DEFAULT_PROJECTION_YEARS.to_vec(),
            compare: None,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            plot: true,
            plot_width: 100,
            plot_height: 25,
            export_results: None,
            export_chart: None,
            export_report: None,
        }
    }
}

impl DashboardConfig {
    /// Visible date window derived from the year range.
    pub fn date_window(&self) -> (Option<NaiveDate>, Option<NaiveDate>) {
        let from = self.from_year.and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
        let to = self.to_year.and_then(|y| NaiveDate::from_ymd_opt(y, 12, 31));
        (from, to)
    }
}

/// A saved chart file (JSON).
///
/// Carries everything the ASCII plotter needs so a chart can be redrawn
/// without re-fetching or re-classifying.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartFile {
    pub tool: String,
    pub source: String,
    pub generated_at: String,
    pub bands: Vec<BandInfo>,
    pub points: Vec<ChartPoint>,
    pub rolling_mean: Vec<RollingPoint>,
}

/// Owned band descriptor for chart files.
///
/// JSON has no infinities, so open ends are `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandInfo {
    pub label: String,
    pub emoji: String,
    pub color: String,
    pub glyph: char,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl From<&MoodBand> for BandInfo {
    fn from(band: &MoodBand) -> Self {
        Self {
            label: band.label.to_string(),
            emoji: band.emoji.to_string(),
            color: band.color_hex(),
            glyph: band.glyph,
            lower: band.lower.is_finite().then_some(band.lower),
            upper: band.upper.is_finite().then_some(band.upper),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub x: f64,
    pub anomaly: f64,
    pub mood: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    pub x: f64,
    pub mean: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_year_uses_month_offset() {
        let s = AnomalySample::new(NaiveDate::from_ymd_opt(2000, 7, 1).unwrap(), 0.4);
        assert!((s.fractional_year() - 2000.5).abs() < 1e-12);
        assert_eq!(s.year(), 2000);
        assert_eq!(s.month(), 7);
    }

    #[test]
    fn band_info_drops_infinite_bounds() {
        let band = MoodBand {
            lower: f64::NEG_INFINITY,
            upper: 0.0,
            emoji: "❄️",
            label: "Cold",
            color: [0x44, 0x88, 0xFF],
            glyph: 'c',
        };
        let info = BandInfo::from(&band);
        assert_eq!(info.lower, None);
        assert_eq!(info.upper, Some(0.0));
        assert_eq!(info.color, "#4488FF");
    }

    #[test]
    fn date_window_spans_whole_years() {
        let config = DashboardConfig {
            from_year: Some(1950),
            to_year: Some(1960),
            ..DashboardConfig::default()
        };
        let (from, to) = config.date_window();
        assert_eq!(from, NaiveDate::from_ymd_opt(1950, 1, 1));
        assert_eq!(to, NaiveDate::from_ymd_opt(1960, 12, 31));
    }
}
