//! Shared dashboard pipeline used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> classify -> filter -> metrics -> chart series
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::analysis::{
    ClimateSummary, MoodCount, YearComparison, anomaly_histogram, compare_years, mood_frequency,
    summarize,
};
use crate::chart::{ChartData, prepare_with, visible};
use crate::domain::{DashboardConfig, MoodResult};
use crate::error::AppError;
use crate::io::ingest::IngestedData;
use crate::math::Histogram;
use crate::mood::MoodScale;

/// All computed outputs of a single dashboard run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub data: IngestedData,
    /// Every loaded sample, classified, in date order.
    pub results: Vec<MoodResult>,
    /// Results after the year window and mood filter.
    pub visible: Vec<MoodResult>,
    pub summary: ClimateSummary,
    pub frequency: Vec<MoodCount>,
    pub histogram: Option<Histogram>,
    pub comparison: Option<YearComparison>,
    pub chart: ChartData,
}

impl RunOutput {
    /// Rolling mean aligned with `visible`, as written to the CSV export.
    pub fn visible_rolling(&self, config: &DashboardConfig) -> Vec<Option<f64>> {
        let all = crate::chart::rolling_values(
            &self.results,
            config.rolling_window,
            config.rolling_min_periods,
        );
        // `visible` is an order-preserving subsequence of `results`.
        let mut out = Vec::with_capacity(self.visible.len());
        let mut rest = self.results.iter().zip(all);
        for v in &self.visible {
            let found = rest
                .by_ref()
                .find(|(r, _)| r.sample == v.sample)
                .and_then(|(_, m)| m);
            out.push(found);
        }
        out
    }
}

/// Load the configured source and run the dashboard pipeline.
pub fn run(config: &DashboardConfig) -> Result<RunOutput, AppError> {
    validate_config(config)?;
    let data = crate::data::load(&config.source)?;
    run_with_data(config, data)
}

/// Run the pipeline over already loaded data.
///
/// The TUI uses this to re-filter without re-fetching.
pub fn run_with_data(config: &DashboardConfig, data: IngestedData) -> Result<RunOutput, AppError> {
    validate_config(config)?;
    if data.samples.is_empty() {
        return Err(AppError::no_data(format!("No anomaly samples in {}.", data.source)));
    }

    let scale = MoodScale::earth();

    // 1) Classify everything; headline metrics use the full series.
    let results = prepare_with(scale, &data.samples)?;
    let summary = summarize(&results, config);

    // 2) Visible subset drives the chart, frequency, and histogram.
    let visible = visible(&results, config);
    let frequency = mood_frequency(scale, &visible);
    let histogram = anomaly_histogram(&visible, config.histogram_bins);

    // 3) Optional year comparison over the full series.
    let comparison = match config.compare {
        Some((a, b)) => {
            let cmp = compare_years(&results, a, b);
            if cmp.is_none() {
                tracing::warn!(year_a = a, year_b = b, "comparison year has no data");
            }
            cmp
        }
        None => None,
    };

    let chart = ChartData::build(
        scale,
        &results,
        &visible,
        config.rolling_window,
        config.rolling_min_periods,
    );

    tracing::debug!(
        samples = results.len(),
        visible = visible.len(),
        "pipeline finished"
    );

    Ok(RunOutput {
        data,
        results,
        visible,
        summary,
        frequency,
        histogram,
        comparison,
        chart,
    })
}

/// Reject configurations the pipeline cannot honor.
pub fn validate_config(config: &DashboardConfig) -> Result<(), AppError> {
    if let (Some(from), Some(to)) = (config.from_year, config.to_year) {
        if from > to {
            return Err(AppError::invalid_input(format!(
                "--from ({from}) must not be after --to ({to})."
            )));
        }
    }
    if config.rolling_window == 0 {
        return Err(AppError::invalid_input("--rolling-window must be at least 1."));
    }
    if config.histogram_bins == 0 {
        return Err(AppError::invalid_input("--bins must be at least 1."));
    }

    let scale = MoodScale::earth();
    for label in &config.moods {
        if scale.find(label).is_none() {
            let valid: Vec<&str> = scale.bands().iter().map(|b| b.label).collect();
            return Err(AppError::invalid_input(format!(
                "Unknown mood '{label}'. Valid moods: {}.",
                valid.join(", ")
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnomalySample;
    use crate::error::ErrorKind;
    use crate::io::ingest::ParsedTable;
    use chrono::NaiveDate;

    fn data(years: std::ops::Range<i32>, step: f64) -> IngestedData {
        let mut samples = Vec::new();
        let mut v = -0.5;
        for y in years {
            for m in 1..=12 {
                samples.push(AnomalySample::new(NaiveDate::from_ymd_opt(y, m, 1).unwrap(), v));
                v += step;
            }
        }
        IngestedData::from_table(
            "unit",
            ParsedTable {
                samples,
                rows_read: 0,
                missing_cells: 0,
            },
        )
    }

    #[test]
    fn full_run_keeps_metrics_on_full_series() {
        let config = DashboardConfig {
            from_year: Some(2010),
            to_year: Some(2011),
            compare: Some((2000, 2019)),
            ..DashboardConfig::default()
        };
        let run = run_with_data(&config, data(2000..2020, 0.01)).unwrap();

        assert_eq!(run.results.len(), 240);
        assert_eq!(run.visible.len(), 24);
        assert_eq!(run.summary.n_samples, 240);
        assert!((run.summary.trend_per_year - 0.12).abs() < 1e-9);

        let cmp = run.comparison.unwrap();
        assert!((cmp.delta - 19.0 * 0.12).abs() < 1e-9);

        let total: usize = run.frequency.iter().map(|c| c.count).sum();
        assert_eq!(total, 24);
        assert_eq!(run.histogram.unwrap().total(), 24);

        // Rolling mean over the full series already has history at 2010.
        assert_eq!(run.chart.rolling.len(), 24);
    }

    #[test]
    fn mood_filter_narrows_visible_only() {
        let config = DashboardConfig {
            moods: vec!["hot".to_string()],
            ..DashboardConfig::default()
        };
        let run = run_with_data(&config, data(2000..2020, 0.01)).unwrap();
        assert!(run.visible.iter().all(|r| r.band.label == "Hot"));
        assert_eq!(run.results.len(), 240);
    }

    #[test]
    fn visible_rolling_aligns_with_visible() {
        let config = DashboardConfig {
            from_year: Some(2001),
            rolling_window: 12,
            rolling_min_periods: 12,
            ..DashboardConfig::default()
        };
        let run = run_with_data(&config, data(2000..2003, 0.01)).unwrap();
        let rolling = run.visible_rolling(&config);
        assert_eq!(rolling.len(), run.visible.len());
        // Window covering 2000-02 .. 2001-01 has mean of values 1..=12 steps.
        let expected = -0.5 + 0.01 * 6.5;
        assert!((rolling[0].unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn empty_data_is_no_data() {
        let err = run_with_data(&DashboardConfig::default(), data(2000..2000, 0.0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoData);
    }

    #[test]
    fn empty_visible_set_is_not_an_error() {
        let config = DashboardConfig {
            from_year: Some(1900),
            to_year: Some(1901),
            ..DashboardConfig::default()
        };
        let run = run_with_data(&config, data(2000..2002, 0.01)).unwrap();
        assert!(run.visible.is_empty());
        assert!(run.frequency.is_empty());
        assert!(run.histogram.is_none());
        assert!(run.chart.is_empty());
    }

    #[test]
    fn bad_config_is_rejected() {
        let unknown = DashboardConfig {
            moods: vec!["Lukewarm".to_string()],
            ..DashboardConfig::default()
        };
        let err = validate_config(&unknown).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.message().contains("Cold, Stable, Warm, Hot"));

        let reversed = DashboardConfig {
            from_year: Some(2000),
            to_year: Some(1990),
            ..DashboardConfig::default()
        };
        assert!(validate_config(&reversed).is_err());

        let no_bins = DashboardConfig {
            histogram_bins: 0,
            ..DashboardConfig::default()
        };
        assert!(validate_config(&no_bins).is_err());
    }
}
