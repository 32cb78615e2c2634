//! Read/write chart JSON files.
//!
//! Chart JSON is the "portable" representation of a prepared chart:
//! - the mood scale (labels, emoji, colors, bounds)
//! - every visible point with its mood
//! - the rolling mean series
//!
//! Renderers that are not part of this tool (image export, notebooks) can
//! consume it directly; `cmood plot --chart` redraws it in the terminal.
//! The schema is defined by `domain::ChartFile`.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::chart::ChartData;
use crate::domain::{BandInfo, ChartFile, ChartPoint, MoodResult, RollingPoint};
use crate::error::AppError;
use crate::mood::MoodScale;

/// Assemble a chart file from prepared results.
pub fn build_chart_file(
    source: &str,
    generated_at: DateTime<Local>,
    scale: MoodScale<'_>,
    visible: &[MoodResult],
    chart: &ChartData,
) -> ChartFile {
    ChartFile {
        tool: "cmood".to_string(),
        source: source.to_string(),
        generated_at: generated_at.to_rfc3339(),
        bands: scale.bands().iter().map(BandInfo::from).collect(),
        points: visible
            .iter()
            .map(|r| ChartPoint {
                date: r.sample.date,
                x: r.sample.fractional_year(),
                anomaly: r.sample.value,
                mood: r.band.label.to_string(),
            })
            .collect(),
        rolling_mean: chart
            .rolling
            .iter()
            .map(|&(x, mean)| RollingPoint { x, mean })
            .collect(),
    }
}

/// Write a chart JSON file.
pub fn write_chart_json(path: &Path, chart: &ChartFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create chart JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, chart)
        .map_err(|e| AppError::io(format!("Failed to write chart JSON: {e}")))?;

    tracing::info!(path = %path.display(), points = chart.points.len(), "wrote chart JSON");
    Ok(())
}

/// Read a chart JSON file.
pub fn read_chart_json(path: &Path) -> Result<ChartFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open chart JSON '{}': {e}", path.display())))?;
    let chart: ChartFile =
        serde_json::from_reader(file).map_err(|e| AppError::io(format!("Invalid chart JSON: {e}")))?;
    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartData, prepare};
    use crate::domain::AnomalySample;
    use chrono::NaiveDate;

    #[test]
    fn chart_json_survives_disk() {
        let samples: Vec<_> = [(1, -0.2), (2, 0.3), (3, 1.7)]
            .iter()
            .map(|&(m, v)| AnomalySample::new(NaiveDate::from_ymd_opt(2020, m, 1).unwrap(), v))
            .collect();
        let results = prepare(&samples).unwrap();
        let chart = ChartData::build(MoodScale::earth(), &results, &results, 2, 1);
        let file = build_chart_file("test.csv", Local::now(), MoodScale::earth(), &results, &chart);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.json");
        write_chart_json(&path, &file).unwrap();
        let back = read_chart_json(&path).unwrap();

        assert_eq!(back.tool, "cmood");
        assert_eq!(back.bands.len(), 4);
        assert_eq!(back.bands[0].lower, None);
        assert_eq!(back.bands[3].upper, None);
        let moods: Vec<_> = back.points.iter().map(|p| p.mood.as_str()).collect();
        assert_eq!(moods, ["Cold", "Stable", "Hot"]);
        assert_eq!(back.rolling_mean.len(), 3);
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = read_chart_json(&path).unwrap_err();
        assert!(err.message().starts_with("Invalid chart JSON"));
    }
}
