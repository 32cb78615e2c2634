//! Markdown snapshot of a dashboard run.
//!
//! The snapshot is a shareable, static copy of what the dashboard shows:
//! headline metrics, mood frequency, the year comparison, and the band table.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::app::pipeline::RunOutput;
use crate::domain::DashboardConfig;
use crate::error::AppError;
use crate::mood::MoodScale;
use crate::report::format::fmt_bound;

/// Default location for snapshots written from the TUI.
pub fn default_report_path(now: DateTime<Local>) -> PathBuf {
    PathBuf::from("reports").join(format!("cmood_{}.md", now.format("%Y%m%d_%H%M%S")))
}

/// Render the snapshot as markdown text.
pub fn render_markdown(run: &RunOutput, config: &DashboardConfig, generated: DateTime<Local>) -> String {
    let mut out = String::new();
    let summary = &run.summary;

    out.push_str("# Earth mood snapshot\n\n");
    out.push_str(&format!("- generated: {}\n", generated.to_rfc3339()));
    out.push_str(&format!("- source: {}\n", run.data.source));
    out.push_str(&format!("- samples: {}\n", summary.n_samples));
    out.push_str(&format!("- visible: {}\n", run.visible.len()));
    if let (Some(a), Some(b)) = (summary.first_date, summary.last_date) {
        out.push_str(&format!("- range: {} .. {}\n", a.format("%Y-%m"), b.format("%Y-%m")));
    }
    if let Some(y) = config.from_year {
        out.push_str(&format!("- from_year: {y}\n"));
    }
    if let Some(y) = config.to_year {
        out.push_str(&format!("- to_year: {y}\n"));
    }
    if !config.moods.is_empty() {
        out.push_str(&format!("- moods: {}\n", config.moods.join(", ")));
    }

    out.push_str("\n## Metrics\n\n");
    out.push_str("| metric | value |\n| - | - |\n");
    if let Some(latest) = &summary.latest {
        out.push_str(&format!(
            "| latest mood | {} ({:.3}°C, {}) |\n",
            latest.band.display_name(),
            latest.sample.value,
            latest.sample.date.format("%Y-%m")
        ));
    }
    out.push_str(&format!(
        "| {}-year trend | {:+.3}°C/yr ({}) |\n",
        summary.trend_years,
        summary.trend_per_year,
        summary.trend_direction.label()
    ));
    if let Some(r) = summary.correlation {
        out.push_str(&format!("| correlation (year vs anomaly) | {r:.2} |\n"));
    }
    for p in &summary.projections {
        out.push_str(&format!("| predicted {} | {:.2}°C |\n", p.year, p.anomaly));
    }

    out.push_str("\n## Mood frequency\n\n");
    out.push_str("| mood | months | share |\n| - | - | - |\n");
    for c in &run.frequency {
        out.push_str(&format!(
            "| {} | {} | {:.1}% |\n",
            c.band.display_name(),
            c.count,
            c.share * 100.0
        ));
    }

    if let Some(cmp) = &run.comparison {
        out.push_str("\n## Year comparison\n\n");
        out.push_str(&crate::report::format_comparison(cmp));
        out.push('\n');
    }

    out.push_str("\n## Mood scale\n\n");
    out.push_str("| mood | from | to | color |\n| - | - | - | - |\n");
    for band in MoodScale::earth().bands() {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            band.display_name(),
            fmt_bound(band.lower),
            fmt_bound(band.upper),
            band.color_hex()
        ));
    }

    out
}

/// Write the snapshot to `path`, creating parent directories as needed.
pub fn write_markdown_report(path: &Path, run: &RunOutput, config: &DashboardConfig) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)
            .map_err(|e| AppError::io(format!("Failed to create report dir '{}': {e}", parent.display())))?;
    }

    let mut file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create report '{}': {e}", path.display())))?;
    file.write_all(render_markdown(run, config, Local::now()).as_bytes())
        .map_err(|e| AppError::io(format!("Failed to write report: {e}")))?;

    tracing::info!(path = %path.display(), "wrote markdown snapshot");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_with_data;
    use crate::domain::AnomalySample;
    use crate::io::ingest::{IngestedData, ParsedTable};
    use chrono::NaiveDate;

    fn sample_run(config: &DashboardConfig) -> RunOutput {
        let samples = (0..36)
            .map(|i| {
                AnomalySample::new(
                    NaiveDate::from_ymd_opt(2000 + i / 12, (i % 12) as u32 + 1, 1).unwrap(),
                    0.05 * i as f64,
                )
            })
            .collect();
        let table = ParsedTable {
            samples,
            rows_read: 3,
            missing_cells: 0,
        };
        run_with_data(config, IngestedData::from_table("unit", table)).unwrap()
    }

    #[test]
    fn markdown_has_all_sections() {
        let config = DashboardConfig {
            compare: Some((2000, 2002)),
            ..DashboardConfig::default()
        };
        let run = sample_run(&config);
        let md = render_markdown(&run, &config, Local::now());

        assert!(md.starts_with("# Earth mood snapshot\n"));
        assert!(md.contains("## Metrics"));
        assert!(md.contains("## Mood frequency"));
        assert!(md.contains("## Year comparison"));
        assert!(md.contains("| Hot 🔥 | 1.50 | +inf | #FF4444 |"));
        assert!(md.contains("| Cold ❄️ | -inf | 0.00 |"));
        assert!(md.contains("- range: 2000-01 .. 2002-12"));
    }

    #[test]
    fn write_creates_parent_dirs() {
        let config = DashboardConfig::default();
        let run = sample_run(&config);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("snap.md");

        write_markdown_report(&path, &run, &config).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("- source: unit"));
        assert!(!text.contains("## Year comparison"));
    }

    #[test]
    fn default_path_is_timestamped() {
        let now = Local::now();
        let path = default_report_path(now);
        assert!(path.starts_with("reports"));
        assert!(path.to_string_lossy().ends_with(".md"));
    }
}
