//! Export classified results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use crate::domain::MoodResult;
use crate::error::AppError;

const HEADER: [&str; 8] = [
    "date",
    "year",
    "month",
    "anomaly",
    "mood",
    "emoji",
    "color",
    "rolling_mean",
];

/// Write per-month results to a CSV file.
///
/// `rolling` must be aligned with `results` (see `chart::rolling_values`);
/// missing entries are written as empty cells.
pub fn write_results_csv(path: &Path, results: &[MoodResult], rolling: &[Option<f64>]) -> Result<(), AppError> {
    if rolling.len() != results.len() {
        return Err(AppError::invalid_input(format!(
            "Rolling mean length {} does not match result count {}.",
            rolling.len(),
            results.len()
        )));
    }

    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(HEADER)
        .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;

    for (r, mean) in results.iter().zip(rolling) {
        let s = &r.sample;
        writer
            .write_record([
                s.date.to_string(),
                s.year().to_string(),
                s.month().to_string(),
                format!("{:.3}", s.value),
                r.band.label.to_string(),
                r.band.emoji.to_string(),
                r.band.color_hex(),
                mean.map(|m| format!("{m:.4}")).unwrap_or_default(),
            ])
            .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::io(format!("Failed to flush export CSV: {e}")))?;

    tracing::info!(path = %path.display(), rows = results.len(), "wrote results CSV");
    Ok(())
}
