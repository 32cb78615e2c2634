//! CSV ingest and normalization.
//!
//! This module turns anomaly tables into a clean, ascending series of
//! `AnomalySample`s. Two layouts are accepted:
//!
//! - the GISTEMP table (`Year,Jan,...,Dec,J-D,...`), optionally preceded by a
//!   title line; see `data::gistemp`
//! - a long table with a `date` column and an `anomaly` (or `value` /
//!   `temp_anomaly`) column
//!
//! Design goals:
//! - **Gaps are not errors**: missing cells (`***`, empty, `NA`, `NaN`) are skipped
//!   and counted
//! - **Bad data is an error**: an unparsable date or number fails the load with the
//!   offending line, rather than being silently dropped
//! - **Deterministic output**: samples are stably sorted by date

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate};
use csv::StringRecord;

use crate::domain::AnomalySample;
use crate::error::AppError;

/// Accepted names for the value column of a long table, in priority order.
const VALUE_COLUMNS: [&str; 3] = ["anomaly", "value", "temp_anomaly"];

/// Parsed table contents before provenance is attached.
#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    pub samples: Vec<AnomalySample>,
    pub rows_read: usize,
    /// Cells recognized as missing and skipped.
    pub missing_cells: usize,
}

/// Ingest output: ascending samples plus provenance.
#[derive(Debug, Clone)]
pub struct IngestedData {
    /// URL or file path the data came from.
    pub source: String,
    pub loaded_at: DateTime<Local>,
    pub samples: Vec<AnomalySample>,
    pub rows_read: usize,
    pub missing_cells: usize,
}

impl IngestedData {
    pub fn from_table(source: impl Into<String>, table: ParsedTable) -> Self {
        Self {
            source: source.into(),
            loaded_at: Local::now(),
            samples: table.samples,
            rows_read: table.rows_read,
            missing_cells: table.missing_cells,
        }
    }
}

/// Load a local CSV file in either supported layout.
pub fn load_samples(path: &Path) -> Result<IngestedData, AppError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read CSV '{}': {e}", path.display())))?;

    let table = parse_table(&text)
        .map_err(|e| AppError::new(e.kind(), format!("{}: {e}", path.display())))?;

    tracing::info!(
        path = %path.display(),
        samples = table.samples.len(),
        missing = table.missing_cells,
        "loaded anomaly table"
    );

    Ok(IngestedData::from_table(path.display().to_string(), table))
}

/// Parse CSV text, detecting the layout from its header.
pub fn parse_table(text: &str) -> Result<ParsedTable, AppError> {
    if crate::data::gistemp::find_header_line(text).is_some() {
        return crate::data::gistemp::parse_gistemp_table(text);
    }
    parse_long_table(text)
}

/// Parse a `date,anomaly` long table.
pub fn parse_long_table(text: &str) -> Result<ParsedTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::invalid_input(format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let date_idx = *header_map
        .get("date")
        .ok_or_else(|| AppError::invalid_input("Missing required column: `date`"))?;
    let value_idx = VALUE_COLUMNS
        .iter()
        .find_map(|name| header_map.get(*name).copied())
        .ok_or_else(|| {
            AppError::invalid_input("Missing value column: expected one of `anomaly`, `value`, `temp_anomaly`")
        })?;

    let mut table = ParsedTable::default();
    for result in reader.records() {
        let record = result.map_err(|e| AppError::invalid_input(format!("CSV parse error: {e}")))?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        table.rows_read += 1;

        let date_cell = record.get(date_idx).unwrap_or("");
        let date = parse_date(date_cell).map_err(|e| AppError::invalid_input(format!("line {line}: {e}")))?;

        match parse_anomaly_cell(record.get(value_idx).unwrap_or(""))
            .map_err(|e| AppError::invalid_input(format!("line {line}: {e}")))?
        {
            Some(value) => table.samples.push(AnomalySample::new(date, value)),
            None => table.missing_cells += 1,
        }
    }

    table.samples.sort_by_key(|s| s.date);
    Ok(table)
}

pub(crate) fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

pub(crate) fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

/// Parse one anomaly cell.
///
/// `Ok(None)` marks a gap: empty, `NA`, `NaN`, or a run of `*` (GISTEMP's
/// missing marker). Anything else must be a finite number.
pub fn parse_anomaly_cell(raw: &str) -> Result<Option<f64>, String> {
    let s = raw.trim();
    if s.is_empty()
        || s.chars().all(|c| c == '*')
        || s.eq_ignore_ascii_case("na")
        || s.eq_ignore_ascii_case("nan")
    {
        return Ok(None);
    }

    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid anomaly value '{s}'."))?;
    if !v.is_finite() {
        return Err(format!("Non-finite anomaly value '{s}'."));
    }
    Ok(Some(v))
}

/// Parse a sample date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, and month-only `YYYY-MM` (dated the 1st).
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let s = raw.trim();
    const FMTS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Ok(d);
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, YYYY-MM."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::io::Write;

    #[test]
    fn anomaly_cell_markers() {
        assert_eq!(parse_anomaly_cell("***"), Ok(None));
        assert_eq!(parse_anomaly_cell("****"), Ok(None));
        assert_eq!(parse_anomaly_cell(" "), Ok(None));
        assert_eq!(parse_anomaly_cell("NaN"), Ok(None));
        assert_eq!(parse_anomaly_cell("-.25"), Ok(Some(-0.25)));
        assert!(parse_anomaly_cell("warm").is_err());
        assert!(parse_anomaly_cell("inf").is_err());
    }

    #[test]
    fn date_formats() {
        let d = NaiveDate::from_ymd_opt(1999, 4, 1).unwrap();
        assert_eq!(parse_date("1999-04-01"), Ok(d));
        assert_eq!(parse_date("1999/04/01"), Ok(d));
        assert_eq!(parse_date("1999-04"), Ok(d));
        assert!(parse_date("April 1999").is_err());
        assert!(parse_date("1999-13").is_err());
    }

    #[test]
    fn long_table_sorts_and_skips_gaps() {
        let text = "\u{feff}Date,Anomaly\n2000-03,0.30\n2000-01,0.10\n2000-02,***\n\n";
        let table = parse_table(text).unwrap();
        assert_eq!(table.rows_read, 3);
        assert_eq!(table.missing_cells, 1);
        let dates: Vec<_> = table.samples.iter().map(|s| s.month()).collect();
        assert_eq!(dates, [1, 3]);
    }

    #[test]
    fn long_table_value_alias() {
        let table = parse_table("date,temp_anomaly\n2010-05-01,0.71\n").unwrap();
        assert_eq!(table.samples.len(), 1);
        assert!((table.samples[0].value - 0.71).abs() < 1e-12);
    }

    #[test]
    fn unparsable_date_is_invalid_input() {
        let err = parse_table("date,anomaly\n2000-01,0.1\nyesterday,0.2\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.message().contains("line 3"), "{}", err.message());
    }

    #[test]
    fn missing_columns_are_reported() {
        let err = parse_table("when,anomaly\n2000-01,0.1\n").unwrap_err();
        assert!(err.message().contains("`date`"));
        let err = parse_table("date,temp\n2000-01,0.1\n").unwrap_err();
        assert!(err.message().contains("anomaly"));
    }

    #[test]
    fn load_samples_from_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "date,anomaly").unwrap();
        writeln!(file, "1951-01-01,-0.31").unwrap();
        writeln!(file, "1951-02-01,-0.45").unwrap();

        let data = load_samples(file.path()).unwrap();
        assert_eq!(data.samples.len(), 2);
        assert_eq!(data.source, file.path().display().to_string());
    }

    #[test]
    fn load_samples_missing_file_is_io() {
        let err = load_samples(Path::new("definitely/not/here.csv")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
