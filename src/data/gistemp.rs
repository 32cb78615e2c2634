//! NASA GISTEMP v4 integration (global land-ocean temperature index).
//!
//! The public table is a wide CSV: a title line, then one row per year with
//! twelve monthly anomaly columns followed by annual/seasonal aggregates.
//! Only the monthly columns are used; they are melted into one sample per
//! (year, month).

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;

use crate::error::AppError;
use crate::io::ingest::{IngestedData, ParsedTable, build_header_map, parse_anomaly_cell};

pub const DEFAULT_GISTEMP_URL: &str = "https://data.giss.nasa.gov/gistemp/tabledata_v4/GLB.Ts+dSST.csv";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How many leading lines may precede the `Year,...` header.
const MAX_PREAMBLE_LINES: usize = 5;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

pub struct GistempClient {
    client: Client,
    url: String,
}

impl GistempClient {
    /// Build a client from the environment (`.env` is honored).
    ///
    /// - `GISTEMP_URL` overrides the table URL
    /// - `GISTEMP_TIMEOUT_SECS` overrides the request timeout
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let url = std::env::var("GISTEMP_URL")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_GISTEMP_URL.to_string());

        let timeout_secs = match std::env::var("GISTEMP_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::invalid_input(format!("Invalid GISTEMP_TIMEOUT_SECS '{raw}' (expected whole seconds)."))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Self::new(url, Duration::from_secs(timeout_secs))
    }

    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("climate-mood/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::network(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Download and parse the GISTEMP table.
    pub fn fetch(&self) -> Result<IngestedData, AppError> {
        tracing::info!(url = %self.url, "fetching GISTEMP table");

        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| AppError::network(format!("GISTEMP request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::network(format!(
                "GISTEMP request failed with status {}.",
                resp.status()
            )));
        }

        let body = resp
            .text()
            .map_err(|e| AppError::network(format!("Failed to read GISTEMP response: {e}")))?;

        let table = parse_gistemp_table(&body)?;
        tracing::info!(
            samples = table.samples.len(),
            missing = table.missing_cells,
            "parsed GISTEMP table"
        );

        Ok(IngestedData::from_table(self.url.clone(), table))
    }
}

/// Locate the `Year,...` header: `(line_index, byte_offset)`.
pub fn find_header_line(text: &str) -> Option<(usize, usize)> {
    let mut offset = 0usize;
    for (idx, line) in text.split_inclusive('\n').enumerate().take(MAX_PREAMBLE_LINES) {
        let first = line.split(',').next().unwrap_or("");
        let first = first.trim().trim_start_matches('\u{feff}');
        if first.eq_ignore_ascii_case("year") {
            return Some((idx, offset));
        }
        offset += line.len();
    }
    None
}

/// Parse the wide GISTEMP table into ascending monthly samples.
pub fn parse_gistemp_table(text: &str) -> Result<ParsedTable, AppError> {
    let (header_idx, offset) = find_header_line(text)
        .ok_or_else(|| AppError::invalid_input("GISTEMP header (`Year,Jan,...,Dec`) not found."))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text[offset..].as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::invalid_input(format!("Failed to read GISTEMP headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);

    let year_idx = *header_map
        .get("year")
        .ok_or_else(|| AppError::invalid_input("Missing required column: `Year`"))?;

    let mut month_columns: Vec<(usize, u32)> = header_map
        .iter()
        .filter_map(|(name, &idx)| month_number(name).map(|m| (idx, m)))
        .collect();
    month_columns.sort_unstable();
    if month_columns.is_empty() {
        return Err(AppError::invalid_input("GISTEMP table has no monthly (Jan..Dec) columns."));
    }

    let mut table = ParsedTable::default();
    for result in reader.records() {
        let record =
            result.map_err(|e| AppError::invalid_input(format!("GISTEMP parse error: {e}")))?;
        let line = header_idx + record.position().map(|p| p.line() as usize).unwrap_or(0);

        let year_cell = record.get(year_idx).unwrap_or("").trim();
        // Blank rows and repeated header rows carry no data.
        if year_cell.is_empty() || year_cell.eq_ignore_ascii_case("year") {
            continue;
        }
        let year = year_cell
            .parse::<i32>()
            .map_err(|_| AppError::invalid_input(format!("line {line}: Invalid year '{year_cell}'.")))?;
        table.rows_read += 1;

        for &(idx, month) in &month_columns {
            let cell = record.get(idx).unwrap_or("");
            let value = parse_anomaly_cell(cell)
                .map_err(|e| AppError::invalid_input(format!("line {line}: {e}")))?;
            let Some(value) = value else {
                table.missing_cells += 1;
                continue;
            };
            let date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
                AppError::invalid_input(format!("line {line}: Invalid date {year}-{month:02}."))
            })?;
            table.samples.push(crate::domain::AnomalySample::new(date, value));
        }
    }

    table.samples.sort_by_key(|s| s.date);
    Ok(table)
}

fn month_number(name: &str) -> Option<u32> {
    MONTHS
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const SNIPPET: &str = "Land-Ocean: Global Means\n\
Year,Jan,Feb,Mar,Apr,May,Jun,Jul,Aug,Sep,Oct,Nov,Dec,J-D,D-N,DJF,MAM,JJA,SON\n\
1880,-.18,-.24,-.09,-.16,-.09,-.21,-.18,-.10,-.15,-.23,-.22,-.18,-.17,***,***,-.11,-.17,-.20\n\
2024,1.24,1.44,1.39,1.31,1.17,1.23,1.20,1.30,1.24,1.33,1.30,***,****,1.28,1.29,1.29,1.24,1.29\n";

    #[test]
    fn header_after_title_line() {
        let (idx, offset) = find_header_line(SNIPPET).unwrap();
        assert_eq!(idx, 1);
        assert!(SNIPPET[offset..].starts_with("Year,"));
        assert!(find_header_line("date,anomaly\n2000-01,0.1\n").is_none());
    }

    #[test]
    fn melts_months_and_skips_missing() {
        let table = parse_gistemp_table(SNIPPET).unwrap();
        assert_eq!(table.rows_read, 2);
        // 24 month cells, December 2024 missing; J-D etc. are ignored.
        assert_eq!(table.samples.len(), 23);
        assert_eq!(table.missing_cells, 1);

        let first = table.samples.first().unwrap();
        assert_eq!(first.date, NaiveDate::from_ymd_opt(1880, 1, 1).unwrap());
        assert!((first.value + 0.18).abs() < 1e-12);

        let last = table.samples.last().unwrap();
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2024, 11, 1).unwrap());
        assert!((last.value - 1.30).abs() < 1e-12);

        assert!(table.samples.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn header_without_title_line() {
        let text = "Year,Jan,Feb\n1990,.40,.45\n";
        let table = parse_gistemp_table(text).unwrap();
        assert_eq!(table.samples.len(), 2);
    }

    #[test]
    fn bad_year_is_invalid_input() {
        let text = "Year,Jan,Feb\n1990,.40,.45\nnineteen,.1,.2\n";
        let err = parse_gistemp_table(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.message().contains("line 3"), "{}", err.message());
    }

    #[test]
    fn bad_value_is_invalid_input() {
        let text = "Year,Jan,Feb\n1990,.40,hot\n";
        let err = parse_gistemp_table(text).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn requires_month_columns() {
        let err = parse_gistemp_table("Year,J-D\n1990,.4\n").unwrap_err();
        assert!(err.message().contains("monthly"));
    }

    #[test]
    fn detected_by_generic_parser() {
        let table = crate::io::ingest::parse_table(SNIPPET).unwrap();
        assert_eq!(table.samples.len(), 23);
    }
}
