//! Plain-text report sections for the terminal.

use crate::analysis::{ClimateSummary, MoodCount, YearComparison};
use crate::domain::{DashboardConfig, MoodResult};
use crate::io::ingest::IngestedData;
use crate::math::Histogram;
use crate::mood::MoodScale;

/// Format the dataset header and headline metrics.
pub fn format_run_summary(
    data: &IngestedData,
    summary: &ClimateSummary,
    visible: usize,
    config: &DashboardConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== cmood - Earth Mood (NASA GISTEMP) ===\n");
    out.push_str(&format!("Source: {}\n", data.source));
    out.push_str(&format!(
        "Loaded: {}\n",
        data.loaded_at.format("%Y-%m-%d %H:%M:%S")
    ));

    let range = match (summary.first_date, summary.last_date) {
        (Some(a), Some(b)) => format!("{} .. {}", a.format("%Y-%m"), b.format("%Y-%m")),
        _ => "-".to_string(),
    };
    out.push_str(&format!(
        "Samples: n={} | range={range} | missing cells={}\n",
        summary.n_samples, data.missing_cells
    ));
    out.push_str(&format!("Visible: n={visible} | filter: {}\n", describe_filter(config)));

    out.push_str("\nMetrics:\n");
    match &summary.latest {
        Some(latest) => out.push_str(&format!(
            "- Latest mood: {} ({}, {})\n",
            latest.band.display_name(),
            fmt_celsius(latest.sample.value, 3),
            latest.sample.date.format("%Y-%m"),
        )),
        None => out.push_str("- Latest mood: -\n"),
    }
    out.push_str(&format!(
        "- {}-year trend: {:+.3}°C/yr ({})\n",
        summary.trend_years,
        summary.trend_per_year,
        summary.trend_direction.label(),
    ));
    out.push_str(&format!(
        "- Correlation (year vs anomaly): {}\n",
        summary
            .correlation
            .map(|r| format!("{r:.2}"))
            .unwrap_or_else(|| "-".to_string())
    ));
    for p in &summary.projections {
        out.push_str(&format!("- Predicted {}: {}\n", p.year, fmt_celsius(p.anomaly, 2)));
    }

    out
}

/// Format the mood frequency table.
pub fn format_mood_frequency(counts: &[MoodCount]) -> String {
    let mut out = String::new();
    out.push_str("Earth's mood frequency:\n");
    if counts.is_empty() {
        out.push_str("(no samples)\n");
        return out;
    }

    out.push_str(&format!("{:<12} {:>8} {:>8}\n", "mood", "months", "share"));
    out.push_str(&format!("{:-<12} {:-<8} {:-<8}\n", "", "", ""));
    for c in counts {
        out.push_str(&format!(
            "{:<12} {:>8} {:>7.1}%\n",
            c.band.label,
            c.count,
            c.share * 100.0
        ));
    }
    out
}

/// One-sentence comparison of two years.
pub fn format_comparison(cmp: &YearComparison) -> String {
    format!(
        "In {}, Earth was at {}, compared to {} in {}: a change of {:+.2}°C.",
        cmp.year_a,
        fmt_celsius(cmp.mean_a, 2),
        fmt_celsius(cmp.mean_b, 2),
        cmp.year_b,
        cmp.delta,
    )
}

/// Horizontal bar histogram, bars scaled to `bar_width` columns.
pub fn format_histogram(hist: &Histogram, bar_width: usize) -> String {
    let mut out = String::new();
    out.push_str("Anomaly distribution (months per bin):\n");

    let max = hist.counts.iter().copied().max().unwrap_or(0).max(1);
    let bar_width = bar_width.max(1);
    for (left, right, count) in hist.bins() {
        let len = (count * bar_width).div_ceil(max);
        let line = format!("[{left:>6.2}, {right:>6.2}) {count:>5} {}", "#".repeat(len));
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// Per-month table used by `cmood moods`.
pub fn format_mood_table(results: &[MoodResult]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:<8} {:>9}  {}\n", "month", "anomaly", "mood"));
    out.push_str(&format!("{:-<8} {:-<9}  {:-<10}\n", "", "", ""));
    for r in results {
        out.push_str(&format!(
            "{:<8} {:>9}  {}\n",
            r.sample.date.format("%Y-%m"),
            format!("{:+.2}", r.sample.value),
            r.band.display_name(),
        ));
    }
    out
}

/// The band table of a scale, e.g. `[0.50, 1.50)  Warm 🌱  #FF8800`.
pub fn format_scale(scale: MoodScale<'_>) -> String {
    let mut out = String::new();
    for band in scale.bands() {
        let range = format!("[{}, {})", fmt_bound(band.lower), fmt_bound(band.upper));
        out.push_str(&format!(
            "{range:<16} {:<10} {}\n",
            band.display_name(),
            band.color_hex()
        ));
    }
    out
}

fn describe_filter(config: &DashboardConfig) -> String {
    let years = match (config.from_year, config.to_year) {
        (None, None) => "all years".to_string(),
        (Some(a), None) => format!("{a}.."),
        (None, Some(b)) => format!("..{b}"),
        (Some(a), Some(b)) => format!("{a}..{b}"),
    };
    let moods = if config.moods.is_empty() {
        "all moods".to_string()
    } else {
        config.moods.join(",")
    };
    format!("{years} | {moods}")
}

fn fmt_celsius(v: f64, decimals: usize) -> String {
    format!("{v:.decimals$}°C")
}

/// Band bound as `-inf`, `+inf` or two decimals.
pub(crate) fn fmt_bound(v: f64) -> String {
    if v == f64::INFINITY {
        "+inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{v:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{mood_frequency, summarize};
    use crate::chart::prepare;
    use crate::domain::AnomalySample;
    use crate::io::ingest::{IngestedData, ParsedTable};
    use crate::math::histogram;
    use chrono::NaiveDate;

    fn results(values: &[f64]) -> Vec<MoodResult> {
        let samples: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| AnomalySample::new(NaiveDate::from_ymd_opt(2020, i as u32 + 1, 1).unwrap(), v))
            .collect();
        prepare(&samples).unwrap()
    }

    #[test]
    fn comparison_sentence() {
        let cmp = YearComparison {
            year_a: 1950,
            mean_a: -0.17,
            year_b: 2024,
            mean_b: 1.28,
            delta: 1.45,
        };
        assert_eq!(
            format_comparison(&cmp),
            "In 1950, Earth was at -0.17°C, compared to 1.28°C in 2024: a change of +1.45°C."
        );
    }

    #[test]
    fn scale_table_lists_every_band() {
        let txt = format_scale(MoodScale::earth());
        let lines: Vec<_> = txt.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("[-inf, 0.00)"));
        assert!(lines[3].starts_with("[1.50, +inf)"));
        assert!(lines[3].contains("Hot 🔥"));
    }

    #[test]
    fn frequency_table_rows() {
        let rs = results(&[0.1, 0.2, 0.7, 1.6]);
        let txt = format_mood_frequency(&mood_frequency(MoodScale::earth(), &rs));
        assert!(txt.contains("Stable              2    50.0%"), "{txt}");
        assert!(format_mood_frequency(&[]).contains("(no samples)"));
    }

    #[test]
    fn histogram_bars_scale_to_max() {
        let h = histogram(&[0.0, 0.0, 0.0, 1.0], 2).unwrap();
        let txt = format_histogram(&h, 6);
        let lines: Vec<_> = txt.lines().collect();
        assert!(lines[1].ends_with("3 ######"), "{}", lines[1]);
        assert!(lines[2].ends_with("1 ##"), "{}", lines[2]);
    }

    #[test]
    fn summary_mentions_latest_mood() {
        let samples: Vec<_> = [(2019, 0.2), (2020, 0.4), (2021, 1.6)]
            .iter()
            .map(|&(y, v)| AnomalySample::new(NaiveDate::from_ymd_opt(y, 3, 1).unwrap(), v))
            .collect();
        let rs = prepare(&samples).unwrap();
        let data = IngestedData::from_table("unit", ParsedTable::default());
        let config = DashboardConfig::default();
        let txt = format_run_summary(&data, &summarize(&rs, &config), rs.len(), &config);
        assert!(txt.contains("Latest mood: Hot 🔥 (1.600°C, 2021-03)"), "{txt}");
        assert!(txt.contains("Predicted 2030"));
        assert!(txt.contains("filter: all years | all moods"));
    }

    #[test]
    fn mood_table_rows() {
        let txt = format_mood_table(&results(&[-0.25]));
        assert!(txt.lines().nth(2).unwrap().starts_with("2020-01      -0.25  Cold ❄️"));
    }
}
