//! Command-line parsing for the Earth mood dashboard.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the classification/analytics code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{
    DEFAULT_HISTOGRAM_BINS, DEFAULT_ROLLING_MIN_PERIODS, DEFAULT_ROLLING_WINDOW, DEFAULT_TREND_YEARS,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cmood", version, about = "Earth's mood from NASA GISTEMP temperature anomalies")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print headline metrics, mood frequency, and optionally a plot/exports.
    Summary(DashboardArgs),
    /// Print the mood of every visible month.
    Moods(DashboardArgs),
    /// Classify raw anomaly values (°C) on the Earth scale.
    Classify(ClassifyArgs),
    /// Plot a previously exported chart JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same pipeline as `cmood summary`, but renders results
    /// in a terminal UI using Ratatui.
    Tui(DashboardArgs),
}

/// Common options for loading, filtering, and presenting the anomaly series.
#[derive(Debug, Args, Clone)]
pub struct DashboardArgs {
    /// Read a local CSV (GISTEMP table or `date,anomaly`) instead of fetching.
    #[arg(short = 'f', long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    /// First visible year (inclusive).
    #[arg(long, value_name = "YEAR")]
    pub from: Option<i32>,

    /// Last visible year (inclusive).
    #[arg(long, value_name = "YEAR")]
    pub to: Option<i32>,

    /// Only show months in this mood (repeatable: Cold, Stable, Warm, Hot).
    #[arg(long = "mood", value_name = "LABEL")]
    pub moods: Vec<String>,

    /// Rolling mean window (months).
    #[arg(long, default_value_t = DEFAULT_ROLLING_WINDOW)]
    pub rolling_window: usize,

    /// Minimum samples in a window before the rolling mean is reported.
    #[arg(long, default_value_t = DEFAULT_ROLLING_MIN_PERIODS)]
    pub rolling_min_periods: usize,

    /// Trailing years used for the trend.
    #[arg(long, default_value_t = DEFAULT_TREND_YEARS)]
    pub trend_years: usize,

    /// Compare the mean anomaly of two years.
    #[arg(long, num_args = 2, value_names = ["Y1", "Y2"])]
    pub compare: Option<Vec<i32>>,

    /// Histogram bins for the anomaly distribution.
    #[arg(long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
    pub bins: usize,

    /// Skip the ASCII plot (printed by default).
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Export per-month results to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the chart (bands, points, rolling mean) to JSON.
    #[arg(long = "export-chart", value_name = "JSON")]
    pub export_chart: Option<PathBuf>,

    /// Write a markdown snapshot of the dashboard.
    #[arg(long = "export-report", value_name = "MD")]
    pub export_report: Option<PathBuf>,
}

/// Values to classify.
#[derive(Debug, Args)]
pub struct ClassifyArgs {
    /// Anomaly values in °C (e.g. 0.42 -0.1 inf).
    #[arg(required = true, allow_negative_numbers = true, value_name = "VALUE")]
    pub values: Vec<f64>,
}

/// Options for plotting a saved chart.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Chart JSON file produced by `cmood summary --export-chart`.
    #[arg(long, value_name = "JSON")]
    pub chart: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}
