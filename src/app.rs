//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads GISTEMP (or a local file)
//! - classifies every month and computes the dashboard metrics
//! - prints reports/plots
//! - writes optional exports

use chrono::Local;
use clap::Parser;

use crate::cli::{ClassifyArgs, Command, DashboardArgs, PlotArgs};
use crate::domain::{DashboardConfig, DataSource};
use crate::error::AppError;
use crate::logging::LogMode;
use crate::mood::MoodScale;

pub mod pipeline;

/// Entry point for the `cmood` binary.
pub fn run() -> Result<(), AppError> {
    // We want `cmood` and `cmood --from 1950` to behave like `cmood tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let mode = match cli.command {
        Command::Tui(_) => LogMode::Tui,
        _ => LogMode::Cli,
    };
    crate::logging::init(mode);

    match cli.command {
        Command::Summary(args) => handle_summary(args),
        Command::Moods(args) => handle_moods(args),
        Command::Classify(args) => handle_classify(args),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_summary(args: DashboardArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args)?;
    let run = pipeline::run(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.data, &run.summary, run.visible.len(), &config)
    );
    println!("Mood scale:\n{}", crate::report::format_scale(MoodScale::earth()));
    println!("{}", crate::report::format_mood_frequency(&run.frequency));

    match (&run.comparison, config.compare) {
        (Some(cmp), _) => println!("{}\n", crate::report::format_comparison(cmp)),
        (None, Some((a, b))) => println!("No data to compare {a} and {b}.\n"),
        (None, None) => {}
    }

    if let Some(hist) = &run.histogram {
        println!("{}", crate::report::format_histogram(hist, 40));
    }

    if config.plot {
        let plot = crate::plot::render_ascii_plot(&run.chart, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    write_exports(&run, &config)
}

fn handle_moods(args: DashboardArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args)?;
    let run = pipeline::run(&config)?;

    if run.visible.is_empty() {
        return Err(AppError::no_data("No months match the current filters."));
    }
    print!("{}", crate::report::format_mood_table(&run.visible));

    write_exports(&run, &config)
}

fn handle_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let scale = MoodScale::earth();
    for value in args.values {
        let band = scale.classify(value)?;
        println!("{value:>8} -> {}", band.display_name());
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let chart = crate::io::read_chart_json(&args.chart)?;
    let plot = crate::plot::render_ascii_plot_from_chart_file(&chart, args.width, args.height);

    println!("{plot}");
    Ok(())
}

fn handle_tui(args: DashboardArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args)?;
    crate::tui::run(config)
}

/// Write every export the config asks for.
fn write_exports(run: &pipeline::RunOutput, config: &DashboardConfig) -> Result<(), AppError> {
    if let Some(path) = &config.export_results {
        crate::io::write_results_csv(path, &run.visible, &run.visible_rolling(config))?;
    }
    if let Some(path) = &config.export_chart {
        let chart = crate::io::build_chart_file(
            &run.data.source,
            Local::now(),
            MoodScale::earth(),
            &run.visible,
            &run.chart,
        );
        crate::io::write_chart_json(path, &chart)?;
    }
    if let Some(path) = &config.export_report {
        crate::report::write_markdown_report(path, run, config)?;
    }
    Ok(())
}

pub fn dashboard_config_from_args(args: &DashboardArgs) -> Result<DashboardConfig, AppError> {
    let compare = match args.compare.as_deref() {
        None => None,
        Some(&[a, b]) => Some((a, b)),
        Some(other) => {
            return Err(AppError::invalid_input(format!(
                "--compare takes exactly two years, got {}.",
                other.len()
            )));
        }
    };

    let config = DashboardConfig {
        source: args
            .file
            .clone()
            .map(DataSource::File)
            .unwrap_or(DataSource::Remote),
        from_year: args.from,
        to_year: args.to,
        moods: args.moods.clone(),
        rolling_window: args.rolling_window,
        rolling_min_periods: args.rolling_min_periods,
        trend_years: args.trend_years,
        compare,
        histogram_bins: args.bins,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_results: args.export.clone(),
        export_chart: args.export_chart.clone(),
        export_report: args.export_report.clone(),
        ..DashboardConfig::default()
    };
    pipeline::validate_config(&config)?;
    Ok(config)
}

/// Rewrite argv so `cmood` defaults to `cmood tui`.
///
/// Rules:
/// - `cmood`                       -> `cmood tui`
/// - `cmood --from 1950 ...`       -> `cmood tui --from 1950 ...`
/// - `cmood --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "summary" | "moods" | "classify" | "plot" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["cmood"])), argv(&["cmood", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["cmood", "--from", "1950"])),
            argv(&["cmood", "tui", "--from", "1950"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["cmood", "summary"])), argv(&["cmood", "summary"]));
        assert_eq!(rewrite_args(argv(&["cmood", "--help"])), argv(&["cmood", "--help"]));
    }

    #[test]
    fn args_map_to_config() {
        let cli = Cli::try_parse_from([
            "cmood", "summary", "-f", "data.csv", "--compare", "1950", "2024", "--no-plot", "--mood",
            "Hot",
        ])
        .unwrap();
        let Command::Summary(args) = cli.command else {
            panic!("expected summary");
        };
        let config = dashboard_config_from_args(&args).unwrap();
        assert_eq!(config.source, DataSource::File("data.csv".into()));
        assert_eq!(config.compare, Some((1950, 2024)));
        assert!(!config.plot);
        assert_eq!(config.moods, ["Hot"]);
    }

    #[test]
    fn plot_is_on_unless_disabled() {
        let cli = Cli::try_parse_from(["cmood", "summary"]).unwrap();
        let Command::Summary(args) = cli.command else {
            panic!("expected summary");
        };
        assert!(dashboard_config_from_args(&args).unwrap().plot);
        assert!(Cli::try_parse_from(["cmood", "summary", "--plot"]).is_err());
    }

    #[test]
    fn unknown_mood_flag_is_rejected() {
        let cli = Cli::try_parse_from(["cmood", "moods", "--mood", "balmy"]).unwrap();
        let Command::Moods(args) = cli.command else {
            panic!("expected moods");
        };
        let err = dashboard_config_from_args(&args).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
