//! Terminal plots.

pub mod ascii;

pub use ascii::{render_ascii_plot, render_ascii_plot_from_chart_file};
