//! `climate-mood` library crate.
//!
//! The binary (`cmood`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the mood scale and chart preparation are reusable by other front-ends

pub mod analysis;
pub mod app;
pub mod chart;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod mood;
pub mod plot;
pub mod report;
pub mod tui;
