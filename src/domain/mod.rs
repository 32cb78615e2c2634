//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - monthly anomaly observations (`AnomalySample`)
//! - mood band descriptors and classified results (`MoodBand`, `MoodResult`)
//! - the dashboard run configuration (`DashboardConfig`, `DataSource`)
//! - the portable chart file schema (`ChartFile`)

pub mod types;

pub use types::*;
