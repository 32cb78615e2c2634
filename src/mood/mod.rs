//! Anomaly → mood classification.
//!
//! Scales are plain, sorted tables of `MoodBand`s so the mapping stays
//! declarative: adding a mood is adding a row, not another branch.

pub mod scale;

pub use scale::*;
