//! Ordered mood band tables and the classifier.
//!
//! A scale covers the whole real line:
//!
//! - the first band starts at `-inf`, the last band ends at `+inf`
//! - adjacent bands share a boundary (`band[i].upper == band[i+1].lower`)
//! - bounds are lower-inclusive, so a boundary value belongs to the higher band
//!
//! Lookup is a binary search on the lower bounds.

use crate::domain::MoodBand;
use crate::error::AppError;

/// The Earth mood scale (°C anomaly vs the 1951–1980 baseline).
pub static EARTH_BANDS: [MoodBand; 4] = [
    MoodBand {
        lower: f64::NEG_INFINITY,
        upper: 0.0,
        emoji: "❄️",
        label: "Cold",
        color: [0x44, 0x88, 0xFF],
        glyph: 'c',
    },
    MoodBand {
        lower: 0.0,
        upper: 0.5,
        emoji: "🙂",
        label: "Stable",
        color: [0x44, 0xAA, 0x44],
        glyph: 's',
    },
    MoodBand {
        lower: 0.5,
        upper: 1.5,
        emoji: "🌱",
        label: "Warm",
        color: [0xFF, 0x88, 0x00],
        glyph: 'w',
    },
    MoodBand {
        lower: 1.5,
        upper: f64::INFINITY,
        emoji: "🔥",
        label: "Hot",
        color: [0xFF, 0x44, 0x44],
        glyph: 'h',
    },
];

/// A validated, ordered band table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodScale<'a> {
    bands: &'a [MoodBand],
}

impl MoodScale<'static> {
    /// The process-wide default scale.
    pub fn earth() -> Self {
        Self { bands: &EARTH_BANDS }
    }
}

impl<'a> MoodScale<'a> {
    /// Validate a band table.
    ///
    /// Rejects empty tables, NaN bounds, empty/inverted bands, gaps, overlaps,
    /// and tables that do not span `-inf..+inf`.
    pub fn new(bands: &'a [MoodBand]) -> Result<Self, AppError> {
        let (Some(first), Some(last)) = (bands.first(), bands.last()) else {
            return Err(AppError::invalid_input("Mood scale must contain at least one band."));
        };

        if first.lower != f64::NEG_INFINITY {
            return Err(AppError::invalid_input(format!(
                "First mood band `{}` must start at -inf (got {}).",
                first.label, first.lower
            )));
        }
        if last.upper != f64::INFINITY {
            return Err(AppError::invalid_input(format!(
                "Last mood band `{}` must end at +inf (got {}).",
                last.label, last.upper
            )));
        }

        for band in bands {
            if band.lower.is_nan() || band.upper.is_nan() || band.lower >= band.upper {
                return Err(AppError::invalid_input(format!(
                    "Mood band `{}` has an empty or invalid range [{}, {}).",
                    band.label, band.lower, band.upper
                )));
            }
        }

        for pair in bands.windows(2) {
            if pair[0].upper != pair[1].lower {
                return Err(AppError::invalid_input(format!(
                    "Mood bands `{}` and `{}` are not contiguous ({} vs {}).",
                    pair[0].label, pair[1].label, pair[0].upper, pair[1].lower
                )));
            }
        }

        Ok(Self { bands })
    }

    pub fn bands(&self) -> &'a [MoodBand] {
        self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Map an anomaly to exactly one band.
    ///
    /// `-inf` maps to the first band and `+inf` to the last; NaN is rejected.
    pub fn classify(&self, value: f64) -> Result<&'a MoodBand, AppError> {
        if value.is_nan() {
            return Err(AppError::invalid_input("Cannot classify a NaN anomaly value."));
        }
        // The first lower bound is -inf, so at least one band satisfies this.
        let idx = self.bands.partition_point(|band| band.lower <= value);
        self.bands
            .get(idx.saturating_sub(1))
            .ok_or_else(|| AppError::invalid_input("Mood scale has no bands."))
    }

    /// Look up a band by label (case-insensitive).
    pub fn find(&self, label: &str) -> Option<&'a MoodBand> {
        let label = label.trim();
        self.bands.iter().find(|b| b.label.eq_ignore_ascii_case(label))
    }
}

/// Classify on the Earth scale.
pub fn classify(value: f64) -> Result<MoodBand, AppError> {
    MoodScale::earth().classify(value).copied()
}
