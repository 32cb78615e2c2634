//! Reporting utilities: formatted terminal output and markdown snapshots.
//!
//! We keep formatting code in one place so:
//! - the classification/analytics code stays clean and testable
//! - output changes are localized (important for snapshot tests)

pub mod format;
pub mod markdown;

pub use format::*;
pub use markdown::write_markdown_report;
