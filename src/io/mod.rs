//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - mood results export (CSV) (`export`)
//! - chart JSON read/write (`chart_file`)

pub mod chart_file;
pub mod export;
pub mod ingest;

pub use chart_file::*;
pub use export::*;
pub use ingest::*;
