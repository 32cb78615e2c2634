//! Anomaly data sources.
//!
//! - `gistemp`: the NASA GISTEMP table over HTTP
//! - local files go through `io::ingest`

pub mod gistemp;

pub use gistemp::{DEFAULT_GISTEMP_URL, GistempClient};

use crate::domain::DataSource;
use crate::error::AppError;
use crate::io::ingest::{IngestedData, load_samples};

/// Load the configured data source.
pub fn load(source: &DataSource) -> Result<IngestedData, AppError> {
    match source {
        DataSource::Remote => GistempClient::from_env()?.fetch(),
        DataSource::File(path) => load_samples(path),
    }
}
