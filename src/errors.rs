//! Error taxonomy for the load/filter/aggregate pipeline.
//!
//! Load and parse failures are fatal and abort the whole computation.
//! [`StatsError::EmptyResult`] is a reportable condition the caller is
//! expected to surface and recover from.

use std::path::PathBuf;
use thiserror::Error;

/// A trip source could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open trip source {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read record {row}")]
    Read {
        row: usize,
        #[source]
        source: csv::Error,
    },

    /// The source is readable but lacks a column the pipeline requires.
    #[error("trip source is missing required column {0:?}")]
    MissingColumn(&'static str),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A required field in an individual record is malformed.
///
/// There is no per-record skip policy: sources are assumed uniformly
/// well-formed, so one bad record fails the load.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed timestamp {value:?} in column {column:?} at record {row}")]
    Timestamp {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("malformed number {value:?} in column {column:?} at record {row}")]
    Number {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Aggregation was requested for a statistic that is undefined on the input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    /// The filtered set is empty, so a mode or mean has no defined value.
    #[error("no trips matched the selected filters")]
    EmptyResult,
}
