//! Error types for square generation, scheduling and export.
//!
//! Construction errors are raised eagerly: a scheduler is either built with
//! its full episode sequence or not at all. Export errors only surface when an
//! export is requested.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Top-level error type for latin-schedule.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid square dimension: k = {k} (must be at least 1)")]
    InvalidDimension { k: usize },

    #[error("Length mismatch: {field} has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Optional dependency unavailable: rebuild with the `{feature}` feature")]
    MissingOptionalDependency { feature: &'static str },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[cfg(feature = "dataframe")]
    #[error("DataFrame error: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),

    #[error("Plan config error in {path}: {message}")]
    Config { path: PathBuf, message: String },
}
