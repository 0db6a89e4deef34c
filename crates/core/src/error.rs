//! Error types for AODMAP

use thiserror::Error;

/// Main error type for AODMAP operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "Invalid region: lat [{min_lat}, {max_lat}], lon [{min_lon}, {max_lon}] \
         (minimums must be finite and strictly below maximums)"
    )]
    InvalidRegion {
        min_lat: f64,
        max_lat: f64,
        min_lon: f64,
        max_lon: f64,
    },

    #[error("Invalid resolution: {0} (must be at least 1)")]
    InvalidResolution(usize),

    #[error("Index out of bounds: ({row}, {col}) in grid of size ({rows}, {cols})")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Unrecognised input format: {0}")]
    Format(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for AODMAP operations
pub type Result<T> = std::result::Result<T, Error>;
