//! # AODMAP Core
//!
//! Core types, traits and I/O for turning scattered air-quality readings
//! into a regular lat/lon grid.
//!
//! This crate provides:
//! - `Sample` / `GeoSample`: geolocated scalar readings from any source
//! - `RegionBounds`: the fixed lat/lon window a grid is built over
//! - `Grid`: node-registered lattice with explicit "no data" nodes
//! - Algorithm traits for consistent API
//! - I/O for JSON point files, JSON plot payloads and GeoTIFF

pub mod error;
pub mod grid;
pub mod io;
pub mod region;
pub mod sample;

pub use error::{Error, Result};
pub use grid::{Grid, GridStatistics};
pub use region::RegionBounds;
pub use sample::{GeoSample, RawSample, Sample};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::grid::Grid;
    pub use crate::region::RegionBounds;
    pub use crate::sample::{GeoSample, RawSample, Sample};
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in AODMAP.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(&self, input: Self::Input, params: Self::Params) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
