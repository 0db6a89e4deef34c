//! # AODMAP Algorithms
//!
//! Scatter-to-grid algorithms for AODMAP.
//!
//! ## Available Algorithm Categories
//!
//! - **interpolation**: IDW with cutoff radius, brute-force or k-d tree search

pub(crate) mod maybe_rayon;

pub mod interpolation;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::interpolation::{
        idw, interpolate, Idw, IdwParams, IdwResult, SampleSummary, SearchStrategy,
    };
    pub use aodmap_core::prelude::*;
}
