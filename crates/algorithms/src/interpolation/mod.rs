//! Spatial interpolation of scattered samples onto a lat/lon grid
//!
//! - IDW: inverse distance weighting with a hard cutoff radius
//! - k-d tree: fixed-radius neighbour search backing the IDW fast path

mod idw;
pub mod kdtree;

pub use idw::{filter_samples, idw, interpolate, Idw, IdwParams, IdwResult, SampleSummary, SearchStrategy};
pub use kdtree::KdTree;
