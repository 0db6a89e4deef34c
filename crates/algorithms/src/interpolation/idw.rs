//! Inverse Distance Weighting (IDW) with a hard cutoff radius
//!
//! Estimates each grid node as a weighted average of the samples lying
//! strictly within `influence_radius` of it:
//!
//! ```text
//! z(node) = Σ(wi * zi) / Σ(wi)
//! where wi = 1 / (di + epsilon), di < influence_radius
//! ```
//!
//! `di` is the planar distance on raw degree differences. No great-circle
//! or cos(latitude) correction is applied; contour output depends on it.
//! Nodes with no sample within the radius are "no data", never zero.
//!
//! Reference:
//! Shepard, D. (1968). A two-dimensional interpolation function for
//! irregularly-spaced data. ACM National Conference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use aodmap_core::{Algorithm, Error, GeoSample, Grid, RegionBounds, Result, Sample};

use super::kdtree::KdTree;
use crate::maybe_rayon::*;

/// How candidate samples are found for each node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    /// Scan every sample for every node: O(nodes × samples).
    BruteForce,
    /// Fixed-radius queries against a k-d tree built once per call.
    #[default]
    KdTree,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BruteForce => write!(f, "brute-force"),
            Self::KdTree => write!(f, "kd-tree"),
        }
    }
}

impl FromStr for SearchStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "brute" | "brute-force" | "bruteforce" => Ok(Self::BruteForce),
            "kdtree" | "kd-tree" | "tree" => Ok(Self::KdTree),
            _ => Err(Error::InvalidParameter {
                name: "strategy",
                value: s.to_string(),
                reason: "use brute or kdtree".into(),
            }),
        }
    }
}

/// Parameters for IDW interpolation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IdwParams {
    /// Region the grid spans (default: Texas)
    pub bounds: RegionBounds,
    /// Subdivisions per axis; the grid has `resolution + 1` nodes per side.
    pub resolution: usize,
    /// Samples at or beyond this distance (degrees) do not contribute.
    pub influence_radius: f64,
    /// Added to distance in the weight denominator so a coincident
    /// sample gets weight `1 / epsilon` instead of dividing by zero.
    pub epsilon: f64,
    pub strategy: SearchStrategy,
}

impl Default for IdwParams {
    fn default() -> Self {
        Self {
            bounds: RegionBounds::TEXAS,
            resolution: 100,
            influence_radius: 0.5,
            epsilon: 0.01,
            strategy: SearchStrategy::default(),
        }
    }
}

impl IdwParams {
    /// Check every parameter before any work is done.
    pub fn validate(&self) -> Result<()> {
        self.bounds.validate()?;
        if self.resolution < 1 {
            return Err(Error::InvalidResolution(self.resolution));
        }
        if !(self.influence_radius.is_finite() && self.influence_radius > 0.0) {
            return Err(Error::InvalidParameter {
                name: "influence_radius",
                value: self.influence_radius.to_string(),
                reason: "must be finite and positive".into(),
            });
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                value: self.epsilon.to_string(),
                reason: "must be finite and positive".into(),
            });
        }
        // Largest possible weight is 1 / epsilon
        if !(1.0 / self.epsilon).is_finite() {
            return Err(Error::InvalidParameter {
                name: "epsilon",
                value: self.epsilon.to_string(),
                reason: "too small: 1 / epsilon overflows".into(),
            });
        }
        Ok(())
    }
}

/// What happened to the input records during one interpolation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSummary {
    /// Records supplied
    pub total: usize,
    /// Records with a missing or non-finite latitude, longitude or value
    pub malformed: usize,
    /// Well-formed records outside the region bounds
    pub outside_region: usize,
    /// Records that took part in interpolation
    pub used: usize,
}

/// Output of [`idw`]
#[derive(Debug, Clone)]
pub struct IdwResult {
    pub grid: Grid,
    pub summary: SampleSummary,
}

/// Drop malformed records and records outside `bounds` (edges included).
pub fn filter_samples<S: GeoSample>(samples: &[S], bounds: &RegionBounds) -> (Vec<Sample>, SampleSummary) {
    let mut summary = SampleSummary {
        total: samples.len(),
        ..Default::default()
    };

    let kept: Vec<Sample> = samples
        .iter()
        .filter_map(|record| match record.to_sample() {
            None => {
                summary.malformed += 1;
                None
            }
            Some(s) if !bounds.contains(s.latitude, s.longitude) => {
                summary.outside_region += 1;
                None
            }
            Some(s) => Some(s),
        })
        .collect();

    summary.used = kept.len();
    (kept, summary)
}

/// Perform IDW interpolation from scattered samples onto a lat/lon lattice.
///
/// # Arguments
/// * `samples` - Any records exposing latitude, longitude and value
/// * `params` - Region, resolution, radius, epsilon and search strategy
///
/// # Returns
/// A grid of `(resolution + 1)²` nodes plus a summary of the input.
/// An empty effective sample set yields an all-"no data" grid, not an error.
///
/// # Errors
/// `InvalidRegion`, `InvalidResolution` or `InvalidParameter` when the
/// configuration is unusable.
pub fn idw<S: GeoSample>(samples: &[S], params: IdwParams) -> Result<IdwResult> {
    params.validate()?;

    let grid = Grid::new(params.bounds, params.resolution)?;
    let (kept, summary) = filter_samples(samples, &params.bounds);

    if kept.is_empty() {
        return Ok(IdwResult { grid, summary });
    }

    let search = match params.strategy {
        SearchStrategy::BruteForce => Search::Scan(&kept),
        SearchStrategy::KdTree => Search::Tree(KdTree::build(kept.clone())),
    };

    let radius = params.influence_radius;
    let epsilon = params.epsilon;

    let data: Vec<Option<f64>> = {
        let (lats, lons) = (grid.lats(), grid.lons());
        (0..lats.len())
            .into_par_iter()
            .flat_map(|row| {
                let lat = lats[row];
                lons.iter()
                    .map(|&lon| search.estimate(lat, lon, radius, epsilon))
                    .collect::<Vec<_>>()
            })
            .collect()
    };

    let grid = grid.with_values(data)?;
    Ok(IdwResult { grid, summary })
}

/// Interpolate with explicit arguments, returning only the grid.
pub fn interpolate<S: GeoSample>(
    samples: &[S],
    bounds: RegionBounds,
    resolution: usize,
    influence_radius: f64,
    epsilon: f64,
) -> Result<Grid> {
    let params = IdwParams {
        bounds,
        resolution,
        influence_radius,
        epsilon,
        ..Default::default()
    };
    Ok(idw(samples, params)?.grid)
}

enum Search<'a> {
    Scan(&'a [Sample]),
    Tree(KdTree),
}

impl Search<'_> {
    fn estimate(&self, lat: f64, lon: f64, radius: f64, epsilon: f64) -> Option<f64> {
        let mut acc = WeightedMean::default();
        match self {
            Search::Scan(samples) => {
                for s in samples.iter() {
                    let d = s.dist(lat, lon);
                    if d < radius {
                        acc.add(d, s.value, epsilon);
                    }
                }
            }
            Search::Tree(tree) => {
                tree.for_each_within(lat, lon, radius, |s, d| acc.add(d, s.value, epsilon));
            }
        }
        acc.finish()
    }
}

/// Running weighted mean.
///
/// Weights are kept relative to the largest one seen and the mean is
/// updated as a convex combination, so neither the weight sum nor the
/// weighted value sum can overflow for finite inputs.
#[derive(Default)]
struct WeightedMean {
    /// Largest weight seen so far
    scale: f64,
    /// Sum of `w / scale`
    sum_rel: f64,
    mean: f64,
    count: usize,
}

impl WeightedMean {
    #[inline]
    fn add(&mut self, distance: f64, value: f64, epsilon: f64) {
        let w = 1.0 / (distance + epsilon);
        if w > self.scale {
            self.sum_rel *= self.scale / w;
            self.scale = w;
        }
        let rel = w / self.scale;
        self.sum_rel += rel;

        let r = rel / self.sum_rel;
        self.mean = self.mean * (1.0 - r) + value * r;
        self.count += 1;
    }

    fn finish(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }
}

/// IDW as an [`Algorithm`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Idw;

impl Algorithm for Idw {
    type Input = Vec<Sample>;
    type Output = IdwResult;
    type Params = IdwParams;
    type Error = Error;

    fn name(&self) -> &'static str {
        "IDW"
    }

    fn description(&self) -> &'static str {
        "Inverse distance weighted scatter-to-grid interpolation with a cutoff radius"
    }

    fn execute(&self, input: Self::Input, params: Self::Params) -> Result<Self::Output> {
        idw(&input, params)
    }
}
