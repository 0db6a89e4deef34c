//! 2D k-d tree over samples in (latitude, longitude) degree space
//!
//! Used to answer fixed-radius queries for IDW without scanning every
//! sample for every grid node. Distances are the same planar degree
//! distances as [`Sample::dist`], so results match a brute-force scan.
//!
//! Reference:
//! Bentley, J.L. (1975). Multidimensional binary search trees used
//! for associative searching. CACM, 18(9).

use aodmap_core::Sample;

/// Relative slack applied before pruning a subtree, so that rounding in
/// the split-plane distance never drops a sample the exact check would keep.
const PRUNE_SLACK: f64 = 1e-9;

/// A 2D k-d tree for fixed-radius queries on samples.
#[derive(Debug)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    /// Samples stored in tree order
    samples: Vec<Sample>,
}

#[derive(Debug)]
struct KdNode {
    /// Index into `samples`
    sample_idx: usize,
    axis: Axis,
    left: Option<usize>,
    right: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn of(self, s: &Sample) -> f64 {
        match self {
            Axis::Latitude => s.latitude,
            Axis::Longitude => s.longitude,
        }
    }

    fn next(self) -> Self {
        match self {
            Axis::Latitude => Axis::Longitude,
            Axis::Longitude => Axis::Latitude,
        }
    }
}

impl KdTree {
    /// Build a tree from samples. Construction is O(n log² n).
    pub fn build(samples: Vec<Sample>) -> Self {
        let mut nodes = Vec::with_capacity(samples.len());
        if !samples.is_empty() {
            let mut indices: Vec<usize> = (0..samples.len()).collect();
            build_recursive(&samples, &mut indices, Axis::Latitude, &mut nodes);
        }
        Self { nodes, samples }
    }

    /// Number of samples in the tree.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Call `visit(sample, distance)` for every sample strictly closer than
    /// `radius` to (lat, lon). Visit order follows the tree, not the input.
    pub fn for_each_within<F>(&self, lat: f64, lon: f64, radius: f64, mut visit: F)
    where
        F: FnMut(&Sample, f64),
    {
        if self.nodes.is_empty() || !(radius > 0.0) {
            return;
        }
        let prune_sq = radius * radius * (1.0 + PRUNE_SLACK);
        self.visit_recursive(0, lat, lon, radius, prune_sq, &mut visit);
    }

    /// Collect `(sample, distance)` pairs strictly within `radius`.
    pub fn within_radius(&self, lat: f64, lon: f64, radius: f64) -> Vec<(Sample, f64)> {
        let mut found = Vec::new();
        self.for_each_within(lat, lon, radius, |s, d| found.push((*s, d)));
        found
    }

    fn visit_recursive<F>(
        &self,
        node_idx: usize,
        lat: f64,
        lon: f64,
        radius: f64,
        prune_sq: f64,
        visit: &mut F,
    ) where
        F: FnMut(&Sample, f64),
    {
        let node = &self.nodes[node_idx];
        let sample = &self.samples[node.sample_idx];

        let d = sample.dist(lat, lon);
        if d < radius {
            visit(sample, d);
        }

        let query = match node.axis {
            Axis::Latitude => lat,
            Axis::Longitude => lon,
        };
        let diff = query - node.axis.of(sample);
        let plane_reachable = diff * diff <= prune_sq;

        // Left holds coordinates <= split, right holds >= split.
        if let Some(left) = node.left {
            if diff <= 0.0 || plane_reachable {
                self.visit_recursive(left, lat, lon, radius, prune_sq, visit);
            }
        }
        if let Some(right) = node.right {
            if diff >= 0.0 || plane_reachable {
                self.visit_recursive(right, lat, lon, radius, prune_sq, visit);
            }
        }
    }
}

/// Median split on alternating axes; returns the index of the created node.
fn build_recursive(samples: &[Sample], indices: &mut [usize], axis: Axis, nodes: &mut Vec<KdNode>) -> usize {
    indices.sort_by(|&a, &b| axis.of(&samples[a]).total_cmp(&axis.of(&samples[b])));

    let median = indices.len() / 2;
    let node_idx = nodes.len();
    nodes.push(KdNode {
        sample_idx: indices[median],
        axis,
        left: None,
        right: None,
    });

    let (lower, rest) = indices.split_at_mut(median);
    let upper = &mut rest[1..];

    if !lower.is_empty() {
        let child = build_recursive(samples, lower, axis.next(), nodes);
        nodes[node_idx].left = Some(child);
    }
    if !upper.is_empty() {
        let child = build_recursive(samples, upper, axis.next(), nodes);
        nodes[node_idx].right = Some(child);
    }

    node_idx
}
