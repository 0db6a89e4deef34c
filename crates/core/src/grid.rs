//! Node-registered lat/lon lattice with optional values

use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};
use crate::region::RegionBounds;

/// A square lattice of `(resolution + 1) × (resolution + 1)` nodes spanning
/// a region, edges included.
///
/// Row `i` sits at latitude `lats()[i]` and column `j` at longitude
/// `lons()[j]`, both ascending. A node holds `None` when no sample
/// contributed to it.
///
/// # Example
///
/// ```ignore
/// use aodmap_core::{Grid, RegionBounds};
///
/// let bounds = RegionBounds::new(0.0, 1.0, 0.0, 1.0)?;
/// let grid = Grid::new(bounds, 4)?;
/// assert_eq!(grid.shape(), (5, 5));
/// assert_eq!(grid.lats()[4], 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    bounds: RegionBounds,
    resolution: usize,
    lats: Vec<f64>,
    lons: Vec<f64>,
    data: Array2<Option<f64>>,
}

impl Grid {
    /// Create an empty grid where every node is "no data".
    pub fn new(bounds: RegionBounds, resolution: usize) -> Result<Self> {
        bounds.validate()?;
        if resolution < 1 {
            return Err(Error::InvalidResolution(resolution));
        }

        let n = resolution + 1;
        Ok(Self {
            bounds,
            resolution,
            lats: lattice(bounds.min_lat, bounds.max_lat, resolution),
            lons: lattice(bounds.min_lon, bounds.max_lon, resolution),
            data: Array2::from_elem((n, n), None),
        })
    }

    /// Create a grid from row-major node values.
    pub fn from_vec(bounds: RegionBounds, resolution: usize, values: Vec<Option<f64>>) -> Result<Self> {
        Self::new(bounds, resolution)?.with_values(values)
    }

    /// Replace every node value, keeping the lattice. `values` is row-major.
    pub fn with_values(mut self, values: Vec<Option<f64>>) -> Result<Self> {
        let n = self.resolution + 1;
        if values.len() != n * n {
            return Err(Error::Other(format!(
                "expected {} node values for resolution {}, got {}",
                n * n,
                self.resolution,
                values.len()
            )));
        }
        self.data = Array2::from_shape_vec((n, n), values).map_err(|e| Error::Other(e.to_string()))?;
        Ok(self)
    }

    // Dimensions

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bounds(&self) -> &RegionBounds {
        &self.bounds
    }

    // Coordinates

    /// Node latitudes, ascending (one per row)
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    /// Node longitudes, ascending (one per column)
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// (lat, lon) of the node at (row, col)
    pub fn node_coords(&self, row: usize, col: usize) -> Result<(f64, f64)> {
        self.check_index(row, col)?;
        Ok((self.lats[row], self.lons[col]))
    }

    /// Latitude step between adjacent rows
    pub fn lat_step(&self) -> f64 {
        self.bounds.lat_span() / self.resolution as f64
    }

    /// Longitude step between adjacent columns
    pub fn lon_step(&self) -> f64 {
        self.bounds.lon_span() / self.resolution as f64
    }

    // Data access

    /// Value at (row, col); `Ok(None)` means "no data"
    pub fn get(&self, row: usize, col: usize) -> Result<Option<f64>> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    pub fn set(&mut self, row: usize, col: usize, value: Option<f64>) -> Result<()> {
        self.check_index(row, col)?;
        self.data[(row, col)] = value;
        Ok(())
    }

    pub fn view(&self) -> ArrayView2<'_, Option<f64>> {
        self.data.view()
    }

    pub fn data(&self) -> &Array2<Option<f64>> {
        &self.data
    }

    /// Values as nested rows, south to north
    pub fn to_rows(&self) -> Vec<Vec<Option<f64>>> {
        self.data.rows().into_iter().map(|r| r.to_vec()).collect()
    }

    /// Whether every node is "no data"
    pub fn is_all_nodata(&self) -> bool {
        self.data.iter().all(Option::is_none)
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        Ok(())
    }

    // Statistics

    /// Basic statistics over nodes that carry a value
    pub fn statistics(&self) -> GridStatistics {
        let mut min: Option<f64> = None;
        let mut max: Option<f64> = None;
        let mut sum = 0.0;
        let mut count = 0usize;

        for v in self.data.iter().flatten() {
            min = Some(min.map_or(*v, |m| m.min(*v)));
            max = Some(max.map_or(*v, |m| m.max(*v)));
            sum += v;
            count += 1;
        }

        GridStatistics {
            min,
            max,
            mean: (count > 0).then(|| sum / count as f64),
            valid_count: count,
            nodata_count: self.len() - count,
        }
    }
}

/// Basic statistics for a grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridStatistics {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub valid_count: usize,
    pub nodata_count: usize,
}

/// `min + i * (max - min) / resolution` for `i` in `0..=resolution`.
fn lattice(min: f64, max: f64, resolution: usize) -> Vec<f64> {
    let step = (max - min) / resolution as f64;
    (0..=resolution).map(|i| min + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit() -> RegionBounds {
        RegionBounds::new(0.0, 1.0, 0.0, 1.0).unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(unit(), 4).unwrap();
        assert_eq!(grid.shape(), (5, 5));
        assert_eq!(grid.len(), 25);
        assert!(grid.is_all_nodata());
    }

    #[test]
    fn test_lattice_spans_edges() {
        let grid = Grid::new(RegionBounds::TEXAS, 100).unwrap();
        assert_eq!(grid.lats().len(), 101);
        assert_eq!(grid.lats()[0], 25.8);
        assert_relative_eq!(grid.lats()[100], 36.5, epsilon = 1e-9);
        assert_relative_eq!(grid.lons()[100], -93.5, epsilon = 1e-9);
        assert_relative_eq!(grid.lons()[50], -100.05, epsilon = 1e-9);
        assert_relative_eq!(grid.lat_step(), 0.107, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(Grid::new(unit(), 0), Err(Error::InvalidResolution(0))));
        let bad = RegionBounds {
            min_lat: 1.0,
            max_lat: 1.0,
            min_lon: 0.0,
            max_lon: 1.0,
        };
        assert!(matches!(Grid::new(bad, 1), Err(Error::InvalidRegion { .. })));
    }

    #[test]
    fn test_access() {
        let mut grid = Grid::new(unit(), 1).unwrap();
        grid.set(1, 0, Some(42.0)).unwrap();
        assert_eq!(grid.get(1, 0).unwrap(), Some(42.0));
        assert_eq!(grid.get(0, 0).unwrap(), None);
        assert!(grid.get(2, 0).is_err());
        assert!(grid.set(0, 2, None).is_err());
        assert_eq!(grid.node_coords(1, 0).unwrap(), (1.0, 0.0));
    }

    #[test]
    fn test_from_vec() {
        let grid = Grid::from_vec(unit(), 1, vec![Some(1.0), None, Some(3.0), Some(4.0)]).unwrap();
        assert_eq!(grid.to_rows(), vec![vec![Some(1.0), None], vec![Some(3.0), Some(4.0)]]);
        assert!(Grid::from_vec(unit(), 1, vec![None; 3]).is_err());
    }

    #[test]
    fn test_with_values_keeps_lattice() {
        let grid = Grid::new(unit(), 2).unwrap();
        let lats = grid.lats().to_vec();
        let filled = grid.with_values(vec![Some(0.5); 9]).unwrap();
        assert_eq!(filled.lats(), lats.as_slice());
        assert_eq!(filled.get(2, 2).unwrap(), Some(0.5));
        assert!(!filled.is_all_nodata());

        let grid = Grid::new(unit(), 2).unwrap();
        assert!(grid.with_values(vec![None; 4]).is_err());
    }

    #[test]
    fn test_statistics() {
        let grid = Grid::from_vec(unit(), 1, vec![Some(1.0), None, Some(3.0), Some(8.0)]).unwrap();
        let stats = grid.statistics();
        assert_eq!(stats.min, Some(1.0));
        assert_eq!(stats.max, Some(8.0));
        assert_relative_eq!(stats.mean.unwrap(), 4.0, epsilon = 1e-12);
        assert_eq!(stats.valid_count, 3);
        assert_eq!(stats.nodata_count, 1);

        let empty = Grid::new(unit(), 2).unwrap().statistics();
        assert_eq!(empty.mean, None);
        assert_eq!(empty.nodata_count, 9);
    }
}
