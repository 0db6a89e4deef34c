//! Grid-to-RGBA rendering using color schemes.

use crate::levels::ContourLevels;
use crate::scheme::{evaluate, ColorScheme, Rgb};
use aodmap_core::Grid;

/// Parameters for colormap rendering.
#[derive(Debug, Clone)]
pub struct ColormapParams {
    /// Color scheme to use.
    pub scheme: ColorScheme,
    /// Value mapped to the start of the scheme. Values below are clamped.
    pub min: f64,
    /// Value mapped to the end of the scheme. Values above are clamped.
    pub max: f64,
    /// Color for "no data" nodes (RGBA). Default: fully transparent.
    pub nodata_color: [u8; 4],
    /// Quantize values to contour bands before coloring.
    pub levels: Option<ContourLevels>,
}

impl ColormapParams {
    /// Create params with the AOD display range `[0, 0.5]`.
    pub fn new(scheme: ColorScheme) -> Self {
        Self::with_range(scheme, 0.0, 0.5)
    }

    /// Create params with explicit min/max range.
    pub fn with_range(scheme: ColorScheme, min: f64, max: f64) -> Self {
        Self {
            scheme,
            min,
            max,
            nodata_color: [0, 0, 0, 0],
            levels: None,
        }
    }

    pub fn with_levels(mut self, levels: ContourLevels) -> Self {
        self.levels = Some(levels);
        self
    }
}

impl Default for ColormapParams {
    fn default() -> Self {
        Self::new(ColorScheme::Aod)
    }
}

/// Auto-detect min/max from the nodes that carry a value.
pub fn auto_params(grid: &Grid, scheme: ColorScheme) -> ColormapParams {
    let stats = grid.statistics();
    let (min, max) = match (stats.min, stats.max) {
        (Some(min), Some(max)) if (max - min).abs() < f64::EPSILON => (min, min + 1.0),
        (Some(min), Some(max)) => (min, max),
        // All "no data"
        _ => (0.0, 1.0),
    };
    ColormapParams::with_range(scheme, min, max)
}

/// Convert a grid to an RGBA pixel buffer, one pixel per node.
///
/// Returns `rows * cols * 4` bytes, north-up: the first pixel row is the
/// grid's last (northernmost) row. "No data" nodes use `params.nodata_color`.
pub fn grid_to_rgba(grid: &Grid, params: &ColormapParams) -> Vec<u8> {
    let range = params.max - params.min;
    let inv_range = if range.abs() > f64::EPSILON {
        1.0 / range
    } else {
        1.0
    };

    let mut rgba = Vec::with_capacity(grid.len() * 4);

    for row in grid.data().rows().into_iter().rev() {
        for node in row.iter() {
            match node {
                Some(v) => {
                    let v = match params.levels {
                        Some(levels) => levels.quantize(*v),
                        None => *v,
                    };
                    let Rgb { r, g, b } = evaluate(params.scheme, (v - params.min) * inv_range);
                    rgba.extend_from_slice(&[r, g, b, 255]);
                }
                None => rgba.extend_from_slice(&params.nodata_color),
            }
        }
    }

    rgba
}

#[cfg(test)]
mod tests {
    use super::*;
    use aodmap_core::RegionBounds;

    fn grid(values: Vec<Option<f64>>) -> Grid {
        let bounds = RegionBounds::new(0.0, 1.0, 0.0, 1.0).unwrap();
        Grid::from_vec(bounds, 1, values).unwrap()
    }

    #[test]
    fn grid_to_rgba_basic() {
        // Southern row: 0.0, 0.5; northern row: 1.0, no data
        let g = grid(vec![Some(0.0), Some(0.5), Some(1.0), None]);
        let params = ColormapParams::with_range(ColorScheme::Grayscale, 0.0, 1.0);
        let rgba = grid_to_rgba(&g, &params);

        assert_eq!(rgba.len(), 16);
        // North row first: 1.0 -> white, then transparent
        assert_eq!(&rgba[0..4], &[255, 255, 255, 255]);
        assert_eq!(&rgba[4..8], &[0, 0, 0, 0]);
        // South row: black, gray
        assert_eq!(&rgba[8..12], &[0, 0, 0, 255]);
        assert_eq!(&rgba[12..16], &[128, 128, 128, 255]);
    }

    #[test]
    fn aod_defaults() {
        let g = grid(vec![Some(0.0), Some(0.1), Some(0.5), Some(0.9)]);
        let rgba = grid_to_rgba(&g, &ColormapParams::default());
        // North row: 0.5 -> red, 0.9 clamps to red
        assert_eq!(&rgba[0..4], &[255, 0, 0, 255]);
        assert_eq!(&rgba[4..8], &[255, 0, 0, 255]);
        // South row: 0.0 -> blue, 0.1 -> cyan
        assert_eq!(&rgba[8..12], &[0, 0, 255, 255]);
        assert_eq!(&rgba[12..16], &[0, 255, 255, 255]);
    }

    #[test]
    fn contour_bands_flatten_values() {
        let g = grid(vec![Some(0.101), Some(0.119), Some(0.121), None]);
        let params = ColormapParams::default().with_levels(ContourLevels::default());
        let rgba = grid_to_rgba(&g, &params);
        // 0.101 and 0.119 share the [0.10, 0.12) band
        assert_eq!(&rgba[8..12], &rgba[12..16]);
        assert_ne!(&rgba[0..4], &rgba[8..12]);
    }

    #[test]
    fn custom_nodata_color() {
        let g = grid(vec![None; 4]);
        let mut params = ColormapParams::default();
        params.nodata_color = [200, 200, 200, 255];
        let rgba = grid_to_rgba(&g, &params);
        assert!(rgba.chunks(4).all(|px| px == [200, 200, 200, 255]));
    }

    #[test]
    fn auto_params_range() {
        let g = grid(vec![Some(0.05), None, Some(0.3), Some(0.2)]);
        let params = auto_params(&g, ColorScheme::Aod);
        assert!((params.min - 0.05).abs() < f64::EPSILON);
        assert!((params.max - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn auto_params_all_nodata() {
        let params = auto_params(&grid(vec![None; 4]), ColorScheme::Aod);
        assert_eq!((params.min, params.max), (0.0, 1.0));
    }

    #[test]
    fn auto_params_constant_grid() {
        let params = auto_params(&grid(vec![Some(0.2); 4]), ColorScheme::Aod);
        assert!((params.min - 0.2).abs() < f64::EPSILON);
        assert!((params.max - 1.2).abs() < f64::EPSILON);
    }
}
