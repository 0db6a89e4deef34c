//! JSON plot payload for contour rendering

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::grid::Grid;

/// Grid coordinates and values in the shape a contour plot expects:
/// `x = lons`, `y = lats`, `z = values[row][col]`, `null` for no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridExport {
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    pub values: Vec<Vec<Option<f64>>>,
    /// Number of samples that fell inside the region
    pub point_count: usize,
}

impl GridExport {
    pub fn new(grid: &Grid, point_count: usize) -> Self {
        Self {
            lats: grid.lats().to_vec(),
            lons: grid.lons().to_vec(),
            values: grid.to_rows(),
            point_count,
        }
    }
}

/// Serialize a grid to a JSON string.
pub fn grid_to_json(grid: &Grid, point_count: usize) -> Result<String> {
    Ok(serde_json::to_string(&GridExport::new(grid, point_count))?)
}

/// Write a grid as JSON to a file.
pub fn write_grid_json<P: AsRef<Path>>(grid: &Grid, point_count: usize, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    serde_json::to_writer(&mut writer, &GridExport::new(grid, point_count))?;
    writer.flush()?;
    Ok(())
}
