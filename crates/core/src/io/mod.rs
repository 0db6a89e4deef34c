//! I/O for sample point files and interpolated grids
//!
//! - `points`: lenient JSON sample loading
//! - `export`: the JSON plot payload consumed by the dashboard
//! - `geotiff`: float GeoTIFF grids and RGBA TIFF renderings

mod export;
mod geotiff;
mod points;

pub use export::{grid_to_json, write_grid_json, GridExport};
pub use geotiff::{
    write_grid_geotiff, write_grid_geotiff_to_buffer, write_rgba_tiff, write_rgba_tiff_to_buffer,
};
pub use points::{parse_points, read_points, read_points_from_str, DEFAULT_VALUE_FIELD};
