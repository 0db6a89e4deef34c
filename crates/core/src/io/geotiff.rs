//! GeoTIFF and RGBA TIFF writers (via the `tiff` crate)
//!
//! Grids are stored north-up: the first image row is the northernmost grid
//! row. Nodes are point-registered, so the tiepoint is the north-west node
//! itself rather than a pixel corner.

use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use tiff::encoder::colortype::{Gray32Float, RGBA8};
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;

use crate::error::{Error, Result};
use crate::grid::Grid;

const MODEL_PIXEL_SCALE: u16 = 33550;
const MODEL_TIEPOINT: u16 = 33922;
const GEO_KEY_DIRECTORY: u16 = 34735;

/// Write a grid as a 32-bit float GeoTIFF. "No data" nodes become NaN.
pub fn write_grid_geotiff<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    encode_grid(grid, file)
}

/// Same as [`write_grid_geotiff`] but into memory.
pub fn write_grid_geotiff_to_buffer(grid: &Grid) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_grid(grid, Cursor::new(&mut buf))?;
    Ok(buf)
}

/// Write an RGBA8 pixel buffer (row-major, `width * height * 4` bytes).
pub fn write_rgba_tiff<P: AsRef<Path>>(rgba: &[u8], width: usize, height: usize, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    encode_rgba(rgba, width, height, file)
}

/// Same as [`write_rgba_tiff`] but into memory.
pub fn write_rgba_tiff_to_buffer(rgba: &[u8], width: usize, height: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_rgba(rgba, width, height, Cursor::new(&mut buf))?;
    Ok(buf)
}

fn encode_grid<W: Write + Seek>(grid: &Grid, writer: W) -> Result<()> {
    let mut encoder =
        TiffEncoder::new(writer).map_err(|e| Error::Other(format!("TIFF encoder error: {}", e)))?;

    let (rows, cols) = grid.shape();
    let data: Vec<f32> = grid
        .data()
        .rows()
        .into_iter()
        .rev()
        .flat_map(|row| row.to_vec())
        .map(|v| v.map_or(f32::NAN, |x| x as f32))
        .collect();

    let mut image = encoder
        .new_image::<Gray32Float>(cols as u32, rows as u32)
        .map_err(|e| Error::Other(format!("Cannot create TIFF image: {}", e)))?;

    let scale = vec![grid.lon_step(), grid.lat_step(), 0.0];
    image
        .encoder()
        .write_tag(Tag::Unknown(MODEL_PIXEL_SCALE), scale.as_slice())
        .map_err(|e| Error::Other(format!("Cannot write scale tag: {}", e)))?;

    let bounds = grid.bounds();
    let tiepoint = vec![0.0, 0.0, 0.0, bounds.min_lon, bounds.max_lat, 0.0];
    image
        .encoder()
        .write_tag(Tag::Unknown(MODEL_TIEPOINT), tiepoint.as_slice())
        .map_err(|e| Error::Other(format!("Cannot write tiepoint tag: {}", e)))?;

    // GTModelTypeGeoKey = Geographic, GTRasterTypeGeoKey = PixelIsPoint,
    // GeographicTypeGeoKey = WGS 84.
    let geokeys: Vec<u16> = vec![
        1, 1, 0, 3, //
        1024, 0, 1, 2, //
        1025, 0, 1, 2, //
        2048, 0, 1, 4326,
    ];
    image
        .encoder()
        .write_tag(Tag::Unknown(GEO_KEY_DIRECTORY), geokeys.as_slice())
        .map_err(|e| Error::Other(format!("Cannot write geokey tag: {}", e)))?;

    image
        .write_data(&data)
        .map_err(|e| Error::Other(format!("Cannot write image data: {}", e)))?;

    Ok(())
}

fn encode_rgba<W: Write + Seek>(rgba: &[u8], width: usize, height: usize, writer: W) -> Result<()> {
    if rgba.len() != width * height * 4 {
        return Err(Error::Other(format!(
            "RGBA buffer has {} bytes, expected {} for {}x{}",
            rgba.len(),
            width * height * 4,
            width,
            height
        )));
    }

    let mut encoder =
        TiffEncoder::new(writer).map_err(|e| Error::Other(format!("TIFF encoder error: {}", e)))?;
    encoder
        .write_image::<RGBA8>(width as u32, height as u32, rgba)
        .map_err(|e| Error::Other(format!("Cannot write RGBA image: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::RegionBounds;
    use tiff::decoder::{Decoder, DecodingResult};

    #[test]
    fn test_grid_geotiff_is_north_up() {
        let bounds = RegionBounds::new(0.0, 1.0, 0.0, 1.0).unwrap();
        // Row 0 is the southern row.
        let grid = Grid::from_vec(bounds, 1, vec![Some(1.0), Some(2.0), None, Some(4.0)]).unwrap();
        let buf = write_grid_geotiff_to_buffer(&grid).unwrap();

        let mut decoder = Decoder::new(Cursor::new(buf)).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (2, 2));
        match decoder.read_image().unwrap() {
            DecodingResult::F32(values) => {
                assert!(values[0].is_nan());
                assert_eq!(&values[1..], &[4.0, 1.0, 2.0]);
            }
            _ => panic!("expected f32 image"),
        }
    }

    #[test]
    fn test_rgba_roundtrip() {
        let rgba = vec![
            255, 0, 0, 255, //
            0, 0, 0, 0,
        ];
        let buf = write_rgba_tiff_to_buffer(&rgba, 2, 1).unwrap();
        let mut decoder = Decoder::new(Cursor::new(buf)).unwrap();
        assert_eq!(decoder.dimensions().unwrap(), (2, 1));
        match decoder.read_image().unwrap() {
            DecodingResult::U8(values) => assert_eq!(values, rgba),
            _ => panic!("expected u8 image"),
        }
    }

    #[test]
    fn test_rgba_size_mismatch() {
        assert!(write_rgba_tiff_to_buffer(&[0u8; 7], 2, 1).is_err());
    }

    #[test]
    fn test_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let grid = Grid::new(RegionBounds::TEXAS, 4).unwrap();
        write_grid_geotiff(&grid, dir.path().join("grid.tif")).unwrap();
        write_rgba_tiff(&[0u8; 4], 1, 1, dir.path().join("img.tif")).unwrap();
        assert!(dir.path().join("grid.tif").exists());
        assert!(dir.path().join("img.tif").exists());
    }
}
